// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open enums: named constants over an underlying integer representation.
//!
//! The wire carries only the underlying integer, no tag. Decoding never
//! validates membership, so a raw value with no declared member still
//! round-trips as an unnamed value; the generated `name()` lookup returns
//! `None` for those.

/// Declare an open enum with a codec pair over its underlying integer.
///
/// Expands to a `#[repr(transparent)]` newtype with one associated constant
/// per declared member, a `name()` lookup, and a `Wire` impl whose codec is
/// a zero-cost wrap/unwrap of the underlying integer codec.
///
/// ```
/// binwire::wire_enum! {
///     /// Signal polarity.
///     pub enum Signal: i32 {
///         Positive = -1,
///         Neutral = 0,
///         Negative = 1,
///     }
/// }
///
/// let mut buf = Vec::new();
/// binwire::write_value(&mut buf, &Signal::Negative).unwrap();
/// assert_eq!(buf, 1i32.to_le_bytes());
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ty {
            $($(#[$member_meta:meta])* $member:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[repr(transparent)]
        $vis struct $name(pub $repr);

        #[allow(non_upper_case_globals)]
        impl $name {
            $($(#[$member_meta])* $vis const $member: $name = $name($value);)+

            /// Name of the matching declared member, or `None` for an
            /// unnamed raw value.
            $vis fn name(self) -> ::core::option::Option<&'static str> {
                match self.0 {
                    $(x if x == $value => ::core::option::Option::Some(stringify!($member)),)+
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl $crate::Wire for $name {
            fn codec() -> $crate::Codec<Self> {
                let repr = $crate::resolve::<$repr>();
                let dec = ::core::clone::Clone::clone(&repr);
                $crate::Codec::new(
                    move |r| ::core::result::Result::Ok($name(dec.decode(r)?)),
                    move |w, v| repr.encode(w, &v.0),
                )
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::registry::resolve;
    use std::io::Cursor;

    wire_enum! {
        /// Signal polarity, as carried on the wire.
        pub enum Signal: i32 {
            Positive = -1,
            Neutral = 0,
            Negative = 1,
        }
    }

    wire_enum! {
        enum Tiny: u8 {
            A = 1,
            B = 2,
        }
    }

    #[test]
    fn enum_is_its_underlying_integer_on_the_wire() {
        let codec = resolve::<Signal>();
        let mut buf = Vec::new();
        codec.encode(&mut buf, &Signal::Positive).expect("encode");
        assert_eq!(buf, (-1i32).to_le_bytes());

        let back = codec.decode(&mut Cursor::new(buf)).expect("decode");
        assert_eq!(back, Signal::Positive);
        assert_eq!(back.name(), Some("Positive"));
    }

    #[test]
    fn out_of_range_values_round_trip_unnamed() {
        let codec = resolve::<Signal>();
        let mut cursor = Cursor::new(1234i32.to_le_bytes().to_vec());
        let unnamed = codec.decode(&mut cursor).expect("decode");
        assert_eq!(unnamed, Signal(1234));
        assert_eq!(unnamed.name(), None);

        let mut buf = Vec::new();
        codec.encode(&mut buf, &unnamed).expect("encode");
        assert_eq!(buf, 1234i32.to_le_bytes());
    }

    #[test]
    fn narrow_reprs_stay_narrow() {
        let codec = resolve::<Tiny>();
        let mut buf = Vec::new();
        codec.encode(&mut buf, &Tiny::B).expect("encode");
        assert_eq!(buf, [2]);
        assert_eq!(Tiny(3).name(), None);
        assert_eq!(Tiny::A.name(), Some("A"));
    }
}
