// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural codec pairs for fixed tuples, arity 1 through 8.
//!
//! Slots are encoded positionally with no separators and no count prefix;
//! each slot's pair is resolved independently, so slots may differ in type.
//! Logical tuples longer than 8 slots nest: the 8th slot is itself a tuple,
//! resolved the same way.

use crate::codec::Codec;
use crate::registry::{resolve, Wire};

macro_rules! impl_wire_tuple {
    ($($slot:ident . $idx:tt),+) => {
        impl<$($slot: Wire),+> Wire for ($($slot,)+) {
            fn codec() -> Codec<Self> {
                let enc = ($(resolve::<$slot>(),)+);
                let dec = enc.clone();
                Codec::new(
                    move |r| Ok(($(dec.$idx.decode(r)?,)+)),
                    move |w, v| {
                        $(enc.$idx.encode(w, &v.$idx)?;)+
                        Ok(())
                    },
                )
            }
        }
    };
}

impl_wire_tuple!(T1.0);
impl_wire_tuple!(T1.0, T2.1);
impl_wire_tuple!(T1.0, T2.1, T3.2);
impl_wire_tuple!(T1.0, T2.1, T3.2, T4.3);
impl_wire_tuple!(T1.0, T2.1, T3.2, T4.3, T5.4);
impl_wire_tuple!(T1.0, T2.1, T3.2, T4.3, T5.4, T6.5);
impl_wire_tuple!(T1.0, T2.1, T3.2, T4.3, T5.4, T6.5, T7.6);
impl_wire_tuple!(T1.0, T2.1, T3.2, T4.3, T5.4, T6.5, T7.6, T8.7);
