// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in codec pairs for primitive scalar types.
//!
//! Every scalar is fixed-width little-endian with no prefix. Text is the
//! one exception: a 4-byte byte count followed by UTF-16LE code units.

use crate::codec::Codec;
use crate::error::{WireError, WireResult};
use crate::registry::Wire;
use std::io::{Read, Write};

/// Read a 4-byte little-endian count prefix.
pub(crate) fn read_count(reader: &mut dyn Read) -> WireResult<usize> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf) as usize)
}

/// Write a 4-byte little-endian count prefix.
pub(crate) fn write_count(writer: &mut dyn Write, len: usize) -> WireResult<()> {
    let count = u32::try_from(len).map_err(|_| WireError::InvalidData {
        reason: format!("length {} exceeds the 4-byte count prefix", len),
    })?;
    Ok(writer.write_all(&count.to_le_bytes())?)
}

/// Generate `Wire` impls for fixed-width numerics (eliminates duplication):
/// decode reads exactly `size_of` bytes and converts via `from_le_bytes`,
/// encode writes `to_le_bytes`.
macro_rules! impl_wire_numeric {
    ($($ty:ty),* $(,)?) => {$(
        impl Wire for $ty {
            fn codec() -> Codec<Self> {
                Codec::new(
                    |r| {
                        let mut buf = [0u8; std::mem::size_of::<$ty>()];
                        r.read_exact(&mut buf)?;
                        Ok(<$ty>::from_le_bytes(buf))
                    },
                    |w, v| Ok(w.write_all(&v.to_le_bytes())?),
                )
            }
        }
    )*};
}

impl_wire_numeric!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

impl Wire for bool {
    fn codec() -> Codec<Self> {
        Codec::new(
            |r| {
                let mut buf = [0u8; 1];
                r.read_exact(&mut buf)?;
                Ok(buf[0] != 0)
            },
            |w, v| Ok(w.write_all(&[u8::from(*v)])?),
        )
    }
}

// A char is a Unicode scalar value, stored as 4 bytes. Raw values outside
// the scalar range are a data error.
impl Wire for char {
    fn codec() -> Codec<Self> {
        Codec::new(
            |r| {
                let mut buf = [0u8; 4];
                r.read_exact(&mut buf)?;
                let raw = u32::from_le_bytes(buf);
                char::from_u32(raw).ok_or(WireError::InvalidData {
                    reason: format!("{raw:#x} is not a Unicode scalar value"),
                })
            },
            |w, v| Ok(w.write_all(&(*v as u32).to_le_bytes())?),
        )
    }
}

// Text: 4-byte byte count, then UTF-16LE code units. The count is a byte
// count, so it is always even.
impl Wire for String {
    fn codec() -> Codec<Self> {
        Codec::new(
            |r| {
                let byte_len = read_count(r)?;
                if byte_len % 2 != 0 {
                    return Err(WireError::InvalidData {
                        reason: format!(
                            "text byte count {} is not a whole number of UTF-16 code units",
                            byte_len
                        ),
                    });
                }
                let mut bytes = vec![0u8; byte_len];
                r.read_exact(&mut bytes)?;
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|_| WireError::InvalidData {
                    reason: "invalid UTF-16 text".into(),
                })
            },
            |w, v| {
                let units: Vec<u16> = v.encode_utf16().collect();
                write_count(w, units.len() * 2)?;
                for unit in &units {
                    w.write_all(&unit.to_le_bytes())?;
                }
                Ok(())
            },
        )
    }
}

// 16-byte decimal, mirroring the fixed-width scalar contract.
#[cfg(feature = "decimal")]
impl Wire for rust_decimal::Decimal {
    fn codec() -> Codec<Self> {
        Codec::new(
            |r| {
                let mut buf = [0u8; 16];
                r.read_exact(&mut buf)?;
                Ok(rust_decimal::Decimal::deserialize(buf))
            },
            |w, v| Ok(w.write_all(&v.serialize())?),
        )
    }
}
