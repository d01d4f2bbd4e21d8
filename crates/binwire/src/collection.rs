// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural codec pairs for containers.
//!
//! Arrays (`Box<[T]>`), lists (`Vec<T>`), and dictionaries (`HashMap<K, V>`)
//! all share the same framing: a 4-byte count, then elements in order. The
//! element pairs are resolved once when the container pair is built, so
//! nesting costs nothing per value.

use crate::codec::Codec;
use crate::error::{WireError, WireResult};
use crate::primitive::{read_count, write_count};
use crate::registry::{resolve, Wire};
use std::collections::HashMap;
use std::hash::Hash;
use std::io::{Read, Write};

pub(crate) fn decode_elements<T>(
    reader: &mut dyn Read,
    codec: &Codec<T>,
    count: usize,
) -> WireResult<Vec<T>> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(codec.decode(reader)?);
    }
    Ok(out)
}

pub(crate) fn encode_elements<'a, T: 'a>(
    writer: &mut dyn Write,
    codec: &Codec<T>,
    values: impl IntoIterator<Item = &'a T>,
) -> WireResult<()> {
    for value in values {
        codec.encode(writer, value)?;
    }
    Ok(())
}

// Growable list: count prefix, elements in order, capacity preallocated to
// the decoded count.
impl<T: Wire> Wire for Vec<T> {
    fn codec() -> Codec<Self> {
        let elem = resolve::<T>();
        let dec = elem.clone();
        Codec::new(
            move |r| {
                let count = read_count(r)?;
                decode_elements(r, &dec, count)
            },
            move |w, values| {
                write_count(w, values.len())?;
                encode_elements(w, &elem, values)
            },
        )
    }
}

// Fixed array: identical framing to a list, but the decoded container is
// allocated at exactly the decoded length and never grows.
impl<T: Wire> Wire for Box<[T]> {
    fn codec() -> Codec<Self> {
        let elem = resolve::<T>();
        let dec = elem.clone();
        Codec::new(
            move |r| {
                let count = read_count(r)?;
                Ok(decode_elements(r, &dec, count)?.into_boxed_slice())
            },
            move |w, values| {
                write_count(w, values.len())?;
                encode_elements(w, &elem, values.iter())
            },
        )
    }
}

// Dictionary: count prefix, then (key, value) pairs in the map's native
// iteration order. A duplicate key during decode is a data error.
impl<K, V> Wire for HashMap<K, V>
where
    K: Wire + Eq + Hash,
    V: Wire,
{
    fn codec() -> Codec<Self> {
        let key = resolve::<K>();
        let value = resolve::<V>();
        let (key_dec, value_dec) = (key.clone(), value.clone());
        Codec::new(
            move |r| {
                let count = read_count(r)?;
                let mut out = HashMap::with_capacity(count);
                for _ in 0..count {
                    let k = key_dec.decode(r)?;
                    let v = value_dec.decode(r)?;
                    if out.insert(k, v).is_some() {
                        return Err(WireError::InvalidData {
                            reason: "duplicate dictionary key".into(),
                        });
                    }
                }
                Ok(out)
            },
            move |w, map| {
                write_count(w, map.len())?;
                for (k, v) in map {
                    key.encode(w, k)?;
                    value.encode(w, v)?;
                }
                Ok(())
            },
        )
    }
}
