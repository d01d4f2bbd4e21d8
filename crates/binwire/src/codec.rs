// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Codec pairs: paired decode/encode functions bound to one type.

use crate::error::WireResult;
use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;

/// Decoder half of a codec pair.
pub type DecodeFn<T> = Arc<dyn Fn(&mut dyn Read) -> WireResult<T> + Send + Sync>;
/// Encoder half of a codec pair.
pub type EncodeFn<T> = Arc<dyn Fn(&mut dyn Write, &T) -> WireResult<()> + Send + Sync>;

/// A paired decoder/encoder for exactly one type.
///
/// Immutable once constructed; cloning shares the underlying functions.
/// Pairs for composite types capture the already-resolved pairs of their
/// element types, so resolution cost is paid once per type.
pub struct Codec<T> {
    decode_fn: DecodeFn<T>,
    encode_fn: EncodeFn<T>,
}

// The closures are opaque; the only useful fact is the bound type.
impl<T> fmt::Debug for Codec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Codec<{}>", std::any::type_name::<T>())
    }
}

impl<T> Clone for Codec<T> {
    fn clone(&self) -> Self {
        Self {
            decode_fn: Arc::clone(&self.decode_fn),
            encode_fn: Arc::clone(&self.encode_fn),
        }
    }
}

impl<T> Codec<T> {
    pub fn new<D, E>(decode: D, encode: E) -> Self
    where
        D: Fn(&mut dyn Read) -> WireResult<T> + Send + Sync + 'static,
        E: Fn(&mut dyn Write, &T) -> WireResult<()> + Send + Sync + 'static,
    {
        Self {
            decode_fn: Arc::new(decode),
            encode_fn: Arc::new(encode),
        }
    }

    /// Decode one value from the stream.
    pub fn decode(&self, reader: &mut dyn Read) -> WireResult<T> {
        (self.decode_fn)(reader)
    }

    /// Encode one value to the stream.
    pub fn encode(&self, writer: &mut dyn Write, value: &T) -> WireResult<()> {
        (self.encode_fn)(writer, value)
    }
}
