// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # binwire - generic binary serialization engine
//!
//! Given a value of some type, binwire locates (or synthesizes) a
//! decoder/encoder pair for that exact type and uses it to read/write the
//! value on a binary stream, recursively handling containers and composite
//! types without per-type caller boilerplate.
//!
//! ## Quick Start
//!
//! ```rust
//! use binwire::{Codec, Wire, WireRead, WireResult, WireWrite};
//!
//! binwire::wire_enum! {
//!     /// Signal polarity.
//!     pub enum Signal: i32 {
//!         Positive = -1,
//!         Neutral = 0,
//!         Negative = 1,
//!     }
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct SignalSet {
//!     signal: Signal,
//!     frequency: f64,
//!     repeats: (i64, i64),
//! }
//!
//! // A user type opts in by supplying its codec pair.
//! impl Wire for SignalSet {
//!     fn codec() -> Codec<Self> {
//!         Codec::new(
//!             |mut r| {
//!                 Ok(SignalSet {
//!                     signal: r.read_value()?,
//!                     frequency: r.read_value()?,
//!                     repeats: r.read_value()?,
//!                 })
//!             },
//!             |mut w, v| {
//!                 w.write_value(&v.signal)?;
//!                 w.write_value(&v.frequency)?;
//!                 w.write_value(&v.repeats)
//!             },
//!         )
//!     }
//! }
//!
//! fn main() -> WireResult<()> {
//!     let sets = vec![
//!         SignalSet { signal: Signal::Positive, frequency: 22.8, repeats: (1, 4) },
//!         SignalSet { signal: Signal::Negative, frequency: 324.0, repeats: (-10, 10) },
//!     ];
//!
//!     let mut buf = Vec::new();
//!     buf.write_value(&vec![1u8, 2, 3, 4])?;
//!     buf.write_list(&sets)?;
//!
//!     let mut cursor = std::io::Cursor::new(buf);
//!     assert_eq!(cursor.read_value::<Vec<u8>>()?, [1, 2, 3, 4]);
//!     assert_eq!(cursor.read_list::<SignalSet>()?, sets);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +------------------------------------------------------------+
//! |                    Operations Layer                        |
//! |  write_value/read_value | arrays | lists | maps | iters    |
//! +------------------------------------------------------------+
//! |                      Type Resolver                         |
//! |  registry (TypeId -> Codec) | structural Wire impls        |
//! +------------------------------------------------------------+
//! |                   Primitive Codec Table                    |
//! |  fixed-width LE scalars | UTF-16LE text | 16-byte decimal  |
//! +------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Wire`] | Opt-in trait supplying a type's codec pair |
//! | [`Codec`] | Paired decode/encode functions bound to one type |
//! | [`WireRead`] / [`WireWrite`] | Extension methods on `Read` / `Write` |
//! | [`IterReader`] | Lazy decoding iterator over a counted sequence |
//!
//! ## Wire Format
//!
//! Little-endian, no header, no magic, no version field. Scalars are raw
//! fixed-width bytes; text, arrays, lists, maps, and sequences carry a
//! 4-byte count prefix; enums are their underlying integer; tuple slots are
//! concatenated positionally. Format compatibility between writer and
//! reader is entirely the caller's responsibility.

pub mod codec;
pub mod collection;
pub mod enums;
pub mod error;
pub mod ops;
pub mod primitive;
pub mod registry;
pub mod tuple;

pub use codec::{Codec, DecodeFn, EncodeFn};
pub use error::{WireError, WireResult};
pub use ops::{
    read_array, read_iter, read_iter_with_len, read_list, read_map, read_value, write_array,
    write_iter, write_iter_counted, write_list, write_map, write_value, IterReader, WireRead,
    WireWrite,
};
pub use registry::{register, resolve, try_resolve, Wire};
