// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generic value and collection operations.
//!
//! Thin, stateless wrappers over a resolved codec pair: each operation
//! resolves once, then drives the pair against the stream. None of them
//! recover from mid-stream failure -- an error leaves the stream partially
//! written or partially consumed, and the caller must discard it.
//!
//! Lazy sequences get two write paths:
//!
//! - [`write_iter`] needs `Write + Seek`: it reserves a 4-byte placeholder,
//!   encodes while counting, then seeks back and patches the real count.
//!   Works for true single-pass sources of unknown length.
//! - [`write_iter_counted`] needs only `Write`, but requires an
//!   `ExactSizeIterator` so the count can be written up front without
//!   iterating twice. The claimed length is verified after encoding.

use crate::codec::Codec;
use crate::error::{WireError, WireResult};
use crate::primitive::{read_count, write_count};
use crate::registry::{resolve, Wire};
use std::collections::HashMap;
use std::hash::Hash;
use std::io::{Read, Seek, SeekFrom, Write};

/// Write a single value.
pub fn write_value<T: Wire>(writer: &mut impl Write, value: &T) -> WireResult<()> {
    resolve::<T>().encode(writer, value)
}

/// Read a single value.
pub fn read_value<T: Wire>(reader: &mut impl Read) -> WireResult<T> {
    resolve::<T>().decode(reader)
}

/// Write a fixed array: 4-byte count, then elements in order.
pub fn write_array<T: Wire>(writer: &mut impl Write, values: &[T]) -> WireResult<()> {
    let codec = resolve::<T>();
    write_count(writer, values.len())?;
    for value in values {
        codec.encode(writer, value)?;
    }
    Ok(())
}

/// Read a fixed array: allocated at exactly the decoded count.
pub fn read_array<T: Wire>(reader: &mut impl Read) -> WireResult<Box<[T]>> {
    resolve::<Box<[T]>>().decode(reader)
}

/// Write a growable list. Identical framing to [`write_array`].
pub fn write_list<T: Wire>(writer: &mut impl Write, values: &[T]) -> WireResult<()> {
    write_array(writer, values)
}

/// Read a growable list, preallocated to the decoded count.
pub fn read_list<T: Wire>(reader: &mut impl Read) -> WireResult<Vec<T>> {
    resolve::<Vec<T>>().decode(reader)
}

/// Write a dictionary: 4-byte count, then (key, value) pairs in the map's
/// iteration order.
pub fn write_map<K, V>(writer: &mut impl Write, map: &HashMap<K, V>) -> WireResult<()>
where
    K: Wire + Eq + Hash,
    V: Wire,
{
    resolve::<HashMap<K, V>>().encode(writer, map)
}

/// Read a dictionary. A duplicate key in the stream is a data error.
pub fn read_map<K, V>(reader: &mut impl Read) -> WireResult<HashMap<K, V>>
where
    K: Wire + Eq + Hash,
    V: Wire,
{
    resolve::<HashMap<K, V>>().decode(reader)
}

/// Write a lazy sequence to a seekable destination.
///
/// Reserves a 4-byte count placeholder, encodes each element while
/// counting, then seeks back and patches the real count. Returns the
/// number of elements written.
pub fn write_iter<T, W, I>(writer: &mut W, items: I) -> WireResult<u32>
where
    T: Wire,
    W: Write + Seek,
    I: IntoIterator<Item = T>,
{
    let codec = resolve::<T>();
    let count_pos = writer.stream_position()?;
    writer.write_all(&0u32.to_le_bytes())?;

    let mut count: u32 = 0;
    for item in items {
        codec.encode(writer, &item)?;
        count = count.checked_add(1).ok_or_else(|| WireError::InvalidData {
            reason: "sequence length exceeds the 4-byte count prefix".into(),
        })?;
    }

    let end_pos = writer.stream_position()?;
    writer.seek(SeekFrom::Start(count_pos))?;
    writer.write_all(&count.to_le_bytes())?;
    writer.seek(SeekFrom::Start(end_pos))?;
    Ok(count)
}

/// Write a lazy sequence of known length to a non-seekable destination.
///
/// The count comes from `ExactSizeIterator::len` and is written first, so
/// the source is consumed exactly once. If the iterator produces a
/// different number of elements than it claimed, the stream is corrupt and
/// a data error is returned.
pub fn write_iter_counted<T, W, I>(writer: &mut W, items: I) -> WireResult<u32>
where
    T: Wire,
    W: Write,
    I: IntoIterator<Item = T>,
    I::IntoIter: ExactSizeIterator,
{
    let codec = resolve::<T>();
    let iter = items.into_iter();
    let claimed = u32::try_from(iter.len()).map_err(|_| WireError::InvalidData {
        reason: "sequence length exceeds the 4-byte count prefix".into(),
    })?;
    writer.write_all(&claimed.to_le_bytes())?;

    let mut written: u32 = 0;
    for item in iter {
        codec.encode(writer, &item)?;
        written = written.saturating_add(1);
    }
    if written != claimed {
        return Err(WireError::InvalidData {
            reason: format!("iterator claimed {} elements but produced {}", claimed, written),
        });
    }
    Ok(written)
}

/// Read a count-prefixed lazy sequence.
pub fn read_iter<T: Wire, R: Read>(reader: &mut R) -> WireResult<IterReader<'_, R, T>> {
    let count = read_count(reader)? as u32;
    Ok(read_iter_with_len(reader, count))
}

/// Read a lazy sequence of exactly `count` elements, with no prefix.
/// Used when the count is known out-of-band.
pub fn read_iter_with_len<T: Wire, R: Read>(reader: &mut R, count: u32) -> IterReader<'_, R, T> {
    IterReader {
        reader,
        remaining: count,
        codec: resolve::<T>(),
    }
}

/// Lazy decoding iterator over a fixed number of elements.
///
/// Yields `WireResult<T>`; after the first decode error the iterator is
/// fused. Restartable once: dropping it mid-way leaves the stream
/// positioned inside the sequence.
pub struct IterReader<'r, R, T> {
    reader: &'r mut R,
    remaining: u32,
    codec: Codec<T>,
}

impl<R, T> IterReader<'_, R, T> {
    /// Elements not yet decoded.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl<R: Read, T> Iterator for IterReader<'_, R, T> {
    type Item = WireResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        match self.codec.decode(&mut *self.reader) {
            Ok(value) => {
                self.remaining -= 1;
                Some(Ok(value))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl<R: Read, T> ExactSizeIterator for IterReader<'_, R, T> {}

/// Extension methods on any `Write` destination.
pub trait WireWrite: Write {
    fn write_value<T: Wire>(&mut self, value: &T) -> WireResult<()>
    where
        Self: Sized,
    {
        write_value(self, value)
    }

    fn write_array<T: Wire>(&mut self, values: &[T]) -> WireResult<()>
    where
        Self: Sized,
    {
        write_array(self, values)
    }

    fn write_list<T: Wire>(&mut self, values: &[T]) -> WireResult<()>
    where
        Self: Sized,
    {
        write_list(self, values)
    }

    fn write_map<K, V>(&mut self, map: &HashMap<K, V>) -> WireResult<()>
    where
        Self: Sized,
        K: Wire + Eq + Hash,
        V: Wire,
    {
        write_map(self, map)
    }

    fn write_iter<T, I>(&mut self, items: I) -> WireResult<u32>
    where
        Self: Sized + Seek,
        T: Wire,
        I: IntoIterator<Item = T>,
    {
        write_iter(self, items)
    }

    fn write_iter_counted<T, I>(&mut self, items: I) -> WireResult<u32>
    where
        Self: Sized,
        T: Wire,
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        write_iter_counted(self, items)
    }
}

impl<W: Write> WireWrite for W {}

/// Extension methods on any `Read` source.
pub trait WireRead: Read {
    fn read_value<T: Wire>(&mut self) -> WireResult<T>
    where
        Self: Sized,
    {
        read_value(self)
    }

    fn read_array<T: Wire>(&mut self) -> WireResult<Box<[T]>>
    where
        Self: Sized,
    {
        read_array(self)
    }

    fn read_list<T: Wire>(&mut self) -> WireResult<Vec<T>>
    where
        Self: Sized,
    {
        read_list(self)
    }

    fn read_map<K, V>(&mut self) -> WireResult<HashMap<K, V>>
    where
        Self: Sized,
        K: Wire + Eq + Hash,
        V: Wire,
    {
        read_map(self)
    }

    fn read_iter<T: Wire>(&mut self) -> WireResult<IterReader<'_, Self, T>>
    where
        Self: Sized,
    {
        read_iter(self)
    }

    fn read_iter_with_len<T: Wire>(&mut self, count: u32) -> IterReader<'_, Self, T>
    where
        Self: Sized,
    {
        read_iter_with_len(self, count)
    }
}

impl<R: Read> WireRead for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn value_round_trip_through_extension_traits() {
        let mut buf = Vec::new();
        buf.write_value(&0xBEEFu32).expect("write");
        buf.write_value(&"text".to_string()).expect("write");

        let mut cursor = Cursor::new(buf);
        assert_eq!(cursor.read_value::<u32>().expect("read"), 0xBEEF);
        assert_eq!(cursor.read_value::<String>().expect("read"), "text");
    }

    #[test]
    fn array_reference_bytes() {
        let mut buf = Vec::new();
        write_array(&mut buf, &[1u8, 2, 3, 4]).expect("write");
        assert_eq!(buf, [0x04, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04]);

        let back = read_array::<u8>(&mut Cursor::new(buf)).expect("read");
        assert_eq!(&*back, &[1, 2, 3, 4]);
    }

    #[test]
    fn seekable_iter_write_patches_the_count() {
        let mut cursor = Cursor::new(Vec::new());
        // Filtered iterator: length unknown up front.
        let written =
            write_iter(&mut cursor, (0u32..10).filter(|n| n % 2 == 0)).expect("write");
        assert_eq!(written, 5);

        let bytes = cursor.into_inner();
        assert_eq!(&bytes[..4], &5u32.to_le_bytes());

        let mut cursor = Cursor::new(bytes);
        let values: Vec<u32> = read_iter::<u32, _>(&mut cursor)
            .expect("read")
            .collect::<WireResult<_>>()
            .expect("decode");
        assert_eq!(values, [0, 2, 4, 6, 8]);
    }

    #[test]
    fn counted_iter_write_matches_seekable_output() {
        let items: Vec<u16> = vec![7, 8, 9];

        let mut seekable = Cursor::new(Vec::new());
        write_iter(&mut seekable, items.iter().copied()).expect("write seekable");

        let mut plain = Vec::new();
        write_iter_counted(&mut plain, items.iter().copied()).expect("write counted");

        assert_eq!(seekable.into_inner(), plain);
    }

    #[test]
    fn counted_iter_write_rejects_lying_length_hints() {
        struct Lying(u8);
        impl Iterator for Lying {
            type Item = u8;
            fn next(&mut self) -> Option<u8> {
                if self.0 == 0 {
                    None
                } else {
                    self.0 -= 1;
                    Some(self.0)
                }
            }
            fn size_hint(&self) -> (usize, Option<usize>) {
                (4, Some(4))
            }
        }
        impl ExactSizeIterator for Lying {}

        let mut buf = Vec::new();
        let err = write_iter_counted(&mut buf, Lying(2)).unwrap_err();
        match err {
            WireError::InvalidData { reason } => assert!(reason.contains("claimed")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn iter_reader_is_lazy_and_sized() {
        let mut bytes = vec![3, 0, 0, 0];
        for v in [10u16, 20, 30] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let mut cursor = Cursor::new(bytes);
        let mut iter = read_iter::<u16, _>(&mut cursor).expect("read");
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next().transpose().expect("decode"), Some(10));
        assert_eq!(iter.remaining(), 2);
        let rest: Vec<u16> = iter.collect::<WireResult<_>>().expect("decode");
        assert_eq!(rest, [20, 30]);
    }

    #[test]
    fn explicit_count_variant_reads_without_prefix() {
        let mut bytes = Vec::new();
        for v in [5u8, 6, 7] {
            bytes.push(v);
        }
        let mut cursor = Cursor::new(bytes);
        let values: Vec<u8> = read_iter_with_len::<u8, _>(&mut cursor, 3)
            .collect::<WireResult<_>>()
            .expect("decode");
        assert_eq!(values, [5, 6, 7]);
    }

    #[test]
    fn iter_reader_fuses_after_an_error() {
        // Claims 4 elements, provides 1.
        let bytes = vec![4, 0, 0, 0, 0xFF];
        let mut cursor = Cursor::new(bytes);
        let mut iter = read_iter::<u8, _>(&mut cursor).expect("read");
        assert!(iter.next().expect("item").is_ok());
        assert!(iter.next().expect("item").is_err());
        assert!(iter.next().is_none());
    }
}
