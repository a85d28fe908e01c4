//! Bounds-checked reading over a borrowed document.

use thiserror::Error;

use super::check::{Crc, compute_crc};

/// Byte order of multi-byte values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

/// A read or slice reaching past the visible range of a cursor.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Reading {requested} bytes at offset {position} exceeds the {available} bytes available.")]
pub struct OutOfBounds {
    pub position: usize,
    pub requested: usize,
    pub available: usize,
}

/// A fixed-size value decodable from bytes in either byte order.
pub trait Primitive: Sized {
    /// The bytes holding one value.
    type Bytes;

    fn from_bytes(r: Self::Bytes, endianness: Endianness) -> Self;
}

macro_rules! primitive {
    ($($t:ty),*) => {
        $(
            impl Primitive for $t {
                type Bytes = [u8; size_of::<$t>()];

                fn from_bytes(r: Self::Bytes, endianness: Endianness) -> Self {
                    match endianness {
                        Endianness::Little => <$t>::from_le_bytes(r),
                        Endianness::Big => <$t>::from_be_bytes(r),
                    }
                }
            }
        )*
    };
}

primitive!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// A cursor over an immutable range of bytes.
///
/// Every read either advances the position by exactly the width read or
/// fails without moving. Consumed bytes are fed to a running check value.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
    last_read: usize,
    crc: Crc,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            last_read: 0,
            crc: Crc::new(),
        }
    }

    /// An independent cursor over the same visible range, at its start.
    pub fn copy(&self) -> Self {
        Self::new(self.data)
    }

    /// Restrict the visible range to `start..end` of the current range.
    ///
    /// The position is rebased onto the new range; a cursor positioned before
    /// `start` moves to `start`. The running check value is kept.
    pub fn slice(&mut self, start: usize, end: usize) -> Result<(), OutOfBounds> {
        let data = self.data.get(start..end).ok_or(OutOfBounds {
            position: start,
            requested: end.saturating_sub(start),
            available: self.data.len().saturating_sub(start),
        })?;

        self.position = self.position.saturating_sub(start).min(data.len());
        self.data = data;
        Ok(())
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Length of the visible range.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Width of the most recent successful read.
    pub fn last_read(&self) -> usize {
        self.last_read
    }

    /// Check value of every byte consumed so far.
    pub fn crc(&self) -> u16 {
        self.crc.value()
    }

    /// Compute a check value over `start..end` of the visible range,
    /// independent of the position.
    pub fn crc_range(&self, start: usize, end: usize) -> Result<u16, OutOfBounds> {
        let r = self.data.get(start..end).ok_or(OutOfBounds {
            position: start,
            requested: end.saturating_sub(start),
            available: self.data.len().saturating_sub(start),
        })?;
        Ok(compute_crc(0, r))
    }

    /// Take the next `n` bytes.
    pub fn take_slice(&mut self, n: usize) -> Result<&'a [u8], OutOfBounds> {
        let s = self.position;
        let r = s
            .checked_add(n)
            .and_then(|e| self.data.get(s..e))
            .ok_or(OutOfBounds {
                position: s,
                requested: n,
                available: self.remaining(),
            })?;

        self.position += n;
        self.last_read = n;
        self.crc.update(r);
        Ok(r)
    }

    /// Take an exact number of bytes.
    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], OutOfBounds> {
        let mut buf = [0; N];
        buf.copy_from_slice(self.take_slice(N)?);
        Ok(buf)
    }

    /// Read a single value in the given byte order.
    pub fn read<T: Primitive<Bytes = [u8; N]>, const N: usize>(
        &mut self,
        endianness: Endianness,
    ) -> Result<T, OutOfBounds> {
        Ok(T::from_bytes(self.take()?, endianness))
    }

    pub fn skip(&mut self, n: usize) -> Result<(), OutOfBounds> {
        self.take_slice(n).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_by_width() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut c = ByteCursor::new(&bytes);

        let a: u8 = c.read(Endianness::Little).unwrap();
        assert_eq!((a, c.position(), c.last_read()), (0x01, 1, 1));

        let b: u16 = c.read(Endianness::Little).unwrap();
        assert_eq!((b, c.position()), (0x0302, 3));

        let d: u32 = c.read(Endianness::Big).unwrap();
        assert_eq!((d, c.position(), c.last_read()), (0x04050607, 7, 4));
        assert!(c.is_empty());
    }

    #[test]
    fn failed_read_does_not_move() {
        let bytes = [0xAA, 0xBB, 0xCC];
        let mut c = ByteCursor::new(&bytes);
        c.skip(2).unwrap();

        let err = c.read::<u16, 2>(Endianness::Little).unwrap_err();
        assert_eq!(
            err,
            OutOfBounds {
                position: 2,
                requested: 2,
                available: 1
            }
        );
        assert_eq!(c.position(), 2);
    }

    #[test]
    fn running_crc_matches_range() {
        let bytes: [u8; 10] = [43, 23, 23, 71, 95, 21, 38, 90, 91, 32];
        let mut c = ByteCursor::new(&bytes);
        c.skip(4).unwrap();
        let _: u32 = c.read(Endianness::Big).unwrap();
        assert_eq!(c.crc(), c.crc_range(0, 8).unwrap());
        c.skip(2).unwrap();
        assert_eq!(c.crc(), 0x4EFC);
    }

    #[test]
    fn slice_hides_following_bytes() {
        let bytes = [1, 2, 3, 4, 5, 6];
        let mut c = ByteCursor::new(&bytes);
        c.skip(1).unwrap();
        c.slice(0, 3).unwrap();
        assert_eq!(c.position(), 1);
        assert_eq!(c.remaining(), 2);
        assert!(c.take::<3>().is_err());
        assert!(c.slice(0, 10).is_err());
    }

    #[test]
    fn copies_are_independent() {
        let bytes = [1, 2, 3, 4];
        let mut a = ByteCursor::new(&bytes);
        a.skip(3).unwrap();

        let mut b = a.copy();
        assert_eq!(b.position(), 0);
        assert_eq!(b.crc(), 0);

        b.slice(2, 4).unwrap();
        assert_eq!(b.take::<2>().unwrap(), [3, 4]);
        assert_eq!(a.position(), 3);
    }
}
