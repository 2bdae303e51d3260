/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

/// Errors from the storage boundary
///
/// Everything the codecs can't recover from locally when reading
/// or writing bytes ends up here.
pub enum ZByteIoError {
    StdIoError(std::io::Error),
    // requested, found
    NotEnoughBytes(usize, usize),
    Generic(&'static str)
}

impl Debug for ZByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ZByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {err}")
            }
            ZByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ZByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

impl Display for ZByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ZByteIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ZByteIoError::StdIoError(err) => Some(err),
            _ => None
        }
    }
}

impl From<std::io::Error> for ZByteIoError {
    fn from(value: std::io::Error) -> Self {
        ZByteIoError::StdIoError(value)
    }
}

impl From<&'static str> for ZByteIoError {
    fn from(value: &'static str) -> Self {
        ZByteIoError::Generic(value)
    }
}

/// An encapsulation of a byte stream reader
///
/// The reader never panics on out of bounds reads, single byte
/// reads past the end return `0` and callers are expected to
/// check [`eof`](Self::eof) or [`has`](Self::has) first.
pub struct ZByteReader<'a> {
    stream:   &'a [u8],
    position: usize
}

impl<'a> ZByteReader<'a> {
    /// Create a new reader positioned at the start of `buf`
    pub const fn new(buf: &'a [u8]) -> ZByteReader<'a> {
        ZByteReader {
            stream:   buf,
            position: 0
        }
    }
    /// Skip `num` bytes ahead of the stream.
    ///
    /// Skipping past the end leaves the reader at eof
    #[inline]
    pub fn skip(&mut self, num: usize) {
        self.position = self.position.saturating_add(num).min(self.stream.len());
    }
    /// Undo a read of `num` bytes
    #[inline]
    pub fn rewind(&mut self, num: usize) {
        self.position = self.position.saturating_sub(num);
    }
    /// Return true if at least `num` bytes are left in the stream
    ///
    /// # Example
    /// ```
    /// use netpbm_core::bytestream::ZByteReader;
    /// let reader = ZByteReader::new(b"P1");
    /// assert!(reader.has(2));
    /// assert!(!reader.has(3));
    /// ```
    #[inline]
    pub const fn has(&self, num: usize) -> bool {
        self.position.saturating_add(num) <= self.stream.len()
    }
    /// Return true if there are no more bytes to read
    #[inline]
    pub const fn eof(&self) -> bool {
        self.position >= self.stream.len()
    }
    /// Number of bytes not yet read
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }
    /// Current offset from the start of the stream
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }
    /// Read a single byte, or `0` if the stream is exhausted
    #[inline(always)]
    pub fn get_u8(&mut self) -> u8 {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }
    /// Look at the next byte without consuming it
    #[inline(always)]
    pub fn peek_u8(&self) -> Option<u8> {
        self.stream.get(self.position).copied()
    }
    /// Return a reference to the next `num` bytes and advance past them
    ///
    /// # Errors
    /// `NotEnoughBytes` if fewer than `num` bytes remain, the position
    /// is left untouched in that case.
    pub fn get_as_ref(&mut self, num: usize) -> Result<&'a [u8], ZByteIoError> {
        let end = self.position.saturating_add(num);

        match self.stream.get(self.position..end) {
            Some(bytes) => {
                self.position = end;
                Ok(bytes)
            }
            None => Err(ZByteIoError::NotEnoughBytes(num, self.remaining()))
        }
    }
    /// All bytes from the current position to the end of the stream
    ///
    /// This does not advance the reader.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        self.stream.get(self.position..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::ZByteReader;

    #[test]
    fn get_as_ref_does_not_move_on_error() {
        let mut reader = ZByteReader::new(&[1, 2, 3]);
        assert_eq!(reader.get_u8(), 1);
        assert!(reader.get_as_ref(3).is_err());
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.get_as_ref(2).unwrap(), &[2, 3]);
        assert!(reader.eof());
    }

    #[test]
    fn reads_past_end_are_zero() {
        let mut reader = ZByteReader::new(&[7]);
        assert_eq!(reader.get_u8(), 7);
        assert_eq!(reader.get_u8(), 0);
        assert_eq!(reader.peek_u8(), None);
        reader.rewind(1);
        assert_eq!(reader.peek_u8(), Some(7));
        reader.skip(100);
        assert!(reader.eof());
        assert!(reader.remaining_bytes().is_empty());
    }
}
