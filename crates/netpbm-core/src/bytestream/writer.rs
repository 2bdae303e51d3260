/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::{ZByteIoError, ZByteWriterTrait};

/// Encapsulates a simple byte writer
///
/// Keeps count of everything written so encoders can report
/// the size of their output
pub struct ZWriter<T: ZByteWriterTrait> {
    buffer:        T,
    bytes_written: usize
}

impl<T: ZByteWriterTrait> ZWriter<T> {
    /// Create a new writer that writes into `data`
    pub fn new(data: T) -> ZWriter<T> {
        ZWriter {
            buffer:        data,
            bytes_written: 0
        }
    }
    /// Destroy this writer returning the underlying sink
    pub fn inner(self) -> T {
        self.buffer
    }
    /// Return the number of bytes written by this writer
    ///
    /// # Example
    /// ```
    /// use netpbm_core::bytestream::ZWriter;
    /// let mut out = vec![];
    /// let mut stream = ZWriter::new(&mut out);
    /// stream.write_all(b"P1\n").unwrap();
    /// assert_eq!(stream.bytes_written(), 3);
    /// ```
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }
    /// Write all of `buf` into the sink
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ZByteIoError> {
        self.buffer.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }
    /// Write a single byte
    pub fn write_u8(&mut self, byte: u8) -> Result<(), ZByteIoError> {
        self.write_all(&[byte])
    }
    /// Tell the sink how many more bytes we expect to write
    pub fn reserve(&mut self, additional: usize) -> Result<(), ZByteIoError> {
        self.buffer.pre_allocate_hint(additional)
    }
    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<(), ZByteIoError> {
        self.buffer.flush_bytes()
    }
}
