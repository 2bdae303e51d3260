/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for writing images
//!
//! This exposes the trait encoders use to push bytes
//! into their destination.

use crate::bytestream::ZByteIoError;

/// The de-facto Output trait implemented for writers
///
/// It is implemented for every [`std::io::Write`], so vectors,
/// mutable references to vectors, files and buffered writers can all be
/// handed to an encoder directly.
pub trait ZByteWriterTrait {
    /// Write some bytes into the sink returning how many were accepted
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ZByteIoError>;
    /// Write all of `buf` or return an error
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ZByteIoError>;
    /// Ensure all intermediately buffered contents reach their destination
    fn flush_bytes(&mut self) -> Result<(), ZByteIoError>;
    /// A hint to tell the implementation how big of a size we expect the
    /// output to be.
    ///
    /// Implementations are free to ignore it.
    fn pre_allocate_hint(&mut self, size: usize) -> Result<(), ZByteIoError>;
}

impl<W: std::io::Write> ZByteWriterTrait for W {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ZByteIoError> {
        self.write(buf).map_err(ZByteIoError::StdIoError)
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ZByteIoError> {
        self.write_all(buf).map_err(ZByteIoError::StdIoError)
    }

    fn flush_bytes(&mut self) -> Result<(), ZByteIoError> {
        self.flush().map_err(ZByteIoError::StdIoError)
    }

    fn pre_allocate_hint(&mut self, _: usize) -> Result<(), ZByteIoError> {
        Ok(())
    }
}
