/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! The reader walks a borrowed slice, which is all the netpbm
//! decoders need since images are loaded fully into memory
//! before decoding. The writer accepts anything implementing
//! [`ZByteWriterTrait`], which covers every [`std::io::Write`] type.
pub use reader::{ZByteIoError, ZByteReader};
pub use traits::ZByteWriterTrait;
pub use writer::ZWriter;

mod reader;
mod traits;
mod writer;
