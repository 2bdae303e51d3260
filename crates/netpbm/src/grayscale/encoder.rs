/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::Write;

use netpbm_core::bytestream::{ZByteIoError, ZByteWriterTrait, ZWriter};
use netpbm_core::log::trace;
use netpbm_core::magic::PnmVariant;
use netpbm_core::options::EncoderOptions;

use crate::grayscale::GrayscaleImage;
use crate::headers::{encode_header, PnmHeader};
use crate::traits::Raster;

/// A portable graymap encoder
///
/// `P2` writes decimal tokens separated by single spaces with one line per
/// row, `P5` writes one raw byte per pixel.
///
/// # Example
/// ```
/// use netpbm::{GrayscaleEncoder, GrayscaleImage};
/// use netpbm::netpbm_core::magic::MagicNumber;
/// use netpbm::netpbm_core::options::EncoderOptions;
///
/// let image = GrayscaleImage::from_rows(15, MagicNumber::P2, vec![vec![0, 15], vec![7, 3]]).unwrap();
/// let options = EncoderOptions::default().set_comment("saved file");
///
/// let mut out = vec![];
/// GrayscaleEncoder::new_with_options(&image, options).encode(&mut out).unwrap();
/// assert_eq!(out, b"P2\n# saved file\n2 2\n15\n0 15\n7 3\n");
/// ```
pub struct GrayscaleEncoder<'a> {
    image:   &'a GrayscaleImage,
    options: EncoderOptions
}

impl<'a> GrayscaleEncoder<'a> {
    /// Create an encoder for `image` with default options
    pub fn new(image: &'a GrayscaleImage) -> GrayscaleEncoder<'a> {
        GrayscaleEncoder::new_with_options(image, EncoderOptions::default())
    }
    /// Create an encoder for `image` with the specified options
    pub fn new_with_options(image: &'a GrayscaleImage, options: EncoderOptions) -> GrayscaleEncoder<'a> {
        GrayscaleEncoder { image, options }
    }
    /// Encode the image into `sink` returning the number of bytes written
    pub fn encode<T: ZByteWriterTrait>(&self, sink: T) -> Result<usize, ZByteIoError> {
        let (width, height) = self.image.dimensions();
        let magic = self.image.magic_number();

        let header = PnmHeader {
            magic,
            width,
            height,
            max_value: Some(self.image.max_value())
        };
        let mut stream = ZWriter::new(sink);

        match magic.variant() {
            PnmVariant::Ascii => {
                stream.reserve(width * height * 4 + 32)?;
                encode_header(&mut stream, &header, &self.options)?;
                self.encode_ascii(&mut stream)?;
            }
            PnmVariant::Binary => {
                stream.reserve(width * height + 32)?;
                encode_header(&mut stream, &header, &self.options)?;

                for row in self.image.rows() {
                    stream.write_all(row)?;
                }
            }
        }
        let written = stream.bytes_written();
        trace!("Encoded {} graymap, {} bytes", magic, written);

        Ok(written)
    }

    fn encode_ascii<T: ZByteWriterTrait>(&self, stream: &mut ZWriter<T>) -> Result<(), ZByteIoError> {
        let mut line = String::with_capacity(self.image.width() * 4);

        for row in self.image.rows() {
            line.clear();

            for (column, pixel) in row.iter().enumerate() {
                if column != 0 {
                    line.push(' ');
                }
                // writing into a String can't fail
                let _ = write!(line, "{pixel}");
            }
            line.push('\n');
            stream.write_all(line.as_bytes())?;
        }
        Ok(())
    }
}
