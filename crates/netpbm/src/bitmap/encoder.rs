/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use netpbm_core::bytestream::{ZByteIoError, ZByteWriterTrait, ZWriter};
use netpbm_core::log::trace;
use netpbm_core::magic::PnmVariant;
use netpbm_core::options::EncoderOptions;

use crate::bitmap::BitmapImage;
use crate::headers::{encode_header, PnmHeader};
use crate::traits::Raster;

/// A portable bitmap encoder
///
/// The encoding follows the image's current magic number, `P1` writes `0` and
/// `1` tokens separated by single spaces with one line per row, `P4` packs
/// eight pixels per byte with each row starting on a fresh byte.
///
/// # Example
/// ```
/// use netpbm::{BitmapEncoder, BitmapImage, Raster};
/// use netpbm::netpbm_core::magic::MagicNumber;
///
/// let image = BitmapImage::from_rows(MagicNumber::P1, vec![vec![true, false, true]]).unwrap();
/// let mut out = vec![];
/// BitmapEncoder::new(&image).encode(&mut out).unwrap();
/// assert_eq!(out, b"P1\n3 1\n1 0 1\n");
/// ```
pub struct BitmapEncoder<'a> {
    image:   &'a BitmapImage,
    options: EncoderOptions
}

impl<'a> BitmapEncoder<'a> {
    /// Create an encoder for `image` with default options
    pub fn new(image: &'a BitmapImage) -> BitmapEncoder<'a> {
        BitmapEncoder::new_with_options(image, EncoderOptions::default())
    }
    /// Create an encoder for `image` with the specified options
    pub fn new_with_options(image: &'a BitmapImage, options: EncoderOptions) -> BitmapEncoder<'a> {
        BitmapEncoder { image, options }
    }
    /// Encode the image into `sink` returning the number of bytes written
    pub fn encode<T: ZByteWriterTrait>(&self, sink: T) -> Result<usize, ZByteIoError> {
        let (width, height) = self.image.dimensions();
        let magic = self.image.magic_number();

        let header = PnmHeader {
            magic,
            width,
            height,
            max_value: None
        };
        let mut stream = ZWriter::new(sink);

        match magic.variant() {
            PnmVariant::Ascii => {
                stream.reserve(width * height * 2 + 32)?;
                encode_header(&mut stream, &header, &self.options)?;
                self.encode_ascii(&mut stream)?;
            }
            PnmVariant::Binary => {
                stream.reserve(width.div_ceil(8) * height + 32)?;
                encode_header(&mut stream, &header, &self.options)?;
                self.encode_packed(&mut stream)?;
            }
        }
        let written = stream.bytes_written();
        trace!("Encoded {} bitmap, {} bytes", magic, written);

        Ok(written)
    }

    fn encode_ascii<T: ZByteWriterTrait>(&self, stream: &mut ZWriter<T>) -> Result<(), ZByteIoError> {
        let mut line = Vec::with_capacity(self.image.width() * 2);

        for row in self.image.rows() {
            line.clear();

            for (column, pixel) in row.iter().enumerate() {
                if column != 0 {
                    line.push(b' ');
                }
                line.push(if *pixel { b'1' } else { b'0' });
            }
            line.push(b'\n');
            stream.write_all(&line)?;
        }
        Ok(())
    }

    fn encode_packed<T: ZByteWriterTrait>(&self, stream: &mut ZWriter<T>) -> Result<(), ZByteIoError> {
        let mut packed = vec![0_u8; self.image.width().div_ceil(8)];

        for row in self.image.rows() {
            // padding bits past the last pixel stay zero
            packed.fill(0);

            for (column, pixel) in row.iter().enumerate() {
                if *pixel {
                    packed[column / 8] |= 0x80 >> (column % 8);
                }
            }
            stream.write_all(&packed)?;
        }
        Ok(())
    }
}
