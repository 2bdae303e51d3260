/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Portable bitmaps, one bit per pixel
//!
//! `true` is black, matching the `1` of the file format.
use core::slice::ChunksExact;

use netpbm_core::bytestream::{ZByteIoError, ZByteWriterTrait};
use netpbm_core::magic::{MagicNumber, PixelDepth};
use netpbm_core::options::{DecoderOptions, EncoderOptions};

pub use crate::bitmap::decoder::BitmapDecoder;
pub use crate::bitmap::encoder::BitmapEncoder;
use crate::errors::{ConfigError, FormatError};
use crate::ops;
use crate::traits::Raster;

mod decoder;
mod encoder;

/// A black and white image decoded from `P1` or `P4`
///
/// Pixels are stored row-major, `pixels.len() == width * height` always holds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BitmapImage {
    width:  usize,
    height: usize,
    magic:  MagicNumber,
    pixels: Vec<bool>
}

impl BitmapImage {
    /// Create an all white image
    ///
    /// # Errors
    /// `InvalidDimensions` if either dimension is zero, `UnsupportedMagic`
    /// if `magic` is not a bitmap magic number.
    pub fn new(width: usize, height: usize, magic: MagicNumber) -> Result<BitmapImage, FormatError> {
        check_magic(magic)?;
        let size = ops::checked_size(width, height)?;
        BitmapImage::from_pixels(width, height, magic, vec![false; size])
    }
    /// Create an image from row-major pixels
    ///
    /// # Errors
    /// `InvalidDimensions` if `pixels` does not hold exactly `width * height`
    /// values or a dimension is zero.
    pub fn from_pixels(
        width: usize, height: usize, magic: MagicNumber, pixels: Vec<bool>
    ) -> Result<BitmapImage, FormatError> {
        check_magic(magic)?;
        let size = ops::checked_size(width, height)?;

        if pixels.len() != size {
            return Err(FormatError::InvalidDimensions(format!(
                "{width}x{height} image needs {size} pixels, found {}",
                pixels.len()
            )));
        }
        Ok(BitmapImage {
            width,
            height,
            magic,
            pixels
        })
    }
    /// Create an image from a grid of rows
    ///
    /// # Example
    /// ```
    /// use netpbm::{BitmapImage, Raster};
    /// use netpbm::netpbm_core::magic::MagicNumber;
    ///
    /// let image = BitmapImage::from_rows(
    ///     MagicNumber::P1,
    ///     vec![vec![true, false], vec![false, true]]
    /// ).unwrap();
    /// assert_eq!(image.dimensions(), (2, 2));
    /// assert!(BitmapImage::from_rows(MagicNumber::P1, vec![vec![true], vec![]]).is_err());
    /// ```
    pub fn from_rows(magic: MagicNumber, rows: Vec<Vec<bool>>) -> Result<BitmapImage, FormatError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if rows.iter().any(|row| row.len() != width) {
            return Err(FormatError::InvalidDimensions(
                "rows differ in length".to_string()
            ));
        }
        BitmapImage::from_pixels(width, height, magic, rows.concat())
    }
    /// Wrap pixels whose shape was already checked
    pub(crate) fn from_shape(
        width: usize, height: usize, magic: MagicNumber, pixels: Vec<bool>
    ) -> BitmapImage {
        debug_assert_eq!(pixels.len(), width * height);

        BitmapImage {
            width,
            height,
            magic,
            pixels
        }
    }
    /// Row-major pixels
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }
    /// Iterate over the rows of the image, top to bottom
    pub fn rows(&self) -> ChunksExact<'_, bool> {
        self.pixels.chunks_exact(self.width)
    }
}

impl Raster for BitmapImage {
    type Pixel = bool;

    const ACCEPTED_MAGIC: [MagicNumber; 2] = [MagicNumber::P1, MagicNumber::P4];

    fn decode_with_options(data: &[u8], options: DecoderOptions) -> Result<Self, FormatError> {
        BitmapDecoder::new_with_options(data, options).decode()
    }

    fn encode_with_options<T: ZByteWriterTrait>(
        &self, sink: T, options: &EncoderOptions
    ) -> Result<usize, ZByteIoError> {
        BitmapEncoder::new_with_options(self, options.clone()).encode(sink)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn magic_number(&self) -> MagicNumber {
        self.magic
    }

    fn set_variant(&mut self, target: MagicNumber) -> Result<(), ConfigError> {
        if !target.same_depth(self.magic) {
            return Err(ConfigError::IncompatibleVariant {
                requested: target,
                current:   self.magic
            });
        }
        self.magic = target;
        Ok(())
    }

    fn at(&self, x: isize, y: isize) -> bool {
        ops::pixel_index(x, y, self.width, self.height)
            .map(|index| self.pixels[index])
            .unwrap_or_default()
    }

    fn set(&mut self, x: isize, y: isize, value: bool) {
        if let Some(index) = ops::pixel_index(x, y, self.width, self.height) {
            self.pixels[index] = value;
        }
    }

    fn invert(&mut self) {
        ops::invert_bits(&mut self.pixels);
    }

    fn flip(&mut self) {
        ops::flop(&mut self.pixels, self.width);
    }

    fn rotate90cw(&mut self) {
        let mut rotated = vec![false; self.pixels.len()];
        ops::rotate_90(&self.pixels, &mut rotated, self.width, self.height);

        self.pixels = rotated;
        core::mem::swap(&mut self.width, &mut self.height);
    }
}

fn check_magic(magic: MagicNumber) -> Result<(), FormatError> {
    if magic.depth() == PixelDepth::OneBit {
        Ok(())
    } else {
        Err(FormatError::UnsupportedMagic(magic.to_string()))
    }
}
