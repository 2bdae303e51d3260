/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Portable graymaps, eight bits per pixel bounded by a max value
use core::slice::ChunksExact;

use netpbm_core::bytestream::{ZByteIoError, ZByteWriterTrait};
use netpbm_core::log::trace;
use netpbm_core::magic::{MagicNumber, PixelDepth};
use netpbm_core::options::{DecoderOptions, EncoderOptions};

use crate::bitmap::BitmapImage;
use crate::errors::{ConfigError, FormatError};
pub use crate::grayscale::decoder::GrayscaleDecoder;
pub use crate::grayscale::encoder::GrayscaleEncoder;
use crate::ops;
use crate::traits::Raster;

mod decoder;
mod encoder;

/// A grayscale image decoded from `P2` or `P5`
///
/// Pixels are stored row-major and never exceed `max_value`, every
/// mutator keeps it that way.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrayscaleImage {
    width:     usize,
    height:    usize,
    magic:     MagicNumber,
    max_value: u8,
    pixels:    Vec<u8>
}

impl GrayscaleImage {
    /// Create an all black image
    ///
    /// # Errors
    /// `InvalidDimensions` if either dimension is zero, `InvalidMaxValue` for a
    /// zero `max_value` and `UnsupportedMagic` if `magic` is not a grayscale
    /// magic number.
    pub fn new(
        width: usize, height: usize, max_value: u8, magic: MagicNumber
    ) -> Result<GrayscaleImage, FormatError> {
        check_magic(magic)?;
        let size = ops::checked_size(width, height)?;
        GrayscaleImage::from_pixels(width, height, max_value, magic, vec![0; size])
    }
    /// Create an image from row-major pixels
    ///
    /// # Errors
    /// Besides the errors of [`new`](Self::new), `InvalidDimensions` when
    /// `pixels` is not `width * height` long and `PixelExceedsMaxValue` for the
    /// first pixel above `max_value`.
    pub fn from_pixels(
        width: usize, height: usize, max_value: u8, magic: MagicNumber, pixels: Vec<u8>
    ) -> Result<GrayscaleImage, FormatError> {
        check_magic(magic)?;
        let size = ops::checked_size(width, height)?;

        if max_value == 0 {
            return Err(FormatError::InvalidMaxValue(
                "max value must be at least 1".to_string()
            ));
        }
        if pixels.len() != size {
            return Err(FormatError::InvalidDimensions(format!(
                "{width}x{height} image needs {size} pixels, found {}",
                pixels.len()
            )));
        }
        if let Some(index) = pixels.iter().position(|x| *x > max_value) {
            return Err(FormatError::PixelExceedsMaxValue {
                row:    index / width,
                column: index % width,
                value:  usize::from(pixels[index]),
                max_value
            });
        }
        Ok(GrayscaleImage {
            width,
            height,
            magic,
            max_value,
            pixels
        })
    }
    /// Create an image from a grid of rows
    pub fn from_rows(
        max_value: u8, magic: MagicNumber, rows: Vec<Vec<u8>>
    ) -> Result<GrayscaleImage, FormatError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if rows.iter().any(|row| row.len() != width) {
            return Err(FormatError::InvalidDimensions(
                "rows differ in length".to_string()
            ));
        }
        GrayscaleImage::from_pixels(width, height, max_value, magic, rows.concat())
    }
    /// Row-major pixels
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
    /// Iterate over the rows of the image, top to bottom
    pub fn rows(&self) -> ChunksExact<'_, u8> {
        self.pixels.chunks_exact(self.width)
    }
    /// The brightest value a pixel may hold
    pub const fn max_value(&self) -> u8 {
        self.max_value
    }
    /// Change the max value, rescaling every pixel to the new range
    ///
    /// Each pixel `v` becomes `round(v * new_max / old_max)` with halves
    /// rounded up, so relative brightness is kept and no pixel ends up above
    /// the new ceiling.
    ///
    /// # Errors
    /// [`ConfigError::InvalidMaxValue`] for zero, the image is left unchanged.
    ///
    /// # Example
    /// ```
    /// use netpbm::GrayscaleImage;
    /// use netpbm::netpbm_core::magic::MagicNumber;
    ///
    /// let mut image = GrayscaleImage::from_rows(4, MagicNumber::P2, vec![vec![0, 1, 2, 4]]).unwrap();
    /// image.set_max_value(2).unwrap();
    /// assert_eq!(image.pixels(), &[0, 1, 1, 2]);
    /// ```
    pub fn set_max_value(&mut self, new_max: u8) -> Result<(), ConfigError> {
        if new_max == 0 {
            return Err(ConfigError::InvalidMaxValue(new_max));
        }
        trace!("Rescaling from max value {} to {}", self.max_value, new_max);

        ops::rescale(&mut self.pixels, self.max_value, new_max);
        self.max_value = new_max;

        Ok(())
    }
    /// Threshold the image into a bitmap
    ///
    /// A pixel becomes black (`true`) when it is at least `max_value / 2`
    /// (integer division). With a max value of 1 the threshold is 1, so a
    /// zero pixel always stays white. The bitmap keeps the dimensions and
    /// the ASCII/binary variant of this image.
    ///
    /// # Example
    /// ```
    /// use netpbm::{GrayscaleImage, Raster};
    /// use netpbm::netpbm_core::magic::MagicNumber;
    ///
    /// let image = GrayscaleImage::from_rows(255, MagicNumber::P5, vec![vec![0, 127, 128, 255]]).unwrap();
    /// let bitmap = image.to_bitmap();
    /// assert_eq!(bitmap.magic_number(), MagicNumber::P4);
    /// assert_eq!(bitmap.pixels(), &[false, true, true, true]);
    /// ```
    pub fn to_bitmap(&self) -> BitmapImage {
        let mut pixels = vec![false; self.pixels.len()];
        ops::threshold(&self.pixels, &mut pixels, (self.max_value / 2).max(1));

        let magic = MagicNumber::from_parts(PixelDepth::OneBit, self.magic.variant());

        BitmapImage::from_shape(self.width, self.height, magic, pixels)
    }
}

impl Raster for GrayscaleImage {
    type Pixel = u8;

    const ACCEPTED_MAGIC: [MagicNumber; 2] = [MagicNumber::P2, MagicNumber::P5];

    fn decode_with_options(data: &[u8], options: DecoderOptions) -> Result<Self, FormatError> {
        GrayscaleDecoder::new_with_options(data, options).decode()
    }

    fn encode_with_options<T: ZByteWriterTrait>(
        &self, sink: T, options: &EncoderOptions
    ) -> Result<usize, ZByteIoError> {
        GrayscaleEncoder::new_with_options(self, options.clone()).encode(sink)
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

    fn at(&self, x: isize, y: isize) -> u8 {
        ops::pixel_index(x, y, self.width, self.height)
            .map(|index| self.pixels[index])
            .unwrap_or_default()
    }

    /// Set a pixel, values above `max_value` are clamped to it
    fn set(&mut self, x: isize, y: isize, value: u8) {
        if let Some(index) = ops::pixel_index(x, y, self.width, self.height) {
            self.pixels[index] = value.min(self.max_value);
        }
    }

    fn invert(&mut self) {
        ops::invert_gray(&mut self.pixels, self.max_value);
    }

    fn flip(&mut self) {
        ops::flop(&mut self.pixels, self.width);
    }

    fn rotate90cw(&mut self) {
        let mut rotated = vec![0; self.pixels.len()];
        ops::rotate_90(&self.pixels, &mut rotated, self.width, self.height);

        self.pixels = rotated;
        core::mem::swap(&mut self.width, &mut self.height);
    }
}

fn check_magic(magic: MagicNumber) -> Result<(), FormatError> {
    if magic.depth() == PixelDepth::EightBit {
        Ok(())
    } else {
        Err(FormatError::UnsupportedMagic(magic.to_string()))
    }
}
