/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The capability shared by every netpbm image type
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use netpbm_core::bytestream::{ZByteIoError, ZByteWriterTrait};
use netpbm_core::log::trace;
use netpbm_core::magic::{MagicNumber, PnmVariant};
use netpbm_core::options::{DecoderOptions, EncoderOptions};

use crate::errors::{ConfigError, FormatError, PnmErrors};

/// A decodable, encodable and transformable raster
///
/// Implemented by [`BitmapImage`](crate::BitmapImage) and
/// [`GrayscaleImage`](crate::GrayscaleImage) so code can be written once
/// for both.
///
/// # Pixel access
/// Coordinates outside `[0, width) x [0, height)` are not errors,
/// [`at`](Self::at) returns the zero pixel and [`set`](Self::set) does
/// nothing. Malformed files on the other hand always fail decoding.
///
/// # Example
/// ```
/// use netpbm::{BitmapImage, Raster};
///
/// fn mirror_twice<R: Raster>(image: &mut R) {
///     image.flip();
///     image.flip();
/// }
/// let mut image = BitmapImage::decode(b"P1\n2 2\n1 0\n0 1\n").unwrap();
/// mirror_twice(&mut image);
/// assert!(image.at(0, 0));
/// assert!(!image.at(-1, 0));
/// ```
pub trait Raster: Sized {
    /// The in-memory value of one pixel
    type Pixel: Copy + Default + PartialEq;

    /// Magic numbers this type decodes
    const ACCEPTED_MAGIC: [MagicNumber; 2];

    /// Decode an image held in memory with custom options
    fn decode_with_options(data: &[u8], options: DecoderOptions) -> Result<Self, FormatError>;

    /// Write the image into `sink` in the encoding of its current magic number
    ///
    /// Returns the number of bytes written.
    fn encode_with_options<T: ZByteWriterTrait>(
        &self, sink: T, options: &EncoderOptions
    ) -> Result<usize, ZByteIoError>;

    /// Width and height of the image
    fn dimensions(&self) -> (usize, usize);

    /// Magic number the image will be encoded with
    fn magic_number(&self) -> MagicNumber;

    /// Switch between the ASCII and binary magic numbers of this image's depth
    ///
    /// # Errors
    /// [`ConfigError::IncompatibleVariant`] for a magic number of another
    /// depth, the image is left unchanged.
    fn set_variant(&mut self, target: MagicNumber) -> Result<(), ConfigError>;

    /// Pixel at column `x`, row `y`, or the zero pixel when out of bounds
    fn at(&self, x: isize, y: isize) -> Self::Pixel;

    /// Set the pixel at column `x`, row `y`, ignored when out of bounds
    fn set(&mut self, x: isize, y: isize, value: Self::Pixel);

    /// Invert every pixel, applying it twice restores the image
    fn invert(&mut self);

    /// Mirror every row horizontally, applying it twice restores the image
    fn flip(&mut self);

    /// Rotate the image 90 degrees clockwise, swapping width and height
    fn rotate90cw(&mut self);

    /// Decode an image held in memory with the default options
    fn decode(data: &[u8]) -> Result<Self, FormatError> {
        Self::decode_with_options(data, DecoderOptions::default())
    }

    /// Read and decode an image file
    fn open<P: AsRef<Path>>(path: P) -> Result<Self, PnmErrors> {
        Self::open_with_options(path, DecoderOptions::default())
    }

    /// Read and decode an image file with custom options
    fn open_with_options<P: AsRef<Path>>(
        path: P, options: DecoderOptions
    ) -> Result<Self, PnmErrors> {
        let data = std::fs::read(path.as_ref())?;
        trace!("Read {} bytes from {:?}", data.len(), path.as_ref());

        Ok(Self::decode_with_options(&data, options)?)
    }

    /// Write the image into `sink` without a comment
    fn encode<T: ZByteWriterTrait>(&self, sink: T) -> Result<usize, ZByteIoError> {
        self.encode_with_options(sink, &EncoderOptions::default())
    }

    /// Encode the image into a file, creating or truncating it
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PnmErrors> {
        self.save_with_options(path, &EncoderOptions::default())
    }

    /// Encode the image into a file with custom options
    fn save_with_options<P: AsRef<Path>>(
        &self, path: P, options: &EncoderOptions
    ) -> Result<(), PnmErrors> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);

        let written = self.encode_with_options(&mut writer, options)?;
        writer.flush_bytes()?;

        trace!("Saved {} bytes to {:?}", written, path.as_ref());
        Ok(())
    }

    /// Image width in pixels
    fn width(&self) -> usize {
        self.dimensions().0
    }

    /// Image height in pixels
    fn height(&self) -> usize {
        self.dimensions().1
    }

    /// ASCII or binary encoding of the current magic number
    fn variant(&self) -> PnmVariant {
        self.magic_number().variant()
    }
}
