/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding without knowing the image type up front
use netpbm_core::bytestream::ZByteReader;
use netpbm_core::log::trace;
use netpbm_core::magic::{MagicNumber, PixelDepth};
use netpbm_core::options::DecoderOptions;

use crate::bitmap::BitmapImage;
use crate::errors::FormatError;
use crate::grayscale::GrayscaleImage;
use crate::headers::{get_bytes_until_whitespace, token_to_string};
use crate::traits::Raster;

/// An image of either supported depth
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodedImage {
    Bitmap(BitmapImage),
    Grayscale(GrayscaleImage)
}

impl DecodedImage {
    /// Return the bitmap if this is one
    pub fn bitmap(self) -> Option<BitmapImage> {
        match self {
            DecodedImage::Bitmap(image) => Some(image),
            DecodedImage::Grayscale(_) => None
        }
    }
    /// Return the graymap if this is one
    pub fn grayscale(self) -> Option<GrayscaleImage> {
        match self {
            DecodedImage::Grayscale(image) => Some(image),
            DecodedImage::Bitmap(_) => None
        }
    }
    /// Magic number the image will be encoded with
    pub fn magic_number(&self) -> MagicNumber {
        match self {
            DecodedImage::Bitmap(image) => image.magic_number(),
            DecodedImage::Grayscale(image) => image.magic_number()
        }
    }
}

/// Identify the magic number at the start of `data`
///
/// # Errors
/// - `UnsupportedVariant` for the color and arbitrary map netpbm formats
///   (`P3`, `P6`, `P7`)
/// - `UnsupportedMagic` for anything else that isn't `P1`, `P2`, `P4` or `P5`
///
/// # Example
/// ```
/// use netpbm::{guess_format, FormatError};
/// use netpbm::netpbm_core::magic::MagicNumber;
///
/// assert_eq!(guess_format(b"P5\n1 1\n255\n\x00"), Ok(MagicNumber::P5));
/// assert!(matches!(guess_format(b"P6\n"), Err(FormatError::UnsupportedVariant(_))));
/// assert!(matches!(guess_format(b"GIF89a"), Err(FormatError::UnsupportedMagic(_))));
/// ```
pub fn guess_format(data: &[u8]) -> Result<MagicNumber, FormatError> {
    let mut reader = ZByteReader::new(data);
    let token = get_bytes_until_whitespace(&mut reader);

    if let Some(magic) = MagicNumber::from_token(token) {
        trace!("Guessed format {}", magic);
        return Ok(magic);
    }
    match token {
        b"P3" | b"P6" | b"P7" => Err(FormatError::UnsupportedVariant(token_to_string(token))),
        _ => Err(FormatError::UnsupportedMagic(token_to_string(token)))
    }
}

/// Decode a bitmap or graymap, whichever `data` holds
pub fn decode_any(data: &[u8]) -> Result<DecodedImage, FormatError> {
    decode_any_with_options(data, DecoderOptions::default())
}

/// Decode a bitmap or graymap with custom options
pub fn decode_any_with_options(
    data: &[u8], options: DecoderOptions
) -> Result<DecodedImage, FormatError> {
    match guess_format(data)?.depth() {
        PixelDepth::OneBit => {
            BitmapImage::decode_with_options(data, options).map(DecodedImage::Bitmap)
        }
        PixelDepth::EightBit => {
            GrayscaleImage::decode_with_options(data, options).map(DecodedImage::Grayscale)
        }
    }
}
