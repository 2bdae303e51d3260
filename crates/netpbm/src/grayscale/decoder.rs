/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use netpbm_core::bytestream::ZByteReader;
use netpbm_core::log::trace;
use netpbm_core::magic::{MagicNumber, PnmVariant};
use netpbm_core::options::DecoderOptions;

use crate::errors::FormatError;
use crate::grayscale::GrayscaleImage;
use crate::headers::{decode_header, parse_decimal, split_tokens, token_to_string, PnmHeader};
use crate::traits::Raster;

/// A portable graymap decoder
///
/// The decoder handles both the ASCII (`P2`) and the raw binary (`P5`)
/// variants with max values up to 255. Pixels brighter than the declared
/// max value are rejected with [`FormatError::PixelExceedsMaxValue`] in both
/// variants.
///
/// `P2` data is a plain token stream, line breaks carry no meaning and a `#`
/// starts a comment running to the end of its line.
///
/// # Example
/// ```
/// use netpbm::{FormatError, GrayscaleDecoder};
///
/// // three pixels per row, two rows, but only five pixels
/// let mut decoder = GrayscaleDecoder::new(b"P2\n3 2\n255\n0 1 2\n3 4\n");
/// assert_eq!(
///     decoder.decode().unwrap_err(),
///     FormatError::UnexpectedEndOfData { row: 1 }
/// );
/// ```
pub struct GrayscaleDecoder<'a> {
    reader:  ZByteReader<'a>,
    options: DecoderOptions,
    header:  Option<PnmHeader>
}

impl<'a> GrayscaleDecoder<'a> {
    /// Create a new graymap decoder with default options
    pub fn new(data: &'a [u8]) -> GrayscaleDecoder<'a> {
        GrayscaleDecoder::new_with_options(data, DecoderOptions::default())
    }
    /// Create a new graymap decoder with the specified options
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> GrayscaleDecoder<'a> {
        GrayscaleDecoder {
            reader: ZByteReader::new(data),
            options,
            header: None
        }
    }
    /// Read the header and store it in internal state
    ///
    /// Calling this more than once does nothing.
    pub fn decode_headers(&mut self) -> Result<(), FormatError> {
        self.header().map(|_| ())
    }
    fn header(&mut self) -> Result<PnmHeader, FormatError> {
        if let Some(header) = self.header {
            return Ok(header);
        }
        let header = decode_header(
            &mut self.reader,
            &GrayscaleImage::ACCEPTED_MAGIC,
            &self.options
        )?;
        self.header = Some(header);

        Ok(header)
    }
    /// Return image dimensions or none if headers aren't decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header.map(|header| (header.width, header.height))
    }
    /// Return the magic number or none if headers aren't decoded
    pub fn magic_number(&self) -> Option<MagicNumber> {
        self.header.map(|header| header.magic)
    }
    /// Return the max value or none if headers aren't decoded
    pub fn max_value(&self) -> Option<u8> {
        self.header.and_then(|header| header.max_value)
    }
    /// Decode the whole image
    pub fn decode(&mut self) -> Result<GrayscaleImage, FormatError> {
        let header = self.header()?;

        let max_value = header
            .max_value
            .ok_or_else(|| FormatError::InvalidMaxValue("missing max value".to_string()))?;

        let (width, height) = (header.width, header.height);

        let pixels = match header.magic.variant() {
            PnmVariant::Ascii => {
                decode_ascii(self.reader.remaining_bytes(), width, height, max_value)?
            }
            PnmVariant::Binary => decode_raw(&mut self.reader, width, height, max_value)?
        };
        GrayscaleImage::from_pixels(width, height, max_value, header.magic, pixels)
    }
}

/// Whitespace separated decimal tokens
fn decode_ascii(
    data: &[u8], width: usize, height: usize, max_value: u8
) -> Result<Vec<u8>, FormatError> {
    let size = width * height;
    // every token needs at least one byte, don't trust the header beyond that
    let mut pixels = Vec::with_capacity(size.min(data.len()));
    let mut tokens = split_tokens(data);

    for index in 0..size {
        let (row, column) = (index / width, index % width);

        let token = tokens
            .next()
            .ok_or(FormatError::UnexpectedEndOfData { row })?;

        let value = parse_decimal(token).ok_or_else(|| FormatError::InvalidPixelToken {
            row,
            column,
            token: token_to_string(token)
        })?;

        pixels.push(check_pixel(value, row, column, max_value)?);
    }
    Ok(pixels)
}

/// `width` raw bytes per row
fn decode_raw(
    reader: &mut ZByteReader, width: usize, height: usize, max_value: u8
) -> Result<Vec<u8>, FormatError> {
    let available_rows = reader.remaining() / width;

    if available_rows < height {
        return Err(FormatError::UnexpectedEndOfData {
            row: available_rows
        });
    }
    let mut pixels = vec![0; width * height];

    for (row, out_row) in pixels.chunks_exact_mut(width).enumerate() {
        let raw = reader
            .get_as_ref(width)
            .map_err(|_| FormatError::UnexpectedEndOfData { row })?;

        for (column, (pixel, byte)) in out_row.iter_mut().zip(raw).enumerate() {
            *pixel = check_pixel(usize::from(*byte), row, column, max_value)?;
        }
    }
    if !reader.eof() {
        trace!("Ignoring {} bytes after pixel data", reader.remaining());
    }
    Ok(pixels)
}

fn check_pixel(value: usize, row: usize, column: usize, max_value: u8) -> Result<u8, FormatError> {
    if value > usize::from(max_value) {
        return Err(FormatError::PixelExceedsMaxValue {
            row,
            column,
            value,
            max_value
        });
    }
    // value <= max_value <= 255
    Ok(value as u8)
}
