/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use netpbm_core::bytestream::ZByteReader;
use netpbm_core::log::Level::Warn;
use netpbm_core::log::{log_enabled, trace, warn};
use netpbm_core::magic::{MagicNumber, PnmVariant};
use netpbm_core::options::DecoderOptions;

use crate::bitmap::BitmapImage;
use crate::errors::FormatError;
use crate::headers::{decode_header, split_tokens, token_to_string, PnmHeader};
use crate::traits::Raster;

/// A portable bitmap decoder
///
/// The decoder handles both the ASCII (`P1`) and the packed binary (`P4`)
/// variants.
///
/// # ASCII rows
/// By default `P1` data is read one line per row. A line with fewer than
/// `width` tokens leaves the rest of its row white and extra tokens on a line
/// are dropped, both are logged at `warn`. Turning on
/// [`strict_mode`](DecoderOptions::set_strict_mode) reads the data as a plain
/// token stream instead, where line breaks don't matter and running short is
/// an error.
///
/// Writers that wrap long rows (netpbm tools break `P1` lines at 70
/// characters) need strict mode, the line reader would treat every
/// continuation line as the next row.
///
/// # Comments
/// A `#` in the pixel data starts a comment running to the end of its line
/// in both modes. Lines holding only a comment or whitespace are not rows.
///
/// # Example
/// ```
/// use netpbm::BitmapDecoder;
/// let mut decoder = BitmapDecoder::new(b"P1\n2 2\n1 0\n0 1\n");
///
/// decoder.decode_headers().unwrap();
/// assert_eq!(decoder.dimensions(), Some((2, 2)));
///
/// let image = decoder.decode().unwrap();
/// assert_eq!(image.pixels(), &[true, false, false, true]);
/// ```
pub struct BitmapDecoder<'a> {
    reader:  ZByteReader<'a>,
    options: DecoderOptions,
    header:  Option<PnmHeader>
}

impl<'a> BitmapDecoder<'a> {
    /// Create a new bitmap decoder with default options
    pub fn new(data: &'a [u8]) -> BitmapDecoder<'a> {
        BitmapDecoder::new_with_options(data, DecoderOptions::default())
    }
    /// Create a new bitmap decoder with the specified options
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> BitmapDecoder<'a> {
        BitmapDecoder {
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
            &BitmapImage::ACCEPTED_MAGIC,
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
    /// Decode the whole image
    pub fn decode(&mut self) -> Result<BitmapImage, FormatError> {
        let header = self.header()?;
        let (width, height) = (header.width, header.height);

        let pixels = match header.magic.variant() {
            PnmVariant::Ascii if self.options.strict_mode() => {
                decode_ascii_tokens(self.reader.remaining_bytes(), width, height)?
            }
            PnmVariant::Ascii => decode_ascii_lines(self.reader.remaining_bytes(), width, height)?,
            PnmVariant::Binary => decode_packed(&mut self.reader, width, height)?
        };
        BitmapImage::from_pixels(width, height, header.magic, pixels)
    }
}

/// One row per non-blank line, short rows padded with white
fn decode_ascii_lines(data: &[u8], width: usize, height: usize) -> Result<Vec<bool>, FormatError> {
    let mut lines = data.split(|x| *x == b'\n').filter(|line| {
        match line.iter().copied().find(|x| !x.is_ascii_whitespace()) {
            Some(b'#') => {
                trace!("Skipped comment line in pixel data");
                false
            }
            Some(_) => true,
            None => false
        }
    });

    let mut pixels = Vec::new();

    for row in 0..height {
        let line = lines
            .next()
            .ok_or(FormatError::UnexpectedEndOfData { row })?;

        let start = pixels.len();
        pixels.resize(start + width, false);

        let mut tokens = split_tokens(line);
        let mut found = 0;

        for (column, (pixel, token)) in pixels[start..].iter_mut().zip(&mut tokens).enumerate() {
            *pixel = bit_from_token(token, row, column)?;
            found += 1;
        }
        if found < width {
            warn!(
                "Row {} has {} of {} pixels, padding the rest with white",
                row, found, width
            );
        }
        if log_enabled!(Warn) {
            let extra = tokens.count();

            if extra > 0 {
                warn!("Row {} has {} tokens past the image width, ignoring them", row, extra);
            }
        }
    }
    Ok(pixels)
}

/// Whitespace separated tokens, line breaks carry no meaning
fn decode_ascii_tokens(data: &[u8], width: usize, height: usize) -> Result<Vec<bool>, FormatError> {
    let size = width * height;
    // every token needs at least one byte, don't trust the header beyond that
    let mut pixels = Vec::with_capacity(size.min(data.len()));
    let mut tokens = split_tokens(data);

    for index in 0..size {
        let (row, column) = (index / width, index % width);

        let token = tokens
            .next()
            .ok_or(FormatError::UnexpectedEndOfData { row })?;

        pixels.push(bit_from_token(token, row, column)?);
    }
    Ok(pixels)
}

/// Rows of `ceil(width / 8)` bytes, most significant bit first
fn decode_packed(reader: &mut ZByteReader, width: usize, height: usize) -> Result<Vec<bool>, FormatError> {
    let row_bytes = width.div_ceil(8);
    let available_rows = reader.remaining() / row_bytes;

    if available_rows < height {
        return Err(FormatError::UnexpectedEndOfData {
            row: available_rows
        });
    }
    let mut pixels = vec![false; width * height];

    for (row, out_row) in pixels.chunks_exact_mut(width).enumerate() {
        let packed = reader
            .get_as_ref(row_bytes)
            .map_err(|_| FormatError::UnexpectedEndOfData { row })?;

        for (column, pixel) in out_row.iter_mut().enumerate() {
            *pixel = packed[column / 8] & (0x80 >> (column % 8)) != 0;
        }
    }
    if !reader.eof() {
        trace!("Ignoring {} bytes after pixel data", reader.remaining());
    }
    Ok(pixels)
}

fn bit_from_token(token: &[u8], row: usize, column: usize) -> Result<bool, FormatError> {
    match token {
        b"0" => Ok(false),
        b"1" => Ok(true),
        _ => Err(FormatError::InvalidPixelToken {
            row,
            column,
            token: token_to_string(token)
        })
    }
}
