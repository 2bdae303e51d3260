/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Netpbm header parsing shared by the bitmap and grayscale decoders
//!
//! ```text
//! <magic> [#comment]* <width> <height> [<max value>] <one whitespace byte> <pixels>
//! ```
//! Any run of whitespace separates header tokens and a `#` starts a comment
//! running to the end of its line.
use netpbm_core::bytestream::{ZByteIoError, ZByteReader, ZByteWriterTrait, ZWriter};
use netpbm_core::log::{info, trace};
use netpbm_core::magic::{MagicNumber, PixelDepth};
use netpbm_core::options::{DecoderOptions, EncoderOptions};

use crate::errors::FormatError;

/// Longest slice of an offending token kept in error messages
const MAX_TOKEN_IN_ERROR: usize = 32;

/// Everything found before the pixel data
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct PnmHeader {
    pub(crate) magic:     MagicNumber,
    pub(crate) width:     usize,
    pub(crate) height:    usize,
    /// Present for grayscale images only
    pub(crate) max_value: Option<u8>
}

/// Parse a header leaving `reader` at the first byte of pixel data
///
/// The magic number must be one of `accepted`.
pub(crate) fn decode_header(
    reader: &mut ZByteReader, accepted: &[MagicNumber], options: &DecoderOptions
) -> Result<PnmHeader, FormatError> {
    let magic = read_magic(reader, accepted)?;
    trace!("Magic number: {}", magic);

    let width = read_dimension(reader, "width")?;
    let height = read_dimension(reader, "height")?;

    if width > options.max_width() {
        return Err(FormatError::TooLargeDimensions {
            dimension: "width",
            max:       options.max_width(),
            found:     width
        });
    }
    if height > options.max_height() {
        return Err(FormatError::TooLargeDimensions {
            dimension: "height",
            max:       options.max_height(),
            found:     height
        });
    }
    if width.checked_mul(height).is_none() {
        return Err(FormatError::InvalidDimensions(format!(
            "{width}x{height} image is too large to address"
        )));
    }
    info!("Width: {}, height: {}", width, height);

    let max_value = match magic.depth() {
        PixelDepth::EightBit => {
            let max_value = read_max_value(reader)?;
            info!("Max value: {}", max_value);
            Some(max_value)
        }
        PixelDepth::OneBit => None
    };

    end_header(reader);

    Ok(PnmHeader {
        magic,
        width,
        height,
        max_value
    })
}

fn read_magic(reader: &mut ZByteReader, accepted: &[MagicNumber]) -> Result<MagicNumber, FormatError> {
    let token = get_bytes_until_whitespace(reader);

    match MagicNumber::from_token(token) {
        Some(magic) if accepted.contains(&magic) => Ok(magic),
        _ => Err(FormatError::UnsupportedMagic(token_to_string(token)))
    }
}

fn read_dimension(reader: &mut ZByteReader, name: &'static str) -> Result<usize, FormatError> {
    skip_spaces(reader);

    if reader.eof() {
        return Err(FormatError::InvalidDimensions(format!("missing {name}")));
    }
    let token = get_bytes_until_whitespace(reader);

    match parse_decimal(token) {
        Some(value) if value > 0 => Ok(value),
        _ => Err(FormatError::InvalidDimensions(format!(
            "{name} `{}` is not a positive integer",
            token_to_string(token)
        )))
    }
}

fn read_max_value(reader: &mut ZByteReader) -> Result<u8, FormatError> {
    skip_spaces(reader);

    if reader.eof() {
        return Err(FormatError::InvalidMaxValue("missing max value".to_string()));
    }
    let token = get_bytes_until_whitespace(reader);

    match parse_decimal(token) {
        Some(value @ 1..=255) => Ok(value as u8),
        _ => Err(FormatError::InvalidMaxValue(format!(
            "`{}` is not an integer in 1..=255",
            token_to_string(token)
        )))
    }
}

/// Step over the single separator between the header and the pixels
///
/// Only one byte is consumed, binary pixel data may itself start with
/// a byte that looks like whitespace.
fn end_header(reader: &mut ZByteReader) {
    match reader.peek_u8() {
        Some(byte) if byte.is_ascii_whitespace() => reader.skip(1),
        Some(b'#') => skip_comment(reader),
        _ => ()
    }
}

/// Skip all whitespace characters and comments
/// until one hits a character that isn't a space or
/// we reach eof
pub(crate) fn skip_spaces(reader: &mut ZByteReader) {
    while let Some(byte) = reader.peek_u8() {
        if byte == b'#' {
            skip_comment(reader);
        } else if byte.is_ascii_whitespace() {
            reader.skip(1);
        } else {
            break;
        }
    }
}

/// Skip a comment up to and including its newline
fn skip_comment(reader: &mut ZByteReader) {
    let start = reader.position();

    while !reader.eof() {
        if reader.get_u8() == b'\n' {
            break;
        }
    }
    trace!("Skipped a {} byte comment", reader.position() - start);
}

/// Return the bytes up to the next whitespace or comment
///
/// The terminating byte is not consumed.
pub(crate) fn get_bytes_until_whitespace<'a>(reader: &mut ZByteReader<'a>) -> &'a [u8] {
    let rest = reader.remaining_bytes();
    let end = rest
        .iter()
        .position(|x| x.is_ascii_whitespace() || *x == b'#')
        .unwrap_or(rest.len());

    reader.skip(end);
    &rest[..end]
}

/// Write the header for `header`, ending with the newline that
/// separates it from the pixel data
///
/// Every line of the comment in `options` is written as its own `#` line
/// so no comment text can end the header early.
pub(crate) fn encode_header<T: ZByteWriterTrait>(
    stream: &mut ZWriter<T>, header: &PnmHeader, options: &EncoderOptions
) -> Result<(), ZByteIoError> {
    stream.write_all(header.magic.as_bytes())?;
    stream.write_u8(b'\n')?;

    if let Some(comment) = options.comment() {
        for line in comment.lines() {
            stream.write_all(b"# ")?;
            stream.write_all(line.as_bytes())?;
            stream.write_u8(b'\n')?;
        }
    }
    stream.write_all(format!("{} {}\n", header.width, header.height).as_bytes())?;

    if let Some(max_value) = header.max_value {
        stream.write_all(format!("{max_value}\n").as_bytes())?;
    }
    Ok(())
}

/// Parse an unsigned decimal integer, rejecting empty tokens,
/// signs, stray characters and overflow
pub(crate) fn parse_decimal(token: &[u8]) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    token.iter().try_fold(0_usize, |acc, byte| {
        if byte.is_ascii_digit() {
            acc.checked_mul(10)?.checked_add(usize::from(byte - b'0'))
        } else {
            None
        }
    })
}

/// Whitespace separated tokens of ASCII pixel data
///
/// A `#` starts a comment running to the end of its line, as in the header.
pub(crate) fn split_tokens(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    data.split(|x| *x == b'\n')
        .flat_map(|line| {
            let end = line.iter().position(|x| *x == b'#').unwrap_or(line.len());
            line[..end].split(|x| x.is_ascii_whitespace())
        })
        .filter(|token| !token.is_empty())
}

/// Lossy, length limited rendering of a token for error messages
pub(crate) fn token_to_string(token: &[u8]) -> String {
    let end = token.len().min(MAX_TOKEN_IN_ERROR);
    String::from_utf8_lossy(&token[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use netpbm_core::bytestream::{ZByteReader, ZWriter};
    use netpbm_core::magic::MagicNumber;
    use netpbm_core::options::{DecoderOptions, EncoderOptions};

    use super::{decode_header, encode_header, parse_decimal, split_tokens, PnmHeader};
    use crate::errors::FormatError;

    const GRAY: [MagicNumber; 2] = [MagicNumber::P2, MagicNumber::P5];
    const BITMAP: [MagicNumber; 2] = [MagicNumber::P1, MagicNumber::P4];

    fn header(data: &[u8], accepted: &[MagicNumber]) -> Result<(PnmHeader, usize), FormatError> {
        let mut reader = ZByteReader::new(data);
        let header = decode_header(&mut reader, accepted, &DecoderOptions::default())?;
        Ok((header, reader.position()))
    }

    #[test]
    fn comments_between_tokens() {
        let data = b"P2\n# first\n#second\n3 # trailing\n 2\n# max next\n200\nrest";
        let (header, position) = header(data, &GRAY).unwrap();

        assert_eq!(header.magic, MagicNumber::P2);
        assert_eq!((header.width, header.height), (3, 2));
        assert_eq!(header.max_value, Some(200));
        assert_eq!(&data[position..], b"rest");
    }

    #[test]
    fn values_on_one_line() {
        let (header, position) = header(b"P4 8 1 \x0a", &BITMAP).unwrap();
        assert_eq!((header.width, header.height), (8, 1));
        assert_eq!(header.max_value, None);
        // a single separator is eaten, the data byte 0x0a stays
        assert_eq!(position, 7);
    }

    #[test]
    fn wrong_magic_for_depth() {
        assert_eq!(
            header(b"P2\n1 1\n1\n0", &BITMAP).unwrap_err(),
            FormatError::UnsupportedMagic("P2".to_string())
        );
        assert_eq!(
            header(b"P9\n1 1\n", &BITMAP).unwrap_err(),
            FormatError::UnsupportedMagic("P9".to_string())
        );
        assert_eq!(
            header(b"", &GRAY).unwrap_err(),
            FormatError::UnsupportedMagic(String::new())
        );
    }

    #[test]
    fn bad_dimensions() {
        for data in [&b"P1\n0 2\n"[..], b"P1\n2\n", b"P1\n-2 2\n", b"P1\nab 2\n", b"P1\n2 2x\n"] {
            assert!(
                matches!(header(data, &BITMAP), Err(FormatError::InvalidDimensions(_))),
                "{:?}",
                String::from_utf8_lossy(data)
            );
        }
    }

    #[test]
    fn dimension_limits() {
        let mut reader = ZByteReader::new(b"P1\n20 2\n");
        let options = DecoderOptions::default().set_max_width(10);
        let err = decode_header(&mut reader, &BITMAP, &options).unwrap_err();
        assert_eq!(
            err,
            FormatError::TooLargeDimensions {
                dimension: "width",
                max:       10,
                found:     20
            }
        );
    }

    #[test]
    fn bad_max_values() {
        for data in [&b"P5 1 1 0 x"[..], b"P5 1 1 256 x", b"P5 1 1", b"P2 1 1 1.5 0"] {
            assert!(matches!(
                header(data, &GRAY),
                Err(FormatError::InvalidMaxValue(_))
            ));
        }
    }

    #[test]
    fn decimal_parsing() {
        assert_eq!(parse_decimal(b"0"), Some(0));
        assert_eq!(parse_decimal(b"0042"), Some(42));
        assert_eq!(parse_decimal(b""), None);
        assert_eq!(parse_decimal(b"+1"), None);
        assert_eq!(parse_decimal(b"99999999999999999999999999"), None);
    }

    #[test]
    fn encoded_header_decodes() {
        let header = PnmHeader {
            magic:     MagicNumber::P5,
            width:     7,
            height:    3,
            max_value: Some(31)
        };
        let options = EncoderOptions::default().set_comment("two\nlines");
        let mut out = vec![];
        let mut stream = ZWriter::new(&mut out);
        encode_header(&mut stream, &header, &options).unwrap();

        assert_eq!(out, b"P5\n# two\n# lines\n7 3\n31\n");

        let (decoded, position) = self::header(&out, &GRAY).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(position, out.len());
    }

    #[test]
    fn pixel_tokens_skip_comments() {
        let data = b"1 0 # end of row\n# whole line\n\t0\r\n1#glued\n";
        let tokens: Vec<&[u8]> = split_tokens(data).collect();
        assert_eq!(tokens, [&b"1"[..], b"0", b"0", b"1"]);
    }
}
