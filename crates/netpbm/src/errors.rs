/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when decoding, encoding and configuring images
//!
//! Header and pixel data violations fail loudly with a [`FormatError`].
//! Pixel coordinates outside the image are never errors, reads return
//! the zero pixel and writes are ignored.
use core::fmt::{Debug, Display, Formatter};

use netpbm_core::bytestream::ZByteIoError;
use netpbm_core::magic::MagicNumber;

/// Errors found while decoding a netpbm stream
///
/// Rows and columns are zero based.
#[derive(Clone, Eq, PartialEq)]
pub enum FormatError {
    /// The first token is not a magic number this decoder handles
    UnsupportedMagic(String),
    /// A netpbm magic number for a format that isn't implemented, e.g color `P6`
    UnsupportedVariant(String),
    /// Width or height missing, not a positive integer or too large to address
    InvalidDimensions(String),
    /// Dimensions exceed the limits in the decoder options
    TooLargeDimensions {
        dimension: &'static str,
        max:       usize,
        found:     usize
    },
    /// Max value missing, zero or above 255
    InvalidMaxValue(String),
    /// A pixel token that isn't a valid value for the format
    InvalidPixelToken {
        row:    usize,
        column: usize,
        token:  String
    },
    /// Pixel data ended before the image was complete
    UnexpectedEndOfData { row: usize },
    /// A grayscale pixel brighter than the declared max value
    PixelExceedsMaxValue {
        row:       usize,
        column:    usize,
        value:     usize,
        max_value: u8
    }
}

impl Debug for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            FormatError::UnsupportedMagic(magic) => {
                writeln!(f, "Unsupported magic number `{magic}`")
            }
            FormatError::UnsupportedVariant(magic) => {
                writeln!(f, "Netpbm variant `{magic}` is not supported")
            }
            FormatError::InvalidDimensions(reason) => {
                writeln!(f, "Invalid dimensions, reason: {reason}")
            }
            FormatError::TooLargeDimensions {
                dimension,
                max,
                found
            } => {
                writeln!(
                    f,
                    "Too large {dimension}, expected a value less than {max} but found {found}"
                )
            }
            FormatError::InvalidMaxValue(reason) => {
                writeln!(f, "Invalid max value, reason: {reason}")
            }
            FormatError::InvalidPixelToken { row, column, token } => {
                writeln!(
                    f,
                    "Invalid pixel token `{token}` at row {row}, column {column}"
                )
            }
            FormatError::UnexpectedEndOfData { row } => {
                writeln!(f, "Unexpected end of pixel data at row {row}")
            }
            FormatError::PixelExceedsMaxValue {
                row,
                column,
                value,
                max_value
            } => {
                writeln!(
                    f,
                    "Pixel {value} at row {row}, column {column} exceeds max value {max_value}"
                )
            }
        }
    }
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for FormatError {}

/// A rejected change to an image, the image is left as it was
#[derive(Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// Switching to a magic number of a different color depth
    IncompatibleVariant {
        requested: MagicNumber,
        current:   MagicNumber
    },
    /// A max value outside `1..=255`
    InvalidMaxValue(u8)
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::IncompatibleVariant { requested, current } => {
                writeln!(
                    f,
                    "Cannot switch a {current} image to {requested}, color depths differ"
                )
            }
            ConfigError::InvalidMaxValue(value) => {
                writeln!(f, "Invalid max value {value}, expected a value in 1..=255")
            }
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ConfigError {}

/// Errors from operations that touch the filesystem
pub enum PnmErrors {
    Format(FormatError),
    Config(ConfigError),
    IoErrors(ZByteIoError)
}

impl Debug for PnmErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PnmErrors::Format(err) => writeln!(f, "{err:?}"),
            PnmErrors::Config(err) => writeln!(f, "{err:?}"),
            PnmErrors::IoErrors(err) => writeln!(f, "I/O error {err:?}")
        }
    }
}

impl Display for PnmErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for PnmErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PnmErrors::Format(err) => Some(err),
            PnmErrors::Config(err) => Some(err),
            PnmErrors::IoErrors(err) => Some(err)
        }
    }
}

impl From<FormatError> for PnmErrors {
    fn from(value: FormatError) -> Self {
        PnmErrors::Format(value)
    }
}

impl From<ConfigError> for PnmErrors {
    fn from(value: ConfigError) -> Self {
        PnmErrors::Config(value)
    }
}

impl From<ZByteIoError> for PnmErrors {
    fn from(value: ZByteIoError) -> Self {
        PnmErrors::IoErrors(value)
    }
}

impl From<std::io::Error> for PnmErrors {
    fn from(value: std::io::Error) -> Self {
        PnmErrors::IoErrors(ZByteIoError::StdIoError(value))
    }
}
