/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Portable bitmap and graymap decoding, encoding and transforms
//!
//! ```text
//! ╔═══════╤═══════════════════╤═════════════════════════════════════════╗
//! ║ Magic │ Meaning           │ Pixel encoding                          ║
//! ╠═══════╪═══════════════════╪═════════════════════════════════════════╣
//! ║ P1    │ Bitmap, ASCII     │ `0`/`1` tokens, whitespace separated    ║
//! ╟───────┼───────────────────┼─────────────────────────────────────────╢
//! ║ P4    │ Bitmap, binary    │ MSB first packed bits, byte aligned rows║
//! ╟───────┼───────────────────┼─────────────────────────────────────────╢
//! ║ P2    │ Grayscale, ASCII  │ decimal tokens, whitespace separated    ║
//! ╟───────┼───────────────────┼─────────────────────────────────────────╢
//! ║ P5    │ Grayscale, binary │ one raw byte per pixel                  ║
//! ╚═══════╧═══════════════════╧═════════════════════════════════════════╝
//! ```
//! Images are fully loaded into memory, [`BitmapImage`] and
//! [`GrayscaleImage`] own their pixels and every transform works in place.
//! Both implement [`Raster`], so decoding, encoding, pixel access and the
//! geometric transforms look the same for either depth.
//!
//! # Example
//! ```
//! use netpbm::{BitmapImage, Raster};
//!
//! let mut image = BitmapImage::decode(b"P1\n2 2\n1 0\n0 1\n").unwrap();
//! image.invert();
//! assert_eq!(image.pixels(), &[false, true, true, false]);
//!
//! let mut out = vec![];
//! image.encode(&mut out).unwrap();
//! assert_eq!(out, b"P1\n2 2\n0 1\n1 0\n");
//! ```
//!
//! # Features
//! - `log`: Report header fields, lenient decoding and encoder output through
//!    the `log` crate. Nothing is ever printed otherwise.

pub use netpbm_core;

pub use crate::bitmap::{BitmapDecoder, BitmapEncoder, BitmapImage};
pub use crate::errors::{ConfigError, FormatError, PnmErrors};
pub use crate::grayscale::{GrayscaleDecoder, GrayscaleEncoder, GrayscaleImage};
pub use crate::probe::{decode_any, decode_any_with_options, guess_format, DecodedImage};
pub use crate::traits::Raster;

mod bitmap;
mod errors;
mod grayscale;
mod headers;
pub mod ops;
mod probe;
mod traits;
