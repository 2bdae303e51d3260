/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the netpbm codecs
//!
//! This crate provides the pieces the bitmap (`P1`/`P4`) and
//! grayscale (`P2`/`P5`) codecs have in common
//!
//! It currently contains
//!
//! - A bytestream reader over borrowed bytes and a writer over any sink
//! - Magic number, variant and pixel depth descriptions
//! - Decoder and encoder options
//! - A logging shim that is a no-op unless the `log` feature is enabled
//!
//! # Features
//!  - `log`: Forward the macros in [`log`] to the `log` crate, so applications
//!     can observe decoding through any `log` backend.
#![macro_use]

pub mod bytestream;
pub mod log;
pub mod magic;
pub mod options;
