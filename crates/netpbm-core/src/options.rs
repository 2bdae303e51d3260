/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder and encoder options
//!
//! Options are plain values built up with `set_*` methods that consume
//! and return `Self`, so one configuration can be copied around and reused
//! for every image.

/// Decoder options
///
/// # Example
/// ```
/// use netpbm_core::options::DecoderOptions;
/// let options = DecoderOptions::default()
///     .set_max_width(512)
///     .set_strict_mode(true);
/// assert_eq!(options.max_width(), 512);
/// assert!(options.strict_mode());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    max_width:   usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    max_height:  usize,
    /// Treat ASCII bitmap data as a plain token stream
    ///
    /// When false, `P1` pixel data is read one line per row, short lines
    /// are padded with white pixels and extra tokens are dropped, both
    /// reported through the `warn` log level.
    ///
    /// When true, line breaks carry no meaning and a shortage of tokens
    /// is an error.
    ///
    /// - Default value: false
    strict_mode: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:   1 << 14,
            max_height:  1 << 14,
            strict_mode: false
        }
    }
}

impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }
    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }
    /// Whether ASCII bitmap rows are read strictly
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }
    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    #[must_use]
    pub const fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }
    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    #[must_use]
    pub const fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }
    /// Set whether ASCII bitmap rows are read strictly
    #[must_use]
    pub const fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}

/// Encoder options
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct EncoderOptions {
    /// Free text written as `#` lines after the magic number
    comment: Option<String>
}

impl EncoderOptions {
    /// The comment the encoder will write, if any
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
    /// Write `comment` into the header
    ///
    /// Multi-line comments are split and every line gets its own `#` prefix.
    #[must_use]
    pub fn set_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
}
