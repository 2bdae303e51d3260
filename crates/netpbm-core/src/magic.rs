/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Netpbm magic numbers and what they describe
//!
//! A magic number packs two independent facts, the color depth
//! of the pixels and whether they are stored as ASCII text or raw bytes.
//!
//! ```text
//! ┌───────┬──────────┬────────┐
//! │ Magic │ Depth    │ Variant│
//! ├───────┼──────────┼────────┤
//! │ P1    │ OneBit   │ Ascii  │
//! │ P2    │ EightBit │ Ascii  │
//! │ P4    │ OneBit   │ Binary │
//! │ P5    │ EightBit │ Binary │
//! └───────┴──────────┴────────┘
//! ```
use core::fmt::{Display, Formatter};

/// Color depth of a netpbm image
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PixelDepth {
    /// One bit per pixel, black or white
    OneBit,
    /// Eight bits per pixel bounded by a max value
    EightBit
}

/// On-disk encoding of pixel data
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PnmVariant {
    /// Whitespace separated decimal tokens
    Ascii,
    /// Packed bits or raw bytes
    Binary
}

/// The magic numbers understood by the codecs
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MagicNumber {
    P1,
    P2,
    P4,
    P5
}

impl MagicNumber {
    /// Color depth this magic number describes
    pub const fn depth(self) -> PixelDepth {
        match self {
            MagicNumber::P1 | MagicNumber::P4 => PixelDepth::OneBit,
            MagicNumber::P2 | MagicNumber::P5 => PixelDepth::EightBit
        }
    }
    /// Pixel encoding this magic number describes
    pub const fn variant(self) -> PnmVariant {
        match self {
            MagicNumber::P1 | MagicNumber::P2 => PnmVariant::Ascii,
            MagicNumber::P4 | MagicNumber::P5 => PnmVariant::Binary
        }
    }
    /// Build the magic number for a depth and variant pair
    ///
    /// # Example
    /// ```
    /// use netpbm_core::magic::{MagicNumber, PixelDepth, PnmVariant};
    /// let magic = MagicNumber::from_parts(PixelDepth::EightBit, PnmVariant::Binary);
    /// assert_eq!(magic, MagicNumber::P5);
    /// ```
    pub const fn from_parts(depth: PixelDepth, variant: PnmVariant) -> MagicNumber {
        match (depth, variant) {
            (PixelDepth::OneBit, PnmVariant::Ascii) => MagicNumber::P1,
            (PixelDepth::OneBit, PnmVariant::Binary) => MagicNumber::P4,
            (PixelDepth::EightBit, PnmVariant::Ascii) => MagicNumber::P2,
            (PixelDepth::EightBit, PnmVariant::Binary) => MagicNumber::P5
        }
    }
    /// The two bytes written at the start of a file
    pub const fn as_bytes(self) -> &'static [u8; 2] {
        match self {
            MagicNumber::P1 => b"P1",
            MagicNumber::P2 => b"P2",
            MagicNumber::P4 => b"P4",
            MagicNumber::P5 => b"P5"
        }
    }
    /// Match a whole header token against the supported magic numbers
    ///
    /// The token must be exactly two bytes, `P12` is not `P1`.
    pub fn from_token(token: &[u8]) -> Option<MagicNumber> {
        match token {
            b"P1" => Some(MagicNumber::P1),
            b"P2" => Some(MagicNumber::P2),
            b"P4" => Some(MagicNumber::P4),
            b"P5" => Some(MagicNumber::P5),
            _ => None
        }
    }
    /// Return true if `other` stores pixels with the same color depth
    pub fn same_depth(self, other: MagicNumber) -> bool {
        self.depth() == other.depth()
    }
}

impl Display for MagicNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::P1 => write!(f, "P1"),
            Self::P2 => write!(f, "P2"),
            Self::P4 => write!(f, "P4"),
            Self::P5 => write!(f, "P5")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_agree_with_magic() {
        for magic in [MagicNumber::P1, MagicNumber::P2, MagicNumber::P4, MagicNumber::P5] {
            assert_eq!(MagicNumber::from_parts(magic.depth(), magic.variant()), magic);
            assert_eq!(MagicNumber::from_token(magic.as_bytes()), Some(magic));
            assert_eq!(magic.to_string().as_bytes(), magic.as_bytes());
        }
    }

    #[test]
    fn tokens_must_match_exactly() {
        assert_eq!(MagicNumber::from_token(b"P12"), None);
        assert_eq!(MagicNumber::from_token(b"P3"), None);
        assert_eq!(MagicNumber::from_token(b"p1"), None);
        assert_eq!(MagicNumber::from_token(b""), None);
    }
}
