/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use netpbm::netpbm_core::magic::MagicNumber;
use netpbm::{decode_any, guess_format, DecodedImage, FormatError, Raster};

#[test]
fn guesses_all_supported() {
    for (data, magic) in [
        (&b"P1\n"[..], MagicNumber::P1),
        (b"P2 ", MagicNumber::P2),
        (b"P4\t", MagicNumber::P4),
        (b"P5#comment\n", MagicNumber::P5)
    ] {
        assert_eq!(guess_format(data), Ok(magic));
    }
}

#[test]
fn color_formats_are_unsupported_variants() {
    for data in [&b"P3\n1 1\n255\n0 0 0\n"[..], b"P6\n", b"P7\nWIDTH 1\n"] {
        assert!(matches!(
            guess_format(data),
            Err(FormatError::UnsupportedVariant(_))
        ));
    }
}

#[test]
fn unknown_magic() {
    assert_eq!(
        guess_format(b"P9\n2 2\n"),
        Err(FormatError::UnsupportedMagic("P9".to_string()))
    );
    assert_eq!(guess_format(b""), Err(FormatError::UnsupportedMagic(String::new())));
}

#[test]
fn decode_any_picks_the_image_type() {
    let bitmap = decode_any(b"P1\n2 1\n0 1\n").unwrap();
    assert_eq!(bitmap.magic_number(), MagicNumber::P1);
    assert_eq!(bitmap.bitmap().unwrap().pixels(), &[false, true]);

    let gray = decode_any(b"P5\n2 1\n9\n\x03\x09").unwrap();
    assert!(matches!(gray, DecodedImage::Grayscale(_)));

    let gray = gray.grayscale().unwrap();
    assert_eq!(gray.max_value(), 9);
    assert_eq!(gray.dimensions(), (2, 1));
}

#[test]
fn decode_any_reports_decoder_errors() {
    assert_eq!(
        decode_any(b"P4\n8 2\n\xFF").unwrap_err(),
        FormatError::UnexpectedEndOfData { row: 1 }
    );
    assert!(decode_any(b"P6\n1 1\n255\n\x00\x00\x00").is_err());
}
