/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::{Rng, WyRand};
use netpbm::netpbm_core::magic::MagicNumber;
use netpbm::netpbm_core::options::{DecoderOptions, EncoderOptions};
use netpbm::{BitmapDecoder, BitmapImage, ConfigError, FormatError, Raster};

fn random_bitmap(rng: &mut WyRand, magic: MagicNumber) -> BitmapImage {
    let width = rng.generate_range(1_usize..=19);
    let height = rng.generate_range(1_usize..=11);
    let pixels = (0..width * height)
        .map(|_| rng.generate::<u8>() & 1 == 1)
        .collect();

    BitmapImage::from_pixels(width, height, magic, pixels).unwrap()
}

fn encode(image: &BitmapImage) -> Vec<u8> {
    let mut out = vec![];
    image.encode(&mut out).unwrap();
    out
}

#[test]
fn decode_then_invert() {
    let mut image = BitmapImage::decode(b"P1\n2 2\n1 0\n0 1\n").unwrap();

    assert_eq!(image.dimensions(), (2, 2));
    assert_eq!(image.magic_number(), MagicNumber::P1);
    assert_eq!(image.pixels(), &[true, false, false, true]);

    image.invert();
    let rows: Vec<&[bool]> = image.rows().collect();
    assert_eq!(rows, [&[false, true][..], &[true, false][..]]);
}

#[test]
fn header_comments_are_skipped() {
    let image = BitmapImage::decode(b"P1\n# made by hand\n# twice\n3 1\n0 1 1\n").unwrap();
    assert_eq!(image.pixels(), &[false, true, true]);
}

#[test]
fn unsupported_magic() {
    assert_eq!(
        BitmapImage::decode(b"P9\n2 2\n1 0\n0 1\n").unwrap_err(),
        FormatError::UnsupportedMagic("P9".to_string())
    );
    // a graymap is not a bitmap
    assert_eq!(
        BitmapImage::decode(b"P2\n1 1\n255\n0\n").unwrap_err(),
        FormatError::UnsupportedMagic("P2".to_string())
    );
}

#[test]
fn invalid_token_names_row() {
    let err = BitmapImage::decode(b"P1\n2 2\n1 0\n0 2\n").unwrap_err();
    assert_eq!(
        err,
        FormatError::InvalidPixelToken {
            row:    1,
            column: 1,
            token:  "2".to_string()
        }
    );
}

#[test]
fn short_rows_are_padded() {
    let image = BitmapImage::decode(b"P1\n3 2\n1\n1 1 1\n").unwrap();
    assert_eq!(image.pixels(), &[true, false, false, true, true, true]);
}

#[test]
fn extra_tokens_are_dropped() {
    let image = BitmapImage::decode(b"P1\n2 2\n1 1 1\n\n# note\n0 1\n").unwrap();
    assert_eq!(image.pixels(), &[true, true, false, true]);
}

#[test]
fn comments_in_pixel_data() {
    let image = BitmapImage::decode(b"P1\n2 1\n# c\n1 0\n").unwrap();
    assert_eq!(image.pixels(), &[true, false]);

    let image = BitmapImage::decode(b"P1\n2 2\n1 0 # first\n0 1#second\n").unwrap();
    assert_eq!(image.pixels(), &[true, false, false, true]);

    let options = DecoderOptions::default().set_strict_mode(true);
    let image = BitmapImage::decode_with_options(b"P1\n2 1\n1 # c\n 0\n", options).unwrap();
    assert_eq!(image.pixels(), &[true, false]);
}

#[test]
fn wrapped_rows_need_strict_mode() {
    let data = b"P1\n4 1\n1 0\n1 1\n";

    // lenient mode reads one row per line
    let image = BitmapImage::decode(data).unwrap();
    assert_eq!(image.pixels(), &[true, false, false, false]);

    let options = DecoderOptions::default().set_strict_mode(true);
    let image = BitmapImage::decode_with_options(data, options).unwrap();
    assert_eq!(image.pixels(), &[true, false, true, true]);
}

#[test]
fn missing_rows_fail() {
    assert_eq!(
        BitmapImage::decode(b"P1\n2 3\n1 0\n0 1\n").unwrap_err(),
        FormatError::UnexpectedEndOfData { row: 2 }
    );
}

#[test]
fn strict_mode_reads_a_token_stream() {
    let options = DecoderOptions::default().set_strict_mode(true);

    // rows wrap across lines freely
    let image = BitmapImage::decode_with_options(b"P1\n3 2\n1 0\n1 0 1\n0\n", options).unwrap();
    assert_eq!(image.pixels(), &[true, false, true, false, true, false]);

    // but a short row is an error
    let err = BitmapImage::decode_with_options(b"P1\n3 2\n1\n1 1 1\n", options).unwrap_err();
    assert_eq!(err, FormatError::UnexpectedEndOfData { row: 1 });
}

#[test]
fn ascii_data_on_dimension_line() {
    let image = BitmapImage::decode(b"P1 2 1 0 1").unwrap();
    assert_eq!(image.pixels(), &[false, true]);
}

#[test]
fn decode_packed() {
    // 10 pixels wide means two bytes a row, padding bits are ignored
    let data = b"P4\n10 2\n\xA0\x7F\x0A\xC0";
    let image = BitmapImage::decode(data).unwrap();

    assert_eq!(image.magic_number(), MagicNumber::P4);
    let rows: Vec<&[bool]> = image.rows().collect();
    assert_eq!(
        rows[0],
        &[true, false, true, false, false, false, false, false, false, true]
    );
    assert_eq!(
        rows[1],
        &[false, false, false, false, true, false, true, false, true, true]
    );
}

#[test]
fn truncated_packed_names_row() {
    assert_eq!(
        BitmapImage::decode(b"P4\n10 3\n\xFF\xFF\xFF\xFF\xFF").unwrap_err(),
        FormatError::UnexpectedEndOfData { row: 2 }
    );
    assert_eq!(
        BitmapImage::decode(b"P4\n8 1\n").unwrap_err(),
        FormatError::UnexpectedEndOfData { row: 0 }
    );
}

#[test]
fn encode_packed_zeroes_padding() {
    let image = BitmapImage::from_rows(
        MagicNumber::P4,
        vec![vec![true; 9], vec![false, true, false, false, false, false, false, false, true]]
    )
    .unwrap();

    assert_eq!(encode(&image), b"P4\n9 2\n\xFF\x80\x40\x80");
}

#[test]
fn round_trips() {
    let mut rng = WyRand::new_seed(0x5eed);

    for magic in [MagicNumber::P1, MagicNumber::P4] {
        for _ in 0..50 {
            let image = random_bitmap(&mut rng, magic);
            let decoded = BitmapImage::decode(&encode(&image)).unwrap();
            assert_eq!(decoded, image);
        }
    }
}

#[test]
fn ascii_round_trip_is_byte_exact() {
    let data = b"P1\n3 2\n1 0 1\n0 1 0\n";
    let image = BitmapImage::decode(data).unwrap();
    assert_eq!(encode(&image), data);
}

#[test]
fn set_variant_switches_encoding() {
    let mut image = BitmapImage::decode(b"P1\n8 1\n1 0 0 0 0 0 0 1\n").unwrap();

    image.set_variant(MagicNumber::P4).unwrap();
    assert_eq!(encode(&image), b"P4\n8 1\n\x81");

    image.set_variant(MagicNumber::P1).unwrap();
    assert_eq!(encode(&image), b"P1\n8 1\n1 0 0 0 0 0 0 1\n");
}

#[test]
fn set_variant_rejects_other_depth() {
    let mut image = BitmapImage::new(2, 2, MagicNumber::P1).unwrap();
    let before = image.clone();

    assert_eq!(
        image.set_variant(MagicNumber::P5).unwrap_err(),
        ConfigError::IncompatibleVariant {
            requested: MagicNumber::P5,
            current:   MagicNumber::P1
        }
    );
    assert_eq!(image, before);
}

#[test]
fn transforms_undo_themselves() {
    let mut rng = WyRand::new_seed(7);

    for _ in 0..50 {
        let original = random_bitmap(&mut rng, MagicNumber::P1);
        let mut image = original.clone();

        image.invert();
        image.invert();
        assert_eq!(image, original);

        image.flip();
        image.flip();
        assert_eq!(image, original);

        for _ in 0..4 {
            image.rotate90cw();
        }
        assert_eq!(image, original);
    }
}

#[test]
fn flip_mirrors_rows() {
    let mut image = BitmapImage::decode(b"P1\n3 2\n1 1 0\n0 0 1\n").unwrap();
    image.flip();
    assert_eq!(image.pixels(), &[false, true, true, true, false, false]);
}

#[test]
fn rotate_swaps_dimensions() {
    let mut image = BitmapImage::decode(b"P1\n3 2\n1 0 0\n0 0 0\n").unwrap();
    image.rotate90cw();

    assert_eq!(image.dimensions(), (2, 3));
    // top left corner moves to the top right
    assert!(image.at(1, 0));
    assert_eq!(image.pixels().iter().filter(|x| **x).count(), 1);
}

#[test]
fn out_of_bounds_access_is_harmless() {
    let mut image = BitmapImage::decode(b"P1\n2 1\n1 1\n").unwrap();

    assert!(!image.at(-1, 0));
    assert!(!image.at(2, 0));
    assert!(!image.at(0, 1));
    assert!(image.at(1, 0));

    image.set(-1, 0, false);
    image.set(2, 0, false);
    image.set(0, -5, false);
    assert_eq!(image.pixels(), &[true, true]);

    image.set(0, 0, false);
    assert_eq!(image.pixels(), &[false, true]);
}

#[test]
fn comment_is_written() {
    let image = BitmapImage::new(1, 1, MagicNumber::P1).unwrap();
    let mut out = vec![];
    image
        .encode_with_options(&mut out, &EncoderOptions::default().set_comment("hello"))
        .unwrap();

    assert_eq!(out, b"P1\n# hello\n1 1\n0\n");
    assert_eq!(BitmapImage::decode(&out).unwrap(), image);
}

#[test]
fn decoder_reports_header() {
    let mut decoder = BitmapDecoder::new(b"P4 16 3\n");
    assert_eq!(decoder.dimensions(), None);

    decoder.decode_headers().unwrap();
    assert_eq!(decoder.dimensions(), Some((16, 3)));
    assert_eq!(decoder.magic_number(), Some(MagicNumber::P4));
    // headers are fine, the pixels are missing
    assert_eq!(
        decoder.decode().unwrap_err(),
        FormatError::UnexpectedEndOfData { row: 0 }
    );
}

#[test]
fn constructors_validate_shape() {
    assert!(matches!(
        BitmapImage::new(0, 3, MagicNumber::P1),
        Err(FormatError::InvalidDimensions(_))
    ));
    assert!(matches!(
        BitmapImage::from_pixels(2, 2, MagicNumber::P1, vec![true; 3]),
        Err(FormatError::InvalidDimensions(_))
    ));
    assert!(matches!(
        BitmapImage::from_rows(MagicNumber::P4, vec![]),
        Err(FormatError::InvalidDimensions(_))
    ));
    assert!(matches!(
        BitmapImage::new(1, 1, MagicNumber::P2),
        Err(FormatError::UnsupportedMagic(_))
    ));
}
