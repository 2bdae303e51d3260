/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel grid routines shared by both image types
//!
//! Grids are flat, row-major slices whose length is `width * height`.
use crate::errors::FormatError;

/// Flop an image, mirroring every row around the vertical axis
///
///```text
///old image     new image
///┌─────────┐   ┌──────────┐
///│a b c d e│   │e d c b a │
///│f g h i j│   │j i h g f │
///└─────────┘   └──────────┘
///```
///
/// # Panics
/// If `width` is zero or does not evenly divide the image
pub fn flop<T: Copy>(in_out_image: &mut [T], width: usize) {
    assert_eq!(
        in_out_image.len() % width,
        0,
        "Width does not evenly divide image"
    );

    for width_chunks in in_out_image.chunks_exact_mut(width) {
        width_chunks.reverse();
    }
}

/// Rotate an image 90 degrees clockwise into `out_image`
///
/// `out_image` must already have room for every pixel, its width
/// is the input height.
///
/// ```text
/// [1,2,3]    [4,1]
/// [4,5,6] -> [5,2]
///            [6,3]
/// ```
///
/// # Panics
/// If either slice is not `width * height` long
pub fn rotate_90<T: Copy>(in_image: &[T], out_image: &mut [T], width: usize, height: usize) {
    assert_eq!(in_image.len(), width * height, "Input does not match dimensions");
    assert_eq!(out_image.len(), in_image.len(), "Output does not match input");

    // input (row i, column j) lands on output (row j, column height-1-i)
    for (i, in_row) in in_image.chunks_exact(width).enumerate() {
        let out_column = height - 1 - i;

        for (j, pixel) in in_row.iter().enumerate() {
            out_image[j * height + out_column] = *pixel;
        }
    }
}

/// Complement every pixel of a bitmap
pub fn invert_bits(in_out_image: &mut [bool]) {
    in_out_image.iter_mut().for_each(|x| *x = !*x);
}

/// Invert grayscale pixels bounded by `max_value`
///
/// The formula for inverting a pixel is `pixel[x,y] = max_value-pixel[x,y]`,
/// pixels are assumed to never exceed `max_value`.
pub fn invert_gray(in_out_image: &mut [u8], max_value: u8) {
    in_out_image
        .iter_mut()
        .for_each(|x| *x = max_value.saturating_sub(*x));
}

/// Move pixels from the range `0..=old_max` to `0..=new_max`
///
/// Each pixel becomes `round(v * new_max / old_max)`, halves round up.
pub fn rescale(in_out_image: &mut [u8], old_max: u8, new_max: u8) {
    if old_max == new_max || old_max == 0 {
        return;
    }
    let old = u32::from(old_max);
    let new = u32::from(new_max);

    for x in in_out_image.iter_mut() {
        let v = u32::from(*x).min(old);
        // v <= old so the result is at most new_max
        *x = ((v * new + old / 2) / old) as u8;
    }
}

/// Black (`true`) for every pixel at or above `threshold`
///
/// # Panics
/// If the slices differ in length
pub fn threshold(in_image: &[u8], out_image: &mut [bool], threshold: u8) {
    assert_eq!(in_image.len(), out_image.len(), "Output does not match input");

    for (out, pixel) in out_image.iter_mut().zip(in_image) {
        *out = *pixel >= threshold;
    }
}

/// `width * height` for a non empty image that can be addressed
pub(crate) fn checked_size(width: usize, height: usize) -> Result<usize, FormatError> {
    if width == 0 || height == 0 {
        return Err(FormatError::InvalidDimensions(format!(
            "{width}x{height} image has no pixels"
        )));
    }
    width.checked_mul(height).ok_or_else(|| {
        FormatError::InvalidDimensions(format!("{width}x{height} image is too large to address"))
    })
}

/// Flat index of `(x, y)` or `None` when outside the image
#[inline]
pub(crate) fn pixel_index(x: isize, y: isize, width: usize, height: usize) -> Option<usize> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;

    if x < width && y < height {
        Some(y * width + x)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flop_odd_and_even_widths() {
        let mut odd = [1, 2, 3, 4, 5, 6];
        flop(&mut odd, 3);
        assert_eq!(odd, [3, 2, 1, 6, 5, 4]);

        let mut even = [1, 2, 3, 4];
        flop(&mut even, 2);
        assert_eq!(even, [2, 1, 4, 3]);
    }

    #[test]
    fn rotate_3x2() {
        let input = [1, 2, 3, 4, 5, 6];
        let mut output = [0; 6];
        rotate_90(&input, &mut output, 3, 2);
        assert_eq!(output, [4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn rotate_single_row_and_column() {
        let mut column = [0; 3];
        rotate_90(&[1, 2, 3], &mut column, 3, 1);
        assert_eq!(column, [1, 2, 3]);

        let mut row = [0; 3];
        rotate_90(&[1, 2, 3], &mut row, 1, 3);
        assert_eq!(row, [3, 2, 1]);
    }

    #[test]
    fn rescale_rounds_half_up() {
        let mut pixels = [0, 1, 2, 3, 4];
        rescale(&mut pixels, 4, 2);
        assert_eq!(pixels, [0, 1, 1, 2, 2]);

        let mut pixels = [0, 50, 100];
        rescale(&mut pixels, 100, 255);
        assert_eq!(pixels, [0, 128, 255]);
    }

    #[test]
    fn threshold_inclusive() {
        let mut out = [false; 4];
        threshold(&[0, 99, 100, 255], &mut out, 100);
        assert_eq!(out, [false, false, true, true]);
    }

    #[test]
    fn index_bounds() {
        assert_eq!(pixel_index(0, 0, 2, 2), Some(0));
        assert_eq!(pixel_index(1, 1, 2, 2), Some(3));
        assert_eq!(pixel_index(-1, 0, 2, 2), None);
        assert_eq!(pixel_index(2, 0, 2, 2), None);
        assert_eq!(pixel_index(0, 2, 2, 2), None);
        assert_eq!(pixel_index(isize::MIN, isize::MAX, 2, 2), None);
    }
}
