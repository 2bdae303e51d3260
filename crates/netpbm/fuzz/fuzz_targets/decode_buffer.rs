#![no_main]

use libfuzzer_sys::fuzz_target;
use netpbm::{decode_any, DecodedImage, Raster};

fuzz_target!(|data: &[u8]| {
    // anything that decodes must survive the transforms and encode again
    if let Ok(image) = decode_any(data) {
        let mut out = vec![];
        match image {
            DecodedImage::Bitmap(mut img) => {
                img.rotate90cw();
                let _ = img.encode(&mut out);
            }
            DecodedImage::Grayscale(mut img) => {
                img.rotate90cw();
                let _ = img.to_bitmap();
                let _ = img.encode(&mut out);
            }
        }
    }
});
