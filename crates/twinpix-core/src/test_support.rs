//! Synthetic image fixtures shared by unit tests.

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// An 8x8 grid of flat colour blocks drawn from a seeded LCG.
///
/// Different seeds give unrelated low-frequency structure, so their
/// fingerprints differ; the same seed always gives the same pixels.
pub fn block_noise(seed: u64, width: u32, height: u32) -> RgbImage {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(1);
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 56) as u8
    };

    let mut blocks = [[0u8; 3]; 64];
    for block in blocks.iter_mut() {
        *block = [next(), next(), next()];
    }

    RgbImage::from_fn(width, height, |x, y| {
        let bx = (x * 8 / width).min(7) as usize;
        let by = (y * 8 / height).min(7) as usize;
        Rgb(blocks[by * 8 + bx])
    })
}

/// Write `image` as a JPEG at the given quality.
pub fn save_jpeg(image: &RgbImage, path: &Path, quality: u8) {
    let file = BufWriter::new(File::create(path).unwrap());
    image
        .write_with_encoder(JpegEncoder::new_with_quality(file, quality))
        .unwrap();
}
