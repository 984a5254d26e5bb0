//! Shared raster builders for regression tests

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use rasterfilt_core::{Image, Mask, Raster};

/// 21x18 mask with two solid blocks: 6x5 at (3, 3) and 8x7 at (11, 8).
///
/// Small enough to hand-check morphology results on, large enough that a
/// 3x3 window has room on every side of both blocks.
pub fn two_block_mask() -> Mask {
    let mut m = Mask::new(21, 18).expect("valid dimensions");
    for y in 3..8 {
        for x in 3..9 {
            m.set_unchecked(x, y, true);
        }
    }
    for y in 8..15 {
        for x in 11..19 {
            m.set_unchecked(x, y, true);
        }
    }
    m
}

/// Random mask with the given fill probability and a fixed seed.
pub fn random_mask(width: u32, height: u32, density: f64, seed: u64) -> Mask {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut m = Mask::new(width, height).expect("valid dimensions");
    for y in 0..height {
        for x in 0..width {
            if rng.random_bool(density) {
                m.set_unchecked(x, y, true);
            }
        }
    }
    m
}

/// Deterministic f64 ramp-with-ripple image; values in roughly [0, w + h + 3].
pub fn gradient_image(width: u32, height: u32) -> Image {
    let mut data = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let ripple = (((x * 7 + y * 13) % 5) as f64) * 0.75;
            data.push(x as f64 * 0.5 + y as f64 * 0.25 + ripple);
        }
    }
    Image::from(Raster::from_vec(width, height, data).expect("valid dimensions"))
}

/// Random f64 image with values uniform in `[lo, hi)` and a fixed seed.
pub fn random_image(width: u32, height: u32, lo: f64, hi: f64, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..(width * height) as usize)
        .map(|_| rng.random_range(lo..hi))
        .collect();
    Image::from(Raster::from_vec(width, height, data).expect("valid dimensions"))
}
