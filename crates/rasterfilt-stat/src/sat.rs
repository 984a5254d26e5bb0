//! Summed-area tables for the block fast paths
//!
//! One row and one column of zero padding, so every window sum is a plain
//! four-corner lookup without edge special cases. All accumulation is in
//! f64 regardless of the source pixel type.

use rasterfilt_core::{Mask, Pixel, Raster};

/// Padded `(width + 1) x (height + 1)` prefix-sum table.
#[derive(Debug, Clone)]
pub(crate) struct Sat {
    stride: usize,
    data: Vec<f64>,
}

impl Sat {
    /// Build from a per-cell source term.
    fn build(width: u32, height: u32, mut term: impl FnMut(u32, u32) -> f64) -> Self {
        let stride = width as usize + 1;
        let mut data = vec![0.0; stride * (height as usize + 1)];
        for y in 0..height as usize {
            let mut row_sum = 0.0;
            for x in 0..width as usize {
                row_sum += term(x as u32, y as u32);
                data[(y + 1) * stride + x + 1] = data[y * stride + x + 1] + row_sum;
            }
        }
        Self { stride, data }
    }

    /// Prefix sums of cell values; invalid cells contribute zero.
    pub(crate) fn of_values<T: Pixel>(src: &Raster<T>, invalid: Option<&Mask>) -> Self {
        Self::build(src.width(), src.height(), |x, y| {
            if invalid.is_some_and(|m| m.get_unchecked(x, y)) {
                0.0
            } else {
                src.get_unchecked(x, y).to_f64()
            }
        })
    }

    /// Prefix sums of squared cell values; invalid cells contribute zero.
    pub(crate) fn of_squares<T: Pixel>(src: &Raster<T>, invalid: Option<&Mask>) -> Self {
        Self::build(src.width(), src.height(), |x, y| {
            if invalid.is_some_and(|m| m.get_unchecked(x, y)) {
                0.0
            } else {
                let v = src.get_unchecked(x, y).to_f64();
                v * v
            }
        })
    }

    /// Prefix counts of valid cells.
    pub(crate) fn of_valid_counts(invalid: &Mask) -> Self {
        Self::build(invalid.width(), invalid.height(), |x, y| {
            if invalid.get_unchecked(x, y) { 0.0 } else { 1.0 }
        })
    }

    /// Sum over the inclusive cell rectangle `[x0, x1] x [y0, y1]`.
    ///
    /// The rectangle must lie inside the source raster.
    pub(crate) fn window_sum(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> f64 {
        let (x0, y0) = (x0 as usize, y0 as usize);
        let (x1, y1) = (x1 as usize + 1, y1 as usize + 1);
        self.data[y1 * self.stride + x1] + self.data[y0 * self.stride + x0]
            - self.data[y0 * self.stride + x1]
            - self.data[y1 * self.stride + x0]
    }
}
