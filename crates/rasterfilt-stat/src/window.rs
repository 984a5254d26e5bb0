//! Real-valued weight windows for convolution filters

use crate::{StatError, StatResult};

/// Maximum window width/height.
pub const MAX_SIZE: u32 = 31;

/// Odd-sized real weight matrix, addressed in the window's own layout
/// with its center over the destination cell.
///
/// At least one weight must be nonzero. The weight sum is cached for the
/// scaled filter variants; note it can legitimately be negative (e.g. a
/// derivative kernel), only an all-zero window is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightWindow {
    width: u32,
    height: u32,
    weights: Vec<f64>,
    sum: f64,
}

fn check_shape(width: u32, height: u32) -> StatResult<()> {
    if width == 0
        || height == 0
        || width % 2 == 0
        || height % 2 == 0
        || width > MAX_SIZE
        || height > MAX_SIZE
    {
        return Err(StatError::InvalidKernelShape {
            width,
            height,
            max: MAX_SIZE,
        });
    }
    Ok(())
}

impl WeightWindow {
    /// Create a window from row-major weights.
    ///
    /// # Errors
    ///
    /// [`StatError::InvalidKernelShape`] for even, zero or oversized
    /// dimensions or a weight vector of the wrong length,
    /// [`StatError::EmptyKernel`] when every weight is zero.
    pub fn from_weights(width: u32, height: u32, weights: Vec<f64>) -> StatResult<Self> {
        check_shape(width, height)?;
        if weights.len() != (width * height) as usize {
            return Err(StatError::InvalidKernelShape {
                width,
                height,
                max: MAX_SIZE,
            });
        }
        if weights.iter().all(|&w| w == 0.0) {
            return Err(StatError::EmptyKernel);
        }
        let sum = weights.iter().sum();
        Ok(Self {
            width,
            height,
            weights,
            sum,
        })
    }

    /// All-ones window. Scaled convolution with it is a windowed mean.
    pub fn uniform(width: u32, height: u32) -> StatResult<Self> {
        check_shape(width, height)?;
        let n = (width * height) as usize;
        Ok(Self {
            width,
            height,
            weights: vec![1.0; n],
            sum: n as f64,
        })
    }

    /// Unnormalized 2D gaussian, peak 1.0 at the center.
    ///
    /// `sigma` must be positive; pair with a scaled filter variant to
    /// normalize.
    pub fn gaussian(width: u32, height: u32, sigma: f64) -> StatResult<Self> {
        check_shape(width, height)?;
        if !(sigma > 0.0) {
            return Err(StatError::EmptyKernel);
        }
        let cx = ((width - 1) / 2) as f64;
        let cy = ((height - 1) / 2) as f64;
        let inv2s2 = 1.0 / (2.0 * sigma * sigma);
        let mut weights = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                weights.push((-(dx * dx + dy * dy) * inv2s2).exp());
            }
        }
        let sum = weights.iter().sum();
        Ok(Self {
            width,
            height,
            weights,
            sum,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal half-size `(width - 1) / 2`.
    pub fn half_width(&self) -> u32 {
        (self.width - 1) / 2
    }

    /// Vertical half-size `(height - 1) / 2`.
    pub fn half_height(&self) -> u32 {
        (self.height - 1) / 2
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Cached sum of all weights.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Weight at window position `(x, y)`, `None` out of range.
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.weights[(y * self.width + x) as usize])
        } else {
            None
        }
    }
}
