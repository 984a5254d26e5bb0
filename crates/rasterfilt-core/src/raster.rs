//! Generic scalar raster container
//!
//! A [`Raster<T>`] owns a contiguous row-major buffer of `width * height`
//! scalar cells. The filtering engine is generic over the [`Pixel`] trait
//! and runs every accumulation in `f64`, converting back to the element
//! type on write.

use crate::error::{Error, Result};

/// Numeric element type of a scalar raster.
///
/// Implemented for `i32`, `f32` and `f64`. All windowed statistics are
/// accumulated in `f64`; `from_f64` converts a finished statistic back to
/// the element type (rounding and saturating for the integer type).
pub trait Pixel: Copy + PartialOrd + Default + 'static {
    /// The filter's "zero" value, used for zero-filled borders.
    const ZERO: Self;

    /// Widen to `f64` for accumulation.
    fn to_f64(self) -> f64;

    /// Narrow a finished `f64` statistic back to the element type.
    fn from_f64(v: f64) -> Self;
}

impl Pixel for i32 {
    const ZERO: Self = 0;

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        // Round half away from zero, saturate at the type bounds.
        let r = v.round();
        if r >= i32::MAX as f64 {
            i32::MAX
        } else if r <= i32::MIN as f64 {
            i32::MIN
        } else {
            r as i32
        }
    }
}

impl Pixel for f32 {
    const ZERO: Self = 0.0;

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl Pixel for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
}

/// A rectangular scalar raster with a contiguous row-major buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Pixel> Raster<T> {
    /// Create a raster filled with the element zero value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let data = vec![T::ZERO; width as usize * height as usize];
        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing row-major buffer, taking ownership of it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions and
    /// [`Error::BufferLengthMismatch`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if data.len() != width as usize * height as usize {
            return Err(Error::BufferLengthMismatch {
                len: data.len(),
                width,
                height,
            });
        }
        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Raster width in cells.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in cells.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the cell at (x, y), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get the cell at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> T {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Set the cell at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] when out of bounds.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: T) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Set the cell at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Fill every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Borrow one row as a slice.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Borrow one row mutably.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [T] {
        let start = y as usize * self.width as usize;
        let w = self.width as usize;
        &mut self.data[start..start + w]
    }

    /// Raw row-major buffer access.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Raw mutable row-major buffer access.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the raster, returning its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zero_filled() {
        let r: Raster<f32> = Raster::new(4, 3).unwrap();
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 3);
        assert!(r.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(Raster::<i32>::new(0, 3).is_err());
        assert!(Raster::<i32>::new(3, 0).is_err());
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(Raster::from_vec(2, 2, vec![1.0f64; 4]).is_ok());
        assert!(Raster::from_vec(2, 2, vec![1.0f64; 5]).is_err());
    }

    #[test]
    fn test_get_set_bounds() {
        let mut r: Raster<i32> = Raster::new(3, 2).unwrap();
        r.set(2, 1, 7).unwrap();
        assert_eq!(r.get(2, 1), Some(7));
        assert_eq!(r.get(3, 1), None);
        assert!(r.set(0, 2, 1).is_err());
    }

    #[test]
    fn test_row_major_layout() {
        let r = Raster::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(r.row(0), &[1, 2, 3]);
        assert_eq!(r.row(1), &[4, 5, 6]);
        assert_eq!(r.get_unchecked(1, 1), 5);
    }

    #[test]
    fn test_pixel_i32_rounding_and_saturation() {
        assert_eq!(i32::from_f64(2.5), 3);
        assert_eq!(i32::from_f64(-2.5), -3);
        assert_eq!(i32::from_f64(1e300), i32::MAX);
        assert_eq!(i32::from_f64(-1e300), i32::MIN);
    }
}
