//! Binary raster ("mask") container
//!
//! A [`Mask`] stores one bit per cell, packed MSB-first in 32-bit words.
//! Every row starts on a word boundary (`wpl` words per line), so the
//! morphological engine can run word-level shift-and-accumulate kernels on
//! whole rows. Unused bits past `width` in the last word of each row are
//! kept clear by every public operation.

use crate::error::{Error, Result};
use crate::rowops::shift_or_row;

/// A rectangular binary raster, bit-packed in 32-bit words.
#[derive(Debug, Clone)]
pub struct Mask {
    width: u32,
    height: u32,
    wpl: u32,
    data: Vec<u32>,
}

impl Mask {
    /// Create a mask with all cells clear.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = width.div_ceil(32);
        let data = vec![0u32; wpl as usize * height as usize];
        Ok(Mask {
            width,
            height,
            wpl,
            data,
        })
    }

    /// Mask width in cells.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in cells.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.wpl
    }

    /// Raw packed words.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Raw mutable packed words.
    ///
    /// Callers writing words directly must restore the padding invariant
    /// with [`Mask::clear_padding`] before handing the mask back.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Borrow one packed row.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.wpl as usize;
        &self.data[start..start + self.wpl as usize]
    }

    /// Borrow one packed row mutably.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = y as usize * self.wpl as usize;
        let wpl = self.wpl as usize;
        &mut self.data[start..start + wpl]
    }

    /// Get the cell at (x, y), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.get_unchecked(x, y))
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
    pub fn get_unchecked(&self, x: u32, y: u32) -> bool {
        let word = self.data[y as usize * self.wpl as usize + (x / 32) as usize];
        word & (0x8000_0000u32 >> (x % 32)) != 0
    }

    /// Set the cell at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] when out of bounds.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.set_unchecked(x, y, value);
        Ok(())
    }

    /// Set the cell at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: bool) {
        let idx = y as usize * self.wpl as usize + (x / 32) as usize;
        let bit = 0x8000_0000u32 >> (x % 32);
        if value {
            self.data[idx] |= bit;
        } else {
            self.data[idx] &= !bit;
        }
    }

    /// Fill every cell with `value`.
    pub fn fill(&mut self, value: bool) {
        self.data.fill(if value { !0u32 } else { 0 });
        if value {
            self.clear_padding();
        }
    }

    /// Clear the unused bits past `width` in the last word of each row.
    ///
    /// Word-level writers can set these bits; they would contaminate
    /// subsequent word-level operations (for example an erosion reading a
    /// dilated result) if left set.
    pub fn clear_padding(&mut self) {
        let extra = self.width % 32;
        if extra == 0 {
            return;
        }
        let mask = !0u32 << (32 - extra);
        let wpl = self.wpl as usize;
        for y in 0..self.height as usize {
            self.data[y * wpl + wpl - 1] &= mask;
        }
    }

    fn check_same_dims(&self, other: &Mask) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (other.width, other.height),
            });
        }
        Ok(())
    }

    /// In-place AND with another mask of the same dimensions.
    pub fn and_assign(&mut self, other: &Mask) -> Result<()> {
        self.check_same_dims(other)?;
        for (d, s) in self.data.iter_mut().zip(&other.data) {
            *d &= s;
        }
        Ok(())
    }

    /// In-place OR with another mask of the same dimensions.
    pub fn or_assign(&mut self, other: &Mask) -> Result<()> {
        self.check_same_dims(other)?;
        for (d, s) in self.data.iter_mut().zip(&other.data) {
            *d |= s;
        }
        Ok(())
    }

    /// In-place XOR with another mask of the same dimensions.
    pub fn xor_assign(&mut self, other: &Mask) -> Result<()> {
        self.check_same_dims(other)?;
        for (d, s) in self.data.iter_mut().zip(&other.data) {
            *d ^= s;
        }
        Ok(())
    }

    /// Invert every cell in place.
    pub fn not_assign(&mut self) {
        for w in self.data.iter_mut() {
            *w = !*w;
        }
        self.clear_padding();
    }

    /// Return the complement of this mask.
    pub fn complemented(&self) -> Mask {
        let mut out = self.clone();
        out.not_assign();
        out
    }

    /// Count the set cells.
    pub fn count(&self) -> u64 {
        self.data.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    /// Cell-for-cell equality (dimensions and content).
    pub fn equals(&self, other: &Mask) -> bool {
        self.width == other.width && self.height == other.height && self.data == other.data
    }

    /// Translate the mask by `(dx, dy)`: the output cell `(x, y)` takes the
    /// value of the source cell `(x - dx, y - dy)`. Vacated cells are clear.
    pub fn shifted(&self, dx: i32, dy: i32) -> Mask {
        let mut out = Mask {
            width: self.width,
            height: self.height,
            wpl: self.wpl,
            data: vec![0u32; self.data.len()],
        };
        for y in 0..self.height as i32 {
            let sy = y - dy;
            if sy < 0 || sy >= self.height as i32 {
                continue;
            }
            let src = self.row(sy as u32);
            let dst_start = y as usize * self.wpl as usize;
            shift_or_row(
                &mut out.data[dst_start..dst_start + self.wpl as usize],
                src,
                dx,
            );
        }
        out.clear_padding();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(Mask::new(0, 5).is_err());
        assert!(Mask::new(5, 0).is_err());
    }

    #[test]
    fn test_get_set_across_word_boundary() {
        // Width 50 exercises a partial last word
        let mut m = Mask::new(50, 3).unwrap();
        m.set(31, 1, true).unwrap();
        m.set(32, 1, true).unwrap();
        m.set(49, 2, true).unwrap();
        assert_eq!(m.get(31, 1), Some(true));
        assert_eq!(m.get(32, 1), Some(true));
        assert_eq!(m.get(49, 2), Some(true));
        assert_eq!(m.get(33, 1), Some(false));
        assert_eq!(m.get(50, 0), None);
        assert_eq!(m.count(), 3);
    }

    #[test]
    fn test_fill_keeps_padding_clear() {
        let mut m = Mask::new(50, 4).unwrap();
        m.fill(true);
        assert_eq!(m.count(), 200);
        // Last word of every row has 18 padding bits; they must stay clear
        for y in 0..4 {
            assert_eq!(m.row(y)[1] & 0x0000_3fff, 0);
        }
    }

    #[test]
    fn test_complement_is_involution() {
        let mut m = Mask::new(37, 5).unwrap();
        m.set(0, 0, true).unwrap();
        m.set(36, 4, true).unwrap();
        m.set(20, 2, true).unwrap();
        let back = m.complemented().complemented();
        assert!(back.equals(&m));
        assert_eq!(m.complemented().count(), 37 * 5 - 3);
    }

    #[test]
    fn test_logical_ops() {
        let mut a = Mask::new(10, 2).unwrap();
        let mut b = Mask::new(10, 2).unwrap();
        a.set(1, 0, true).unwrap();
        a.set(2, 0, true).unwrap();
        b.set(2, 0, true).unwrap();
        b.set(3, 1, true).unwrap();

        let mut and = a.clone();
        and.and_assign(&b).unwrap();
        assert_eq!(and.count(), 1);
        assert_eq!(and.get(2, 0), Some(true));

        let mut or = a.clone();
        or.or_assign(&b).unwrap();
        assert_eq!(or.count(), 3);

        let mut xor = a.clone();
        xor.xor_assign(&b).unwrap();
        assert_eq!(xor.count(), 2);
        assert_eq!(xor.get(2, 0), Some(false));
    }

    #[test]
    fn test_logical_ops_reject_dimension_mismatch() {
        let mut a = Mask::new(10, 2).unwrap();
        let b = Mask::new(11, 2).unwrap();
        assert!(a.and_assign(&b).is_err());
    }

    #[test]
    fn test_shifted_translation() {
        let mut m = Mask::new(40, 6).unwrap();
        m.set(5, 2, true).unwrap();
        m.set(33, 3, true).unwrap();

        let s = m.shifted(2, 1);
        assert_eq!(s.count(), 2);
        assert_eq!(s.get(7, 3), Some(true));
        assert_eq!(s.get(35, 4), Some(true));

        // Shifting out of bounds drops cells
        let far = m.shifted(-6, 0);
        assert_eq!(far.count(), 1);
        assert_eq!(far.get(27, 3), Some(true));
    }

    #[test]
    fn test_shifted_zero_is_identity() {
        let mut m = Mask::new(33, 4).unwrap();
        m.set(32, 0, true).unwrap();
        m.set(0, 3, true).unwrap();
        assert!(m.shifted(0, 0).equals(&m));
    }
}
