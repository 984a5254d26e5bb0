//! Scalar raster with a runtime pixel-type tag
//!
//! An [`Image`] is a [`Raster`] of one of the supported element types
//! (`i32`, `f32`, `f64`), tagged so a caller can pick the algorithm at the
//! call boundary, plus an optional invalid-cell mask. The filtering engine
//! excludes invalid cells from every windowed statistic and records
//! "no data" output cells in the destination's mask.

use crate::error::{Error, Result};
use crate::mask::Mask;
use crate::raster::{Pixel, Raster};

/// Element type tag of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    /// 32-bit signed integer cells
    Int,
    /// 32-bit floating point cells
    Float,
    /// 64-bit floating point cells
    Double,
}

/// Typed storage of an [`Image`].
#[derive(Debug, Clone)]
pub enum ImageData {
    Int(Raster<i32>),
    Float(Raster<f32>),
    Double(Raster<f64>),
}

impl ImageData {
    /// Element type tag.
    pub fn pixel_type(&self) -> PixelType {
        match self {
            ImageData::Int(_) => PixelType::Int,
            ImageData::Float(_) => PixelType::Float,
            ImageData::Double(_) => PixelType::Double,
        }
    }

    fn width(&self) -> u32 {
        match self {
            ImageData::Int(r) => r.width(),
            ImageData::Float(r) => r.width(),
            ImageData::Double(r) => r.width(),
        }
    }

    fn height(&self) -> u32 {
        match self {
            ImageData::Int(r) => r.height(),
            ImageData::Float(r) => r.height(),
            ImageData::Double(r) => r.height(),
        }
    }
}

/// A scalar raster tagged with its element type, optionally carrying an
/// invalid-cell mask (bit set = cell excluded from statistics).
#[derive(Debug, Clone)]
pub struct Image {
    data: ImageData,
    invalid: Option<Mask>,
}

impl Image {
    /// Create a zero-filled image of the given type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is 0.
    pub fn new(width: u32, height: u32, pixel_type: PixelType) -> Result<Self> {
        let data = match pixel_type {
            PixelType::Int => ImageData::Int(Raster::new(width, height)?),
            PixelType::Float => ImageData::Float(Raster::new(width, height)?),
            PixelType::Double => ImageData::Double(Raster::new(width, height)?),
        };
        Ok(Image {
            data,
            invalid: None,
        })
    }

    /// Image width in cells.
    #[inline]
    pub fn width(&self) -> u32 {
        self.data.width()
    }

    /// Image height in cells.
    #[inline]
    pub fn height(&self) -> u32 {
        self.data.height()
    }

    /// Element type tag.
    #[inline]
    pub fn pixel_type(&self) -> PixelType {
        self.data.pixel_type()
    }

    /// Typed storage.
    #[inline]
    pub fn data(&self) -> &ImageData {
        &self.data
    }

    /// Mutable typed storage.
    #[inline]
    pub fn data_mut(&mut self) -> &mut ImageData {
        &mut self.data
    }

    /// Split borrow of the typed storage and the invalid-mask slot.
    #[inline]
    pub fn parts_mut(&mut self) -> (&mut ImageData, &mut Option<Mask>) {
        (&mut self.data, &mut self.invalid)
    }

    /// The invalid-cell mask, if any.
    #[inline]
    pub fn invalid(&self) -> Option<&Mask> {
        self.invalid.as_ref()
    }

    /// Attach an invalid-cell mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the mask dimensions differ
    /// from the image dimensions.
    pub fn set_invalid(&mut self, mask: Mask) -> Result<()> {
        if mask.width() != self.width() || mask.height() != self.height() {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (mask.width(), mask.height()),
            });
        }
        self.invalid = Some(mask);
        Ok(())
    }

    /// Detach and return the invalid-cell mask.
    pub fn take_invalid(&mut self) -> Option<Mask> {
        self.invalid.take()
    }

    /// Whether the cell at (x, y) is flagged invalid.
    #[inline]
    pub fn is_invalid(&self, x: u32, y: u32) -> bool {
        self.invalid
            .as_ref()
            .is_some_and(|m| m.get(x, y).unwrap_or(false))
    }

    /// Get the cell at (x, y) widened to `f64`, or `None` when out of bounds.
    pub fn get_f64(&self, x: u32, y: u32) -> Option<f64> {
        match &self.data {
            ImageData::Int(r) => r.get(x, y).map(Pixel::to_f64),
            ImageData::Float(r) => r.get(x, y).map(Pixel::to_f64),
            ImageData::Double(r) => r.get(x, y),
        }
    }

    /// Set the cell at (x, y) from an `f64` value, narrowing to the element
    /// type (rounding for integer images).
    pub fn set_f64(&mut self, x: u32, y: u32, value: f64) -> Result<()> {
        match &mut self.data {
            ImageData::Int(r) => r.set(x, y, i32::from_f64(value)),
            ImageData::Float(r) => r.set(x, y, f32::from_f64(value)),
            ImageData::Double(r) => r.set(x, y, value),
        }
    }

    /// Build a copy extended by `hx` cells on the left and right and `hy`
    /// cells on the top and bottom, filling the new border by replicating
    /// the nearest edge cell. The invalid mask, if present, is extended the
    /// same way.
    pub fn extended(&self, hx: u32, hy: u32) -> Result<Image> {
        let data = match &self.data {
            ImageData::Int(r) => ImageData::Int(extend_raster(r, hx, hy)?),
            ImageData::Float(r) => ImageData::Float(extend_raster(r, hx, hy)?),
            ImageData::Double(r) => ImageData::Double(extend_raster(r, hx, hy)?),
        };
        let invalid = match &self.invalid {
            Some(m) => Some(extend_mask(m, hx, hy)?),
            None => None,
        };
        Ok(Image { data, invalid })
    }
}

impl From<Raster<i32>> for Image {
    fn from(r: Raster<i32>) -> Self {
        Image {
            data: ImageData::Int(r),
            invalid: None,
        }
    }
}

impl From<Raster<f32>> for Image {
    fn from(r: Raster<f32>) -> Self {
        Image {
            data: ImageData::Float(r),
            invalid: None,
        }
    }
}

impl From<Raster<f64>> for Image {
    fn from(r: Raster<f64>) -> Self {
        Image {
            data: ImageData::Double(r),
            invalid: None,
        }
    }
}

fn extend_raster<T: Pixel>(src: &Raster<T>, hx: u32, hy: u32) -> Result<Raster<T>> {
    let w = src.width();
    let h = src.height();
    let mut out = Raster::new(w + 2 * hx, h + 2 * hy)?;
    for y in 0..h + 2 * hy {
        let sy = (y as i64 - hy as i64).clamp(0, h as i64 - 1) as u32;
        for x in 0..w + 2 * hx {
            let sx = (x as i64 - hx as i64).clamp(0, w as i64 - 1) as u32;
            out.set_unchecked(x, y, src.get_unchecked(sx, sy));
        }
    }
    Ok(out)
}

fn extend_mask(src: &Mask, hx: u32, hy: u32) -> Result<Mask> {
    let w = src.width();
    let h = src.height();
    let mut out = Mask::new(w + 2 * hx, h + 2 * hy)?;
    for y in 0..h + 2 * hy {
        let sy = (y as i64 - hy as i64).clamp(0, h as i64 - 1) as u32;
        for x in 0..w + 2 * hx {
            let sx = (x as i64 - hx as i64).clamp(0, w as i64 - 1) as u32;
            if src.get_unchecked(sx, sy) {
                out.set_unchecked(x, y, true);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_type_tag() {
        let img = Image::new(4, 3, PixelType::Float).unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 3);
        assert_eq!(img.pixel_type(), PixelType::Float);
        assert!(img.invalid().is_none());
    }

    #[test]
    fn test_set_invalid_dimension_check() {
        let mut img = Image::new(4, 3, PixelType::Int).unwrap();
        assert!(img.set_invalid(Mask::new(4, 4).unwrap()).is_err());
        assert!(img.set_invalid(Mask::new(4, 3).unwrap()).is_ok());
    }

    #[test]
    fn test_f64_roundtrip_rounds_for_int() {
        let mut img = Image::new(2, 1, PixelType::Int).unwrap();
        img.set_f64(0, 0, 2.6).unwrap();
        assert_eq!(img.get_f64(0, 0), Some(3.0));
    }

    #[test]
    fn test_extended_replicates_edges() {
        let mut img = Image::new(3, 2, PixelType::Double).unwrap();
        // 1 2 3
        // 4 5 6
        for (i, v) in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0].iter().enumerate() {
            img.set_f64(i as u32 % 3, i as u32 / 3, *v).unwrap();
        }
        let ext = img.extended(2, 1).unwrap();
        assert_eq!(ext.width(), 7);
        assert_eq!(ext.height(), 4);
        // Top-left corner replicates cell (0,0)
        assert_eq!(ext.get_f64(0, 0), Some(1.0));
        assert_eq!(ext.get_f64(1, 0), Some(1.0));
        // Interior preserved
        assert_eq!(ext.get_f64(3, 1), Some(2.0));
        // Bottom-right corner replicates cell (2,1)
        assert_eq!(ext.get_f64(6, 3), Some(6.0));
    }

    #[test]
    fn test_extended_carries_invalid_mask() {
        let mut img = Image::new(3, 3, PixelType::Float).unwrap();
        let mut bad = Mask::new(3, 3).unwrap();
        bad.set(0, 0, true).unwrap();
        img.set_invalid(bad).unwrap();

        let ext = img.extended(1, 1).unwrap();
        let bad = ext.invalid().unwrap();
        // The invalid corner replicates into the synthetic border
        assert_eq!(bad.get(0, 0), Some(true));
        assert_eq!(bad.get(1, 1), Some(true));
        assert_eq!(bad.get(2, 2), Some(false));
    }
}
