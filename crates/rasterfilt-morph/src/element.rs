//! Structuring element for windowed filters
//!
//! An odd-by-odd boolean window. The active cells define the neighborhood
//! a filter reads for each destination cell; offsets are taken relative to
//! the window center. Full windows (every cell active) are detected at
//! construction so the engines can select direct windowed-sum paths.

use crate::{MorphError, MorphResult};

/// Maximum window size per axis, bounding per-call lookup-table cost.
pub const MAX_SIZE: u32 = 31;

/// An odd `mx x my` boolean window with at least one active cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    full: bool,
}

fn check_shape(width: u32, height: u32) -> MorphResult<()> {
    if width == 0
        || height == 0
        || width % 2 == 0
        || height % 2 == 0
        || width > MAX_SIZE
        || height > MAX_SIZE
    {
        return Err(MorphError::InvalidElementShape {
            width,
            height,
            max: MAX_SIZE,
        });
    }
    Ok(())
}

impl StructuringElement {
    /// Create an element from a row-major cell pattern in the window's own
    /// layout (`cells.len() == width * height`).
    ///
    /// # Errors
    ///
    /// [`MorphError::InvalidElementShape`] for even/zero/oversized
    /// dimensions or a wrong buffer length, [`MorphError::EmptyElement`]
    /// when no cell is active.
    pub fn from_pattern(width: u32, height: u32, cells: Vec<bool>) -> MorphResult<Self> {
        check_shape(width, height)?;
        if cells.len() != width as usize * height as usize {
            return Err(MorphError::InvalidElementShape {
                width,
                height,
                max: MAX_SIZE,
            });
        }
        if !cells.iter().any(|&c| c) {
            return Err(MorphError::EmptyElement);
        }
        let full = cells.iter().all(|&c| c);
        Ok(StructuringElement {
            width,
            height,
            cells,
            full,
        })
    }

    /// Create a full (all cells active) rectangular element.
    pub fn full(width: u32, height: u32) -> MorphResult<Self> {
        check_shape(width, height)?;
        Ok(StructuringElement {
            width,
            height,
            cells: vec![true; width as usize * height as usize],
            full: true,
        })
    }

    /// Create an element from a string pattern: one line per window row,
    /// `x` for an active cell, `.` for an inactive one. Lines are trimmed;
    /// all rows must have the same length.
    ///
    /// ```
    /// use rasterfilt_morph::StructuringElement;
    ///
    /// let cross = StructuringElement::from_string(
    ///     ".x.\n\
    ///      xxx\n\
    ///      .x.",
    /// ).unwrap();
    /// assert_eq!(cross.active_count(), 5);
    /// ```
    pub fn from_string(pattern: &str) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        check_shape(width, height)?;

        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in &rows {
            if row.chars().count() as u32 != width {
                return Err(MorphError::InvalidElementShape {
                    width,
                    height,
                    max: MAX_SIZE,
                });
            }
            for c in row.chars() {
                cells.push(c == 'x');
            }
        }
        Self::from_pattern(width, height, cells)
    }

    /// Create the single-cell element whose only active position sits at
    /// offset `(dx, dy)` from the window center. Filtering with it is a
    /// pure translation of the raster by `(-dx, -dy)`.
    pub fn translation(dx: i32, dy: i32) -> MorphResult<Self> {
        let width = 2 * dx.unsigned_abs() + 1;
        let height = 2 * dy.unsigned_abs() + 1;
        check_shape(width, height)?;
        let mut cells = vec![false; width as usize * height as usize];
        let x = (dx.unsigned_abs() as i32 + dx) as u32;
        let y = (dy.unsigned_abs() as i32 + dy) as u32;
        cells[(y * width + x) as usize] = true;
        Ok(StructuringElement {
            width,
            height,
            cells,
            full: width == 1 && height == 1,
        })
    }

    /// Window width (odd).
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Window height (odd).
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal half-size `(width - 1) / 2`.
    #[inline]
    pub fn half_width(&self) -> u32 {
        (self.width - 1) / 2
    }

    /// Vertical half-size `(height - 1) / 2`.
    #[inline]
    pub fn half_height(&self) -> u32 {
        (self.height - 1) / 2
    }

    /// Whether every cell is active.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Number of active cells (always >= 1).
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// The cell at window position (x, y), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.cells[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Iterate over active positions relative to the window center.
    pub fn offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.half_width() as i32;
        let cy = self.half_height() as i32;
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, &active)| {
                if active {
                    let x = (idx as u32 % width) as i32;
                    let y = (idx as u32 / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }

    /// The 180-degree rotation of this element.
    pub fn rotated_180(&self) -> Self {
        let mut cells = self.cells.clone();
        cells.reverse();
        StructuringElement {
            width: self.width,
            height: self.height,
            cells,
            full: self.full,
        }
    }

    /// Whether the element equals its own 180-degree rotation. Duality of
    /// erosion and dilation holds off the border exactly for such elements.
    pub fn is_symmetric_180(&self) -> bool {
        let n = self.cells.len();
        (0..n / 2 + 1).all(|i| self.cells[i] == self.cells[n - 1 - i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_detection() {
        let full = StructuringElement::full(3, 5).unwrap();
        assert!(full.is_full());
        assert_eq!(full.active_count(), 15);
        assert_eq!(full.half_width(), 1);
        assert_eq!(full.half_height(), 2);

        let mut cells = vec![true; 9];
        cells[4] = false;
        let notfull = StructuringElement::from_pattern(3, 3, cells).unwrap();
        assert!(!notfull.is_full());
    }

    #[test]
    fn test_shape_validation() {
        assert!(StructuringElement::full(4, 3).is_err());
        assert!(StructuringElement::full(3, 0).is_err());
        assert!(StructuringElement::full(33, 3).is_err());
        assert!(StructuringElement::full(31, 31).is_ok());
    }

    #[test]
    fn test_empty_element_rejected() {
        let err = StructuringElement::from_pattern(3, 3, vec![false; 9]).unwrap_err();
        assert!(matches!(err, MorphError::EmptyElement));
    }

    #[test]
    fn test_from_string_cross() {
        let cross = StructuringElement::from_string(
            ".x.\n\
             xxx\n\
             .x.",
        )
        .unwrap();
        assert_eq!(cross.width(), 3);
        assert_eq!(cross.height(), 3);
        assert_eq!(cross.active_count(), 5);
        assert!(cross.is_symmetric_180());

        let mut offsets: Vec<_> = cross.offsets().collect();
        offsets.sort();
        assert_eq!(offsets, vec![(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_from_string_ragged_rejected() {
        assert!(StructuringElement::from_string("xx.\nx.\nxxx").is_err());
    }

    #[test]
    fn test_translation_element() {
        let t = StructuringElement::translation(2, -1).unwrap();
        assert_eq!(t.width(), 5);
        assert_eq!(t.height(), 3);
        assert_eq!(t.active_count(), 1);
        let offsets: Vec<_> = t.offsets().collect();
        assert_eq!(offsets, vec![(2, -1)]);
    }

    #[test]
    fn test_rotation_symmetry() {
        let asym = StructuringElement::from_string(
            "xx.\n\
             .x.\n\
             ...",
        )
        .unwrap();
        assert!(!asym.is_symmetric_180());
        let rot = asym.rotated_180();
        let mut offsets: Vec<_> = rot.offsets().collect();
        offsets.sort();
        assert_eq!(offsets, vec![(0, 0), (0, 1), (1, 1)]);
        assert!(asym.rotated_180().rotated_180() == asym);
    }
}
