//! Border policy for windowed filters
//!
//! An odd `mx x my` window with half-sizes `(hx, hy)` only has a fully
//! in-bounds window for destination cells with `hx <= x < nx - hx` and
//! `hy <= y < ny - hy` (the interior). The border mode decides what
//! happens to the remaining ring of cells.

/// How a windowed filter treats the destination border ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderMode {
    /// Only interior cells are written; the destination border is left
    /// exactly as the caller supplied it.
    NoOp,
    /// Interior computed; border cells forced to the filter's zero value
    /// (clear for masks, 0 for images).
    Zero,
    /// Interior computed; border cells copied verbatim from the source.
    Copy,
    /// The destination is `(nx - 2*hx) x (ny - 2*hy)`: only interior
    /// results are produced and no border ring exists.
    Crop,
    /// The source is extended with `hx`/`hy` synthetic replicated cells on
    /// every side and all `nx x ny` cells are computed, former border
    /// cells included.
    FullRecompute,
}

impl BorderMode {
    /// Whether this mode is legal for the morphological filter family.
    ///
    /// Morphology writes in the source geometry only: cropping and
    /// synthetic recomputation are statistical-family concepts.
    pub fn supported_by_morphology(self) -> bool {
        matches!(self, BorderMode::NoOp | BorderMode::Zero | BorderMode::Copy)
    }

    /// Whether this mode is legal for the statistical filter family.
    pub fn supported_by_statistics(self) -> bool {
        true
    }

    /// Expected destination dimensions for a source of `nx x ny` filtered
    /// with window half-sizes `(hx, hy)` under this mode, or `None` when
    /// the source is too small to hold one full window.
    pub fn output_dims(self, nx: u32, ny: u32, hx: u32, hy: u32) -> Option<(u32, u32)> {
        if nx < 2 * hx + 1 || ny < 2 * hy + 1 {
            return None;
        }
        match self {
            BorderMode::Crop => Some((nx - 2 * hx, ny - 2 * hy)),
            _ => Some((nx, ny)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_morphology_support() {
        assert!(BorderMode::NoOp.supported_by_morphology());
        assert!(BorderMode::Zero.supported_by_morphology());
        assert!(BorderMode::Copy.supported_by_morphology());
        assert!(!BorderMode::Crop.supported_by_morphology());
        assert!(!BorderMode::FullRecompute.supported_by_morphology());
    }

    #[test]
    fn test_output_dims() {
        assert_eq!(BorderMode::Crop.output_dims(21, 18, 1, 1), Some((19, 16)));
        assert_eq!(BorderMode::Zero.output_dims(21, 18, 1, 1), Some((21, 18)));
        assert_eq!(
            BorderMode::FullRecompute.output_dims(10, 10, 2, 3),
            Some((10, 10))
        );
        // Source smaller than the window
        assert_eq!(BorderMode::Crop.output_dims(4, 4, 2, 2), None);
    }
}
