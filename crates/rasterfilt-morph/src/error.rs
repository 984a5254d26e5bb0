//! Error types for rasterfilt-morph

use crate::binary::MorphFilter;
use rasterfilt_core::BorderMode;
use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core container error
    #[error("core error: {0}")]
    Core(#[from] rasterfilt_core::Error),

    /// Structuring element dimensions are even, zero, or above the maximum
    #[error("invalid element shape: {width}x{height} (sizes must be odd and at most {max})")]
    InvalidElementShape { width: u32, height: u32, max: u32 },

    /// Structuring element has no active cell
    #[error("structuring element has no active cell")]
    EmptyElement,

    /// Border mode not legal for the requested filter
    #[error("border mode {border:?} is not supported for {mode:?}")]
    UnsupportedMode {
        mode: MorphFilter,
        border: BorderMode,
    },

    /// Source raster cannot hold a single full window
    #[error("source {}x{} is smaller than the {}x{} window", .raster.0, .raster.1, .window.0, .window.1)]
    SourceTooSmall {
        raster: (u32, u32),
        window: (u32, u32),
    },

    /// Destination dimensions are wrong for the requested filter
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
