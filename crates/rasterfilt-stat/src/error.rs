//! Error types for rasterfilt-stat

use crate::filter::StatFilter;
use rasterfilt_core::BorderMode;
use thiserror::Error;

/// Errors that can occur during statistical filtering
#[derive(Debug, Error)]
pub enum StatError {
    /// Core container error
    #[error("core error: {0}")]
    Core(#[from] rasterfilt_core::Error),

    /// Kernel dimensions are even, zero, or above the maximum
    #[error("invalid kernel shape: {width}x{height} (sizes must be odd and at most {max})")]
    InvalidKernelShape { width: u32, height: u32, max: u32 },

    /// Kernel has no active cell / no nonzero weight
    #[error("kernel has no active cell")]
    EmptyKernel,

    /// Filter, kernel kind and border mode do not combine
    #[error("{filter:?} is not supported with border mode {border:?} and the given kernel")]
    UnsupportedMode {
        filter: StatFilter,
        border: BorderMode,
    },

    /// Source image cannot hold a single full window
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

    /// The kernel cannot yield enough samples for the statistic
    #[error("{filter:?} needs at least {needed} samples per window, kernel provides {provided}")]
    InsufficientSamples {
        filter: StatFilter,
        needed: usize,
        provided: usize,
    },
}

/// Result type for statistical filtering
pub type StatResult<T> = Result<T, StatError>;
