//! Error types for rasterfilt-core
//!
//! Provides a unified error type for the container crate. Each variant
//! captures enough context for diagnostics without exposing internal
//! representation details.

use crate::image::PixelType;
use thiserror::Error;

/// Core container error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Buffer length does not match the declared dimensions
    #[error("buffer length mismatch: {len} elements for a {width}x{height} raster")]
    BufferLengthMismatch { len: usize, width: u32, height: u32 },

    /// Cell coordinates out of bounds
    #[error("cell ({x},{y}) out of bounds for {width}x{height} raster")]
    IndexOutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    /// Raster dimension mismatch between two operands
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Pixel type mismatch between two scalar rasters
    #[error("pixel type mismatch: expected {expected:?}, got {actual:?}")]
    PixelTypeMismatch {
        expected: PixelType,
        actual: PixelType,
    },
}

/// Result type alias for core container operations
pub type Result<T> = std::result::Result<T, Error>;
