//! rasterfilt - windowed raster filtering
//!
//! A filtering engine over two kinds of 2D arrays: bit-packed binary masks
//! and scalar images (integer, float or double, optionally carrying an
//! invalid-cell mask).
//!
//! # Overview
//!
//! - Binary morphology: erosion, dilation, opening and closing with
//!   arbitrary odd-sized structuring elements
//! - Statistical filters: windowed median, mean and standard deviation
//!   (with summed-area-table fast paths), linear and rank-weighted
//!   convolution
//! - Five border policies: leave, zero, copy, crop, or recompute over a
//!   replicate-extended source
//!
//! # Example
//!
//! ```
//! use rasterfilt::{BorderMode, Mask};
//! use rasterfilt::morph::{filter_mask, MorphFilter, StructuringElement};
//!
//! let mut noisy = Mask::new(32, 32).unwrap();
//! noisy.set(16, 16, true).unwrap(); // isolated speck
//! let element = StructuringElement::full(3, 3).unwrap();
//! let mut cleaned = Mask::new(32, 32).unwrap();
//! filter_mask(
//!     &mut cleaned,
//!     &noisy,
//!     &element,
//!     MorphFilter::Opening,
//!     BorderMode::Zero,
//! )
//! .unwrap();
//! assert_eq!(cleaned.count(), 0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rasterfilt_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rasterfilt_morph as morph;
pub use rasterfilt_stat as stat;
