//! Binary morphology for rasterfilt
//!
//! Erosion, dilation, opening and closing on bit-packed masks with
//! arbitrary odd-sized structuring elements.
//!
//! # Examples
//!
//! ```
//! use rasterfilt_core::{BorderMode, Mask};
//! use rasterfilt_morph::{filter_mask, MorphFilter, StructuringElement};
//!
//! let mut src = Mask::new(16, 16)?;
//! for y in 4..12 {
//!     for x in 4..12 {
//!         src.set(x, y, true)?;
//!     }
//! }
//! let element = StructuringElement::full(3, 3)?;
//! let mut dst = Mask::new(16, 16)?;
//! filter_mask(&mut dst, &src, &element, MorphFilter::Erosion, BorderMode::Zero)?;
//! assert_eq!(dst.count(), 36); // 8x8 block eroded to 6x6
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod element;
pub mod error;

pub use binary::{filter_mask, filter_mask_in_place, MorphFilter};
pub use element::{StructuringElement, MAX_SIZE};
pub use error::{MorphError, MorphResult};
