//! Statistical and convolution filters for rasterfilt
//!
//! Sliding-window median, mean and standard deviation over boolean
//! structuring elements, plus linear and rank-weighted convolution over
//! real weight windows. All five border modes are supported, including
//! cropping and replicate-extended recomputation.
//!
//! # Examples
//!
//! ```
//! use rasterfilt_core::{BorderMode, Image, ImageData, PixelType, Raster};
//! use rasterfilt_morph::StructuringElement;
//! use rasterfilt_stat::{filter_image, FilterKernel, StatFilter};
//!
//! let src = Image::from(Raster::from_vec(5, 1, vec![9.0f64, 1.0, 3.0, 7.0, 5.0])?);
//! let element = StructuringElement::full(3, 1)?;
//! let mut dst = Image::new(3, 1, PixelType::Double)?;
//! filter_image(
//!     &mut dst,
//!     &src,
//!     FilterKernel::Element(&element),
//!     StatFilter::Median,
//!     BorderMode::Crop,
//! )?;
//! if let ImageData::Double(r) = dst.data() {
//!     assert_eq!(r.as_slice(), &[3.0, 3.0, 5.0]);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod filter;
mod sat;
pub mod stats;
pub mod window;

pub use error::{StatError, StatResult};
pub use filter::{filter_image, FilterKernel, StatFilter};
pub use window::WeightWindow;
