//! rasterfilt-core - Raster containers for the windowed filtering engine
//!
//! This crate provides the data structures shared by the morphological and
//! statistical filter crates:
//!
//! - [`Mask`] - binary raster, bit-packed in 32-bit words
//! - [`Raster<T>`] / [`Pixel`] - generic scalar raster and its element trait
//! - [`Image`] / [`PixelType`] - runtime-tagged scalar raster with an
//!   optional invalid-cell mask
//! - [`BorderMode`] - the five border policies of windowed filtering
//! - [`rowops`] - word-level row kernels for bit-packed rasters
//!
//! The engine crates hold no state between calls; every container here is
//! a plain value.

pub mod border;
pub mod error;
pub mod image;
pub mod mask;
pub mod raster;
pub mod rowops;

pub use border::BorderMode;
pub use error::{Error, Result};
pub use image::{Image, ImageData, PixelType};
pub use mask::Mask;
pub use raster::{Pixel, Raster};
