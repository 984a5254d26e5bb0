//! rasterfilt-test - Regression test support for the rasterfilt workspace
//!
//! Provides [`RegParams`], a small comparison harness that accumulates
//! failures across a regression test and reports them at the end, plus
//! deterministic raster builders shared by the integration tests.
//!
//! # Usage
//!
//! ```
//! use rasterfilt_test::{two_block_mask, RegParams};
//!
//! let mut rp = RegParams::new("example");
//! rp.compare_values(86.0, two_block_mask().count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod builders;
mod params;

pub use builders::{gradient_image, random_image, random_mask, two_block_mask};
pub use params::RegParams;
