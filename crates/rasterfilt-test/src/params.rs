//! Regression test parameters and comparisons

use rasterfilt_core::{Image, Mask};

/// Tracks the state of one regression test: a name, a running comparison
/// index and the accumulated failures.
pub struct RegParams {
    /// Name of the test (e.g., "maskmorph1")
    pub test_name: String,
    /// Current comparison index (incremented before each comparison)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current comparison index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value (typically from a reference path)
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two masks for exact equality
    pub fn compare_masks(&mut self, mask1: &Mask, mask2: &Mask) -> bool {
        self.index += 1;

        if mask1.width() != mask2.width() || mask1.height() != mask2.height() {
            self.fail(format!(
                "Failure in {}_reg: mask comparison for index {} - dimension mismatch",
                self.test_name, self.index
            ));
            return false;
        }

        for y in 0..mask1.height() {
            for x in 0..mask1.width() {
                if mask1.get_unchecked(x, y) != mask2.get_unchecked(x, y) {
                    self.fail(format!(
                        "Failure in {}_reg: mask comparison for index {} - cell mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    ));
                    return false;
                }
            }
        }

        true
    }

    /// Compare two images cell by cell within a per-cell tolerance.
    ///
    /// Pixel types, dimensions and invalid-cell flags must all agree;
    /// values of cells flagged invalid in both images are not compared.
    pub fn compare_images(&mut self, image1: &Image, image2: &Image, delta: f64) -> bool {
        self.index += 1;

        if image1.width() != image2.width()
            || image1.height() != image2.height()
            || image1.pixel_type() != image2.pixel_type()
        {
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - shape mismatch",
                self.test_name, self.index
            ));
            return false;
        }

        for y in 0..image1.height() {
            for x in 0..image1.width() {
                let inv1 = image1.is_invalid(x, y);
                let inv2 = image2.is_invalid(x, y);
                if inv1 != inv2 {
                    self.fail(format!(
                        "Failure in {}_reg: image comparison for index {} - invalid flag mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    ));
                    return false;
                }
                if inv1 {
                    continue;
                }
                let (Some(v1), Some(v2)) = (image1.get_f64(x, y), image2.get_f64(x, y)) else {
                    self.fail(format!(
                        "Failure in {}_reg: image comparison for index {} - no value at ({}, {})",
                        self.test_name, self.index, x, y
                    ));
                    return false;
                };
                if (v1 - v2).abs() > delta {
                    self.fail(format!(
                        "Failure in {}_reg: image comparison for index {} at ({}, {})\n\
                         expected = {}, actual = {}, allowed delta = {}",
                        self.test_name, self.index, x, y, v1, v2, delta
                    ));
                    return false;
                }
            }
        }

        true
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
