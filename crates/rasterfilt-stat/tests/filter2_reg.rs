//! Fast-path and invalid-mask regression test
//!
//! Compares the summed-area-table mean/stddev against their exact
//! counterparts, checks the convolution/mean equivalence, and exercises
//! invalid-cell exclusion and no-data propagation.
//!
//! Run with:
//! ```
//! cargo test -p rasterfilt-stat --test filter2_reg
//! ```

use rasterfilt_core::{BorderMode, Image, Mask, PixelType};
use rasterfilt_morph::StructuringElement;
use rasterfilt_stat::{FilterKernel, StatFilter, WeightWindow, filter_image};
use rasterfilt_test::{RegParams, random_image, random_mask};

const W: u32 = 60;
const H: u32 = 45;

fn run(src: &Image, kernel: FilterKernel<'_>, filter: StatFilter, border: BorderMode) -> Image {
    let (w, h) = (src.width(), src.height());
    let mut dst = Image::new(w, h, src.pixel_type()).expect("valid dimensions");
    filter_image(&mut dst, src, kernel, filter, border).expect("filter failed");
    dst
}

fn with_invalid(mut img: Image, density: f64, seed: u64) -> Image {
    let inv = random_mask(img.width(), img.height(), density, seed);
    img.set_invalid(inv).expect("same dimensions");
    img
}

#[test]
fn fast_paths_reg() {
    let mut rp = RegParams::new("fast_paths");

    let el = StructuringElement::full(7, 5).expect("valid element");
    for src in [
        random_image(W, H, -100.0, 100.0, 5),
        with_invalid(random_image(W, H, -100.0, 100.0, 5), 0.2, 6),
    ] {
        let kernel = FilterKernel::Element(&el);

        // SAT mean agrees with the exact mean to accumulation error
        let exact = run(&src, kernel, StatFilter::Mean, BorderMode::Zero);
        let fast = run(&src, kernel, StatFilter::MeanFast, BorderMode::Zero);
        rp.compare_images(&fast, &exact, 1e-8);

        // The one-pass variance formula loses more precision
        let exact = run(&src, kernel, StatFilter::StdDev, BorderMode::Zero);
        let fast = run(&src, kernel, StatFilter::StdDevFast, BorderMode::Zero);
        rp.compare_images(&fast, &exact, 1e-6);
    }

    assert!(rp.cleanup());
}

#[test]
fn convolution_mean_equivalence_reg() {
    let mut rp = RegParams::new("convolution_mean_equivalence");

    // Scaled convolution with a uniform window is a windowed mean
    let src = random_image(W, H, 0.0, 50.0, 23);
    let el = StructuringElement::full(5, 5).expect("valid element");
    let win = WeightWindow::uniform(5, 5).expect("valid window");

    let mean = run(
        &src,
        FilterKernel::Element(&el),
        StatFilter::Mean,
        BorderMode::Copy,
    );
    let conv = run(
        &src,
        FilterKernel::Weights(&win),
        StatFilter::LinearConvolutionScaled,
        BorderMode::Copy,
    );
    rp.compare_images(&conv, &mean, 1e-9);

    // The equivalence survives invalid cells: both paths divide by the
    // per-window valid count
    let src = with_invalid(src, 0.15, 24);
    let mean = run(
        &src,
        FilterKernel::Element(&el),
        StatFilter::Mean,
        BorderMode::Zero,
    );
    let conv = run(
        &src,
        FilterKernel::Weights(&win),
        StatFilter::LinearConvolutionScaled,
        BorderMode::Zero,
    );
    rp.compare_images(&conv, &mean, 1e-9);

    assert!(rp.cleanup());
}

#[test]
fn no_data_propagation_reg() {
    let mut rp = RegParams::new("no_data_propagation");

    // A fully invalid 5x5 patch leaves its central cell with no valid
    // sample under a 3x3 window; that cell must come back flagged and
    // zeroed, its neighbors unflagged.
    let mut src = random_image(W, H, 1.0, 2.0, 31);
    let mut inv = Mask::new(W, H).expect("valid dimensions");
    for y in 20..25 {
        for x in 30..35 {
            inv.set_unchecked(x, y, true);
        }
    }
    src.set_invalid(inv).expect("same dimensions");

    let el = StructuringElement::full(3, 3).expect("valid element");
    for filter in [StatFilter::Median, StatFilter::Mean, StatFilter::MeanFast] {
        let dst = run(&src, FilterKernel::Element(&el), filter, BorderMode::Zero);
        let flagged = dst.is_invalid(32, 22);
        let value = dst.get_f64(32, 22).expect("in bounds");
        rp.compare_values(1.0, flagged as u8 as f64, 0.0);
        rp.compare_values(0.0, value, 0.0);
        // One step outside the dead zone there is at least one sample,
        // and every source value is >= 1
        rp.compare_values(0.0, dst.is_invalid(29, 22) as u8 as f64, 0.0);
        let neighbor = dst.get_f64(29, 22).expect("in bounds");
        rp.compare_values(1.0, (neighbor >= 1.0) as u8 as f64, 0.0);
    }

    // StdDev also flags windows that end up with fewer than two samples
    let dst = run(
        &src,
        FilterKernel::Element(&el),
        StatFilter::StdDev,
        BorderMode::Zero,
    );
    rp.compare_values(1.0, dst.is_invalid(32, 22) as u8 as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn full_recompute_reg() {
    let mut rp = RegParams::new("full_recompute");

    // FullRecompute equals cropped processing of the replicate-extended
    // source
    let src = random_image(30, 20, -5.0, 5.0, 77);
    let el = StructuringElement::full(5, 3).expect("valid element");

    let recomputed = run(
        &src,
        FilterKernel::Element(&el),
        StatFilter::Mean,
        BorderMode::FullRecompute,
    );

    let extended = src.extended(2, 1).expect("valid extension");
    let mut cropped = Image::new(30, 20, PixelType::Double).expect("valid dimensions");
    filter_image(
        &mut cropped,
        &extended,
        FilterKernel::Element(&el),
        StatFilter::Mean,
        BorderMode::Crop,
    )
    .expect("filter failed");

    rp.compare_images(&recomputed, &cropped, 0.0);

    // Interior cells agree with the equal-dimension modes
    let zeroed = run(
        &src,
        FilterKernel::Element(&el),
        StatFilter::Mean,
        BorderMode::Zero,
    );
    let mut mismatches = 0u32;
    for y in 1..19 {
        for x in 2..28 {
            let a = recomputed.get_f64(x, y).expect("in bounds");
            let b = zeroed.get_f64(x, y).expect("in bounds");
            if (a - b).abs() > 0.0 {
                mismatches += 1;
            }
        }
    }
    rp.compare_values(0.0, mismatches as f64, 0.0);

    assert!(rp.cleanup());
}
