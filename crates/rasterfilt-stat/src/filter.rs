//! Windowed statistical filtering of scalar images
//!
//! One validated entry point, [`filter_image`], covering the order
//! statistics (median), the moments (mean, standard deviation, with SAT
//! fast paths), and the weighted filters (linear and rank-weighted
//! convolution).
//!
//! All arithmetic runs in f64 regardless of the pixel type; results are
//! written back through [`Pixel::from_f64`]. Cells flagged in the source
//! invalid mask are excluded from every statistic. A window with no usable
//! sample writes zero and flags the destination cell in the destination
//! invalid mask.

use crate::sat::Sat;
use crate::stats::{mean_of_samples, median_of_samples, stddev_of_samples};
use crate::window::WeightWindow;
use crate::{StatError, StatResult};
use rasterfilt_core::{BorderMode, Image, ImageData, Mask, Pixel, Raster};
use rasterfilt_morph::StructuringElement;

/// Statistical filter selector.
///
/// The `Fast` variants are summed-area-table implementations of their
/// exact counterparts; they require a full (all-active) element and agree
/// with the exact paths up to floating-point accumulation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatFilter {
    /// Window median; even sample counts average the two middle values
    Median,
    /// Window arithmetic mean
    Mean,
    /// Mean via summed-area table, full elements only
    MeanFast,
    /// Sample standard deviation (n-1 denominator)
    StdDev,
    /// Standard deviation via value and square tables, full elements only
    StdDevFast,
    /// Weighted sum over the window
    LinearConvolution,
    /// Weighted sum divided by the effective weight sum
    LinearConvolutionScaled,
    /// Weights applied to the sorted window samples
    Morpho,
    /// Rank-weighted sum divided by the effective weight sum
    MorphoScaled,
}

/// Kernel argument of [`filter_image`].
///
/// The statistic family decides the kind: Median / Mean / StdDev (and
/// their fast variants) take a boolean [`StructuringElement`], the
/// convolution family takes a real [`WeightWindow`].
#[derive(Debug, Clone, Copy)]
pub enum FilterKernel<'a> {
    Element(&'a StructuringElement),
    Weights(&'a WeightWindow),
}

/// Destination rows are processed in fixed blocks; the block size has no
/// effect on results.
const ROW_BLOCK: u32 = 32;

/// Apply a statistical filter to `src`, writing into `dst`.
///
/// `dst` and `src` must carry the same pixel type. The destination must be
/// `(nx - 2hx) x (ny - 2hy)` for [`BorderMode::Crop`] and match the source
/// otherwise; the source must be at least as large as the window.
///
/// Validation happens before any write to `dst`: on error the destination
/// values and its invalid mask are untouched. On success the destination's
/// previous invalid mask is replaced (border-ring flags survive under NoOp
/// and are copied from the source under Copy).
///
/// # Errors
///
/// [`StatError::UnsupportedMode`] for a kernel kind that does not fit the
/// filter or a fast variant with a non-full element,
/// [`rasterfilt_core::Error::PixelTypeMismatch`] (via `Core`) for mixed
/// pixel types, [`StatError::DimensionMismatch`] for wrong shapes, and
/// [`StatError::InsufficientSamples`] for a StdDev element with fewer than
/// two active cells.
pub fn filter_image(
    dst: &mut Image,
    src: &Image,
    kernel: FilterKernel<'_>,
    filter: StatFilter,
    border: BorderMode,
) -> StatResult<()> {
    let (kw, kh) = validate_kernel(&kernel, filter, border)?;

    if dst.pixel_type() != src.pixel_type() {
        return Err(rasterfilt_core::Error::PixelTypeMismatch {
            expected: src.pixel_type(),
            actual: dst.pixel_type(),
        }
        .into());
    }

    let hx = (kw - 1) / 2;
    let hy = (kh - 1) / 2;
    let expected = border
        .output_dims(src.width(), src.height(), hx, hy)
        .ok_or(StatError::SourceTooSmall {
            raster: (src.width(), src.height()),
            window: (kw, kh),
        })?;
    if (dst.width(), dst.height()) != expected {
        return Err(StatError::DimensionMismatch {
            expected,
            actual: (dst.width(), dst.height()),
        });
    }

    if matches!(filter, StatFilter::StdDev | StatFilter::StdDevFast) {
        if let FilterKernel::Element(el) = kernel {
            if el.active_count() < 2 {
                return Err(StatError::InsufficientSamples {
                    filter,
                    needed: 2,
                    provided: el.active_count(),
                });
            }
        }
    }

    let op = build_op(&kernel, filter, hx, hy);

    // FullRecompute is Crop over a replicate-extended source.
    let extended;
    let (src_eff, border_eff) = if border == BorderMode::FullRecompute {
        extended = src.extended(hx, hy)?;
        (&extended, BorderMode::Crop)
    } else {
        (src, border)
    };

    // Seed the destination invalid mask: NoOp keeps the caller's border
    // ring, Copy takes the ring from the source, everything else starts
    // clean. Interior flags are always recomputed.
    let mut cand = match border {
        BorderMode::NoOp => dst.take_invalid().map(|mut m| {
            clear_interior(&mut m, hx, hy);
            m
        }),
        BorderMode::Copy => src.invalid().map(|m| {
            let mut m = m.clone();
            clear_interior(&mut m, hx, hy);
            m
        }),
        _ => None,
    };

    let src_invalid = src_eff.invalid();
    let (dst_data, invalid_slot) = dst.parts_mut();
    match (dst_data, src_eff.data()) {
        (ImageData::Int(d), ImageData::Int(s)) => {
            run(d, &mut cand, s, src_invalid, &op, hx, hy, border_eff)
        }
        (ImageData::Float(d), ImageData::Float(s)) => {
            run(d, &mut cand, s, src_invalid, &op, hx, hy, border_eff)
        }
        (ImageData::Double(d), ImageData::Double(s)) => {
            run(d, &mut cand, s, src_invalid, &op, hx, hy, border_eff)
        }
        // Rejected during validation
        _ => unreachable!(),
    }
    *invalid_slot = cand.filter(|m| m.count() > 0);

    Ok(())
}

/// Kernel-kind and fast-path legality; returns the window dimensions.
fn validate_kernel(
    kernel: &FilterKernel<'_>,
    filter: StatFilter,
    border: BorderMode,
) -> StatResult<(u32, u32)> {
    if !border.supported_by_statistics() {
        return Err(StatError::UnsupportedMode { filter, border });
    }
    match kernel {
        FilterKernel::Element(el) => {
            match filter {
                StatFilter::Median | StatFilter::Mean | StatFilter::StdDev => {}
                StatFilter::MeanFast | StatFilter::StdDevFast => {
                    if !el.is_full() {
                        return Err(StatError::UnsupportedMode { filter, border });
                    }
                }
                _ => return Err(StatError::UnsupportedMode { filter, border }),
            }
            Ok((el.width(), el.height()))
        }
        FilterKernel::Weights(w) => {
            if !matches!(
                filter,
                StatFilter::LinearConvolution
                    | StatFilter::LinearConvolutionScaled
                    | StatFilter::Morpho
                    | StatFilter::MorphoScaled
            ) {
                return Err(StatError::UnsupportedMode { filter, border });
            }
            Ok((w.width(), w.height()))
        }
    }
}

/// Per-cell algorithm, with offsets and weights resolved up front.
enum Op {
    Median { offsets: Vec<(i32, i32)> },
    Mean { offsets: Vec<(i32, i32)> },
    MeanFast,
    StdDev { offsets: Vec<(i32, i32)> },
    StdDevFast,
    Convolution { taps: Vec<(i32, i32, f64)>, scaled: bool },
    Morpho { weights: Vec<f64>, scaled: bool },
}

fn build_op(kernel: &FilterKernel<'_>, filter: StatFilter, hx: u32, hy: u32) -> Op {
    match (kernel, filter) {
        (FilterKernel::Element(el), StatFilter::Median) => Op::Median {
            offsets: el.offsets().collect(),
        },
        (FilterKernel::Element(el), StatFilter::Mean) => Op::Mean {
            offsets: el.offsets().collect(),
        },
        (FilterKernel::Element(el), StatFilter::StdDev) => Op::StdDev {
            offsets: el.offsets().collect(),
        },
        (FilterKernel::Element(_), StatFilter::MeanFast) => Op::MeanFast,
        (FilterKernel::Element(_), StatFilter::StdDevFast) => Op::StdDevFast,
        (FilterKernel::Weights(w), StatFilter::LinearConvolution)
        | (FilterKernel::Weights(w), StatFilter::LinearConvolutionScaled) => {
            let mut taps = Vec::with_capacity(w.weights().len());
            let mut i = 0;
            for dy in -(hy as i32)..=hy as i32 {
                for dx in -(hx as i32)..=hx as i32 {
                    taps.push((dx, dy, w.weights()[i]));
                    i += 1;
                }
            }
            Op::Convolution {
                taps,
                scaled: filter == StatFilter::LinearConvolutionScaled,
            }
        }
        (FilterKernel::Weights(w), StatFilter::Morpho)
        | (FilterKernel::Weights(w), StatFilter::MorphoScaled) => Op::Morpho {
            weights: w.weights().to_vec(),
            scaled: filter == StatFilter::MorphoScaled,
        },
        // Kind/filter mismatch rejected during validation
        _ => unreachable!(),
    }
}

/// Per-call state: source views, fast-path tables, sample scratch.
struct Ctx<'a, T: Pixel> {
    src: &'a Raster<T>,
    invalid: Option<&'a Mask>,
    op: &'a Op,
    hx: i32,
    hy: i32,
    full_count: f64,
    sat_values: Option<Sat>,
    sat_squares: Option<Sat>,
    sat_counts: Option<Sat>,
    samples: Vec<f64>,
}

impl<'a, T: Pixel> Ctx<'a, T> {
    fn new(src: &'a Raster<T>, invalid: Option<&'a Mask>, op: &'a Op, hx: u32, hy: u32) -> Self {
        let needs_sat = matches!(op, Op::MeanFast | Op::StdDevFast);
        Self {
            src,
            invalid,
            op,
            hx: hx as i32,
            hy: hy as i32,
            full_count: ((2 * hx + 1) * (2 * hy + 1)) as f64,
            sat_values: needs_sat.then(|| Sat::of_values(src, invalid)),
            sat_squares: matches!(op, Op::StdDevFast).then(|| Sat::of_squares(src, invalid)),
            sat_counts: match invalid {
                Some(m) if needs_sat => Some(Sat::of_valid_counts(m)),
                _ => None,
            },
            samples: Vec::new(),
        }
    }

    fn is_invalid(&self, x: u32, y: u32) -> bool {
        self.invalid.is_some_and(|m| m.get_unchecked(x, y))
    }

    /// Collect valid samples at the given window offsets. The window is
    /// fully in bounds for every computed cell.
    fn gather(&mut self, cx: u32, cy: u32, offsets: &[(i32, i32)]) {
        self.samples.clear();
        for &(dx, dy) in offsets {
            let sx = (cx as i32 + dx) as u32;
            let sy = (cy as i32 + dy) as u32;
            if self.is_invalid(sx, sy) {
                continue;
            }
            self.samples.push(self.src.get_unchecked(sx, sy).to_f64());
        }
    }

    fn gather_window(&mut self, cx: u32, cy: u32) {
        self.samples.clear();
        for dy in -self.hy..=self.hy {
            for dx in -self.hx..=self.hx {
                let sx = (cx as i32 + dx) as u32;
                let sy = (cy as i32 + dy) as u32;
                if self.is_invalid(sx, sy) {
                    continue;
                }
                self.samples.push(self.src.get_unchecked(sx, sy).to_f64());
            }
        }
    }

    /// Inclusive window rectangle around a center that is at least
    /// `(hx, hy)` away from every source edge.
    fn rect(&self, cx: u32, cy: u32) -> (u32, u32, u32, u32) {
        (
            (cx as i32 - self.hx) as u32,
            (cy as i32 - self.hy) as u32,
            (cx as i32 + self.hx) as u32,
            (cy as i32 + self.hy) as u32,
        )
    }

    fn valid_count(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> f64 {
        match &self.sat_counts {
            Some(sat) => sat.window_sum(x0, y0, x1, y1),
            None => self.full_count,
        }
    }

    /// Statistic for the window centered at `(cx, cy)`, `None` when the
    /// window yields no usable result ("no data").
    fn cell(&mut self, cx: u32, cy: u32) -> Option<f64> {
        let op = self.op;
        match op {
            Op::Median { offsets } => {
                self.gather(cx, cy, offsets);
                median_of_samples(&mut self.samples)
            }
            Op::Mean { offsets } => {
                self.gather(cx, cy, offsets);
                mean_of_samples(&self.samples)
            }
            Op::StdDev { offsets } => {
                self.gather(cx, cy, offsets);
                stddev_of_samples(&self.samples)
            }
            Op::MeanFast => {
                let (x0, y0, x1, y1) = self.rect(cx, cy);
                let n = self.valid_count(x0, y0, x1, y1);
                if n < 1.0 {
                    return None;
                }
                let sat = self.sat_values.as_ref()?;
                Some(sat.window_sum(x0, y0, x1, y1) / n)
            }
            Op::StdDevFast => {
                let (x0, y0, x1, y1) = self.rect(cx, cy);
                let n = self.valid_count(x0, y0, x1, y1);
                if n < 2.0 {
                    return None;
                }
                let s = self.sat_values.as_ref()?.window_sum(x0, y0, x1, y1);
                let q = self.sat_squares.as_ref()?.window_sum(x0, y0, x1, y1);
                // Unstable one-pass formula; clamp the cancellation error
                let var = ((q - s * s / n) / (n - 1.0)).max(0.0);
                Some(var.sqrt())
            }
            Op::Convolution { taps, scaled } => {
                let mut acc = 0.0;
                let mut wsum = 0.0;
                let mut any = false;
                for &(dx, dy, w) in taps {
                    let sx = (cx as i32 + dx) as u32;
                    let sy = (cy as i32 + dy) as u32;
                    if self.is_invalid(sx, sy) {
                        continue;
                    }
                    acc += w * self.src.get_unchecked(sx, sy).to_f64();
                    wsum += w;
                    any = true;
                }
                match (any, scaled) {
                    (false, _) => None,
                    (true, false) => Some(acc),
                    // A vanishing effective weight sum has no scaled value
                    (true, true) => (wsum != 0.0).then(|| acc / wsum),
                }
            }
            Op::Morpho { weights, scaled } => {
                self.gather_window(cx, cy);
                if self.samples.is_empty() {
                    return None;
                }
                self.samples.sort_unstable_by(f64::total_cmp);
                // Short windows use the leading row-major weights
                let mut acc = 0.0;
                let mut wsum = 0.0;
                for (i, &v) in self.samples.iter().enumerate() {
                    acc += weights[i] * v;
                    wsum += weights[i];
                }
                if *scaled {
                    (wsum != 0.0).then(|| acc / wsum)
                } else {
                    Some(acc)
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run<T: Pixel>(
    dst: &mut Raster<T>,
    cand: &mut Option<Mask>,
    src: &Raster<T>,
    src_invalid: Option<&Mask>,
    op: &Op,
    hx: u32,
    hy: u32,
    border: BorderMode,
) {
    let mut ctx = Ctx::new(src, src_invalid, op, hx, hy);
    match border {
        BorderMode::Crop => {
            let (w, h) = (dst.width(), dst.height());
            compute_region(dst, cand, &mut ctx, 0, w, 0, h, hx, hy);
        }
        BorderMode::NoOp | BorderMode::Zero | BorderMode::Copy => {
            fill_ring(dst, src, hx, hy, border);
            let (nx, ny) = (dst.width(), dst.height());
            compute_region(dst, cand, &mut ctx, hx, nx - hx, hy, ny - hy, 0, 0);
        }
        // Normalized to Crop by the caller
        BorderMode::FullRecompute => unreachable!(),
    }
}

/// Row-blocked traversal of a destination rectangle; the window center for
/// destination cell `(x, y)` is `(x + off_x, y + off_y)` in the source.
#[allow(clippy::too_many_arguments)]
fn compute_region<T: Pixel>(
    dst: &mut Raster<T>,
    cand: &mut Option<Mask>,
    ctx: &mut Ctx<'_, T>,
    x0: u32,
    x1: u32,
    y0: u32,
    y1: u32,
    off_x: u32,
    off_y: u32,
) {
    let (dw, dh) = (dst.width(), dst.height());
    let mut yb = y0;
    while yb < y1 {
        let ye = (yb + ROW_BLOCK).min(y1);
        for y in yb..ye {
            for x in x0..x1 {
                match ctx.cell(x + off_x, y + off_y) {
                    Some(v) => dst.set_unchecked(x, y, T::from_f64(v)),
                    None => {
                        dst.set_unchecked(x, y, T::ZERO);
                        flag_no_data(cand, dw, dh, x, y);
                    }
                }
            }
        }
        yb = ye;
    }
}

fn flag_no_data(cand: &mut Option<Mask>, w: u32, h: u32, x: u32, y: u32) {
    if cand.is_none() {
        if let Ok(m) = Mask::new(w, h) {
            *cand = Some(m);
        }
    }
    if let Some(m) = cand {
        m.set_unchecked(x, y, true);
    }
}

/// Write the destination border ring for the equal-dimension modes.
fn fill_ring<T: Pixel>(dst: &mut Raster<T>, src: &Raster<T>, hx: u32, hy: u32, border: BorderMode) {
    if border == BorderMode::NoOp {
        return;
    }
    let (nx, ny) = (dst.width(), dst.height());
    for y in 0..ny {
        let edge_row = y < hy || y >= ny - hy;
        match border {
            BorderMode::Zero => {
                let d = dst.row_mut(y);
                if edge_row {
                    d.fill(T::ZERO);
                } else {
                    d[..hx as usize].fill(T::ZERO);
                    d[(nx - hx) as usize..].fill(T::ZERO);
                }
            }
            BorderMode::Copy => {
                let s = src.row(y);
                let d = dst.row_mut(y);
                if edge_row {
                    d.copy_from_slice(s);
                } else {
                    d[..hx as usize].copy_from_slice(&s[..hx as usize]);
                    d[(nx - hx) as usize..].copy_from_slice(&s[(nx - hx) as usize..]);
                }
            }
            _ => unreachable!(),
        }
    }
}

/// Clear the invalid flags of interior cells, keeping the border ring.
fn clear_interior(mask: &mut Mask, hx: u32, hy: u32) {
    let (nx, ny) = (mask.width(), mask.height());
    if nx < 2 * hx + 1 || ny < 2 * hy + 1 {
        return;
    }
    let wpl = mask.wpl() as usize;
    let mut keep = vec![!0u32; wpl];
    for x in hx..nx - hx {
        keep[(x / 32) as usize] &= !(0x8000_0000u32 >> (x % 32));
    }
    for y in hy..ny - hy {
        let row = mask.row_mut(y);
        for i in 0..wpl {
            row[i] &= keep[i];
        }
    }
}
