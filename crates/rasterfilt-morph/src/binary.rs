//! Binary morphology engine
//!
//! Erosion, dilation, opening and closing over bit-packed masks, driven by
//! an arbitrary-shaped structuring element. The inner kernels work at
//! 32-bit word granularity: for each active element offset, a whole source
//! row is shifted and AND-accumulated (erosion) or OR-accumulated
//! (dilation) into the output row.
//!
//! The raw accumulation treats out-of-bounds cells as clear, which is only
//! the right answer on the interior (cells whose window is fully in
//! bounds). The requested border mode then decides the border ring: left
//! untouched, forced clear, or copied from the source.

use crate::element::StructuringElement;
use crate::{MorphError, MorphResult};
use rasterfilt_core::rowops::{shift_and_row, shift_or_row};
use rasterfilt_core::{BorderMode, Mask};

/// Morphological filter selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphFilter {
    /// Output set iff every source cell under an active element position is set
    Erosion,
    /// Output set iff at least one source cell under an active position is set
    Dilation,
    /// Erosion followed by dilation
    Opening,
    /// Dilation followed by erosion
    Closing,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stage {
    Erode,
    Dilate,
}

/// Apply a morphological filter to `src`, writing into `dst`.
///
/// `dst` must have the same dimensions as `src` (morphology never crops),
/// and `src` must be at least as large as the element window. Opening and
/// Closing run their two stages through an internal scratch mask; each
/// stage applies the same border mode.
///
/// Validation happens before any write to `dst`: on error the destination
/// is untouched.
///
/// # Errors
///
/// [`MorphError::UnsupportedMode`] for Crop/FullRecompute borders,
/// [`MorphError::DimensionMismatch`] for a destination of the wrong shape
/// or a source smaller than the window.
pub fn filter_mask(
    dst: &mut Mask,
    src: &Mask,
    element: &StructuringElement,
    mode: MorphFilter,
    border: BorderMode,
) -> MorphResult<()> {
    validate(dst.width(), dst.height(), src, element, mode, border)?;
    run(dst, src, element, mode, border);
    Ok(())
}

/// Apply a morphological filter to `mask` in place.
///
/// All four filters are supported; the engine snapshots the source
/// internally (Opening and Closing additionally allocate their stage
/// scratch, as in the two-raster call).
pub fn filter_mask_in_place(
    mask: &mut Mask,
    element: &StructuringElement,
    mode: MorphFilter,
    border: BorderMode,
) -> MorphResult<()> {
    validate(mask.width(), mask.height(), mask, element, mode, border)?;
    let src = mask.clone();
    run(mask, &src, element, mode, border);
    Ok(())
}

fn validate(
    dst_w: u32,
    dst_h: u32,
    src: &Mask,
    element: &StructuringElement,
    mode: MorphFilter,
    border: BorderMode,
) -> MorphResult<()> {
    if !border.supported_by_morphology() {
        return Err(MorphError::UnsupportedMode { mode, border });
    }
    if src.width() < element.width() || src.height() < element.height() {
        return Err(MorphError::SourceTooSmall {
            raster: (src.width(), src.height()),
            window: (element.width(), element.height()),
        });
    }
    if dst_w != src.width() || dst_h != src.height() {
        return Err(MorphError::DimensionMismatch {
            expected: (src.width(), src.height()),
            actual: (dst_w, dst_h),
        });
    }
    Ok(())
}

fn run(
    dst: &mut Mask,
    src: &Mask,
    element: &StructuringElement,
    mode: MorphFilter,
    border: BorderMode,
) {
    match mode {
        MorphFilter::Erosion => apply_stage(dst, src, element, Stage::Erode, border),
        MorphFilter::Dilation => apply_stage(dst, src, element, Stage::Dilate, border),
        MorphFilter::Opening => {
            // Stage 1 into an explicit scratch seeded from the source, so a
            // NoOp border carries meaningful content into stage 2.
            let mut tmp = src.clone();
            apply_stage(&mut tmp, src, element, Stage::Erode, border);
            apply_stage(dst, &tmp, element, Stage::Dilate, border);
        }
        MorphFilter::Closing => {
            let mut tmp = src.clone();
            apply_stage(&mut tmp, src, element, Stage::Dilate, border);
            apply_stage(dst, &tmp, element, Stage::Erode, border);
        }
    }
}

/// One erosion or dilation pass: raw word-level accumulation into scratch,
/// then border-ring assembly into `dst`.
fn apply_stage(
    dst: &mut Mask,
    src: &Mask,
    element: &StructuringElement,
    stage: Stage,
    border: BorderMode,
) {
    let raw = rasterop(src, element, stage);
    assemble(
        dst,
        src,
        &raw,
        element.half_width(),
        element.half_height(),
        border,
    );
}

/// Word-level shift-and-accumulate over all active element offsets.
///
/// Out-of-bounds source cells read as clear: an offset row outside the
/// raster clears the whole output row under AND (erosion) and is skipped
/// under OR (dilation).
fn rasterop(src: &Mask, element: &StructuringElement, stage: Stage) -> Mask {
    let h = src.height();
    let wpl = src.wpl() as usize;

    let mut out = src.clone();
    out.data_mut()
        .fill(if stage == Stage::Erode { !0u32 } else { 0 });

    for (dx, dy) in element.offsets() {
        for y in 0..h as i32 {
            let sy = y + dy;
            let out_row = out.row_mut(y as u32);

            if sy < 0 || sy >= h as i32 {
                if stage == Stage::Erode {
                    out_row.fill(0);
                }
                continue;
            }

            let src_row = src.row(sy as u32);
            debug_assert_eq!(src_row.len(), wpl);
            match stage {
                Stage::Erode => shift_and_row(out_row, src_row, -dx),
                Stage::Dilate => shift_or_row(out_row, src_row, -dx),
            }
        }
    }

    out.clear_padding();
    out
}

/// Blend the raw result into the destination: interior cells always take
/// the raw value, the border ring follows the border mode.
fn assemble(dst: &mut Mask, src: &Mask, raw: &Mask, hx: u32, hy: u32, border: BorderMode) {
    let nx = src.width();
    let ny = src.height();
    let wpl = src.wpl() as usize;
    let interior = interior_row_mask(nx, hx, wpl);

    for y in 0..ny {
        let d = dst.row_mut(y);
        if y >= hy && y < ny - hy {
            let r = raw.row(y);
            match border {
                BorderMode::NoOp => {
                    for i in 0..wpl {
                        d[i] = (d[i] & !interior[i]) | (r[i] & interior[i]);
                    }
                }
                BorderMode::Zero => {
                    for i in 0..wpl {
                        d[i] = r[i] & interior[i];
                    }
                }
                BorderMode::Copy => {
                    let s = src.row(y);
                    for i in 0..wpl {
                        d[i] = (s[i] & !interior[i]) | (r[i] & interior[i]);
                    }
                }
                // Rejected during validation
                BorderMode::Crop | BorderMode::FullRecompute => unreachable!(),
            }
        } else {
            match border {
                BorderMode::NoOp => {}
                BorderMode::Zero => d.fill(0),
                BorderMode::Copy => d.copy_from_slice(src.row(y)),
                BorderMode::Crop | BorderMode::FullRecompute => unreachable!(),
            }
        }
    }

    dst.clear_padding();
}

/// Row mask with bits set for interior columns `hx <= x < nx - hx`.
fn interior_row_mask(nx: u32, hx: u32, wpl: usize) -> Vec<u32> {
    let mut mask = vec![0u32; wpl];
    for x in hx..nx - hx {
        mask[(x / 32) as usize] |= 0x8000_0000u32 >> (x % 32);
    }
    mask
}
