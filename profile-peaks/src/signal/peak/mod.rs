//! Peak and valley detection over 1D profiles.
//!
//! A run is a fixed four-stage pipeline:
//!
//! 1. strict local-extremum scan over the interior samples `[1, N-2]`,
//! 2. prominence filter against the tighter of the two base levels,
//! 3. greedy minimum-distance filter, strongest extremum first,
//! 4. sort of the survivors by position.
//!
//! Peaks and valleys share every stage; [`ExtremumMode`] supplies the
//! comparison direction and the prominence formula. Plateaus (`[.., 3, 5, 5, 3, ..]`)
//! are never reported because the scan uses strict inequalities.

use alloc::vec::Vec;
use core::cmp::Ordering;

use num_traits::Float;

use crate::kernel::{ExecInvariantViolation, KernelLifecycle};
use crate::signal::traits::ExtremaFind1D;

mod kernels;
pub use kernels::*;

/// Polarity of the extrema being searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExtremumMode {
    /// Local maxima.
    #[default]
    Peak,
    /// Local minima.
    Valley,
}

impl ExtremumMode {
    /// `true` when `a` lies strictly beyond `b` in this mode's direction.
    #[inline]
    pub fn exceeds<F: PartialOrd>(self, a: F, b: F) -> bool {
        match self {
            ExtremumMode::Peak => a > b,
            ExtremumMode::Valley => a < b,
        }
    }

    /// Prominence of `value` given the base level found on each side.
    #[inline]
    pub fn prominence<F: Float>(self, value: F, left_base: F, right_base: F) -> F {
        match self {
            ExtremumMode::Peak => value - left_base.max(right_base),
            ExtremumMode::Valley => left_base.min(right_base) - value,
        }
    }

    /// Ordering that puts the stronger of two values first.
    #[inline]
    pub fn strength_order<F: PartialOrd>(self, a: F, b: F) -> Ordering {
        let ord = match self {
            ExtremumMode::Peak => b.partial_cmp(&a),
            ExtremumMode::Valley => a.partial_cmp(&b),
        };
        ord.unwrap_or(Ordering::Equal)
    }
}

/// A detected extremum.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakInfo<F> {
    /// Index into the searched signal.
    pub position: usize,
    /// `signal[position]` at detection time.
    pub value: F,
}

/// Prominence result bundle for [`peak_prominences`].
#[derive(Debug, Clone, PartialEq)]
pub struct PeakProminencesResult<F> {
    /// Prominence value for each input position.
    pub prominences: Vec<F>,
    /// Index of the left base level for each position.
    pub left_bases: Vec<usize>,
    /// Index of the right base level for each position.
    pub right_bases: Vec<usize>,
}

/// Return indices of strict relative extrema over `order` neighbours per side.
pub fn argrelextrema<F>(x: &[F], mode: ExtremumMode, order: usize) -> Vec<usize>
where
    F: PartialOrd + Copy,
{
    if order == 0 || x.len() < (2 * order + 1) {
        return Vec::new();
    }

    let mut out = Vec::new();
    for i in order..(x.len() - order) {
        let center = x[i];
        let is_extremum =
            (1..=order).all(|k| mode.exceeds(center, x[i - k]) && mode.exceeds(center, x[i + k]));
        if is_extremum {
            out.push(i);
        }
    }
    out
}

/// Stage 1: every interior sample strictly beyond both neighbours.
pub(crate) fn local_extrema<F>(x: &[F], mode: ExtremumMode) -> Vec<PeakInfo<F>>
where
    F: PartialOrd + Copy,
{
    argrelextrema(x, mode, 1)
        .into_iter()
        .map(|position| PeakInfo {
            position,
            value: x[position],
        })
        .collect()
}

/// Walk away from `peak` until a strictly stronger sample, tracking the
/// weakest level seen. Returns that level and its index.
fn walk_base<F, It>(x: &[F], mode: ExtremumMode, peak: usize, indices: It) -> (F, usize)
where
    F: Float,
    It: Iterator<Item = usize>,
{
    let value = x[peak];
    let mut level = value;
    let mut base = peak;
    for i in indices {
        let v = x[i];
        if mode.exceeds(v, value) {
            break;
        }
        if mode.exceeds(level, v) {
            level = v;
            base = i;
        }
    }
    (level, base)
}

/// Prominence of the extremum at `peak` with its left and right base indices.
pub(crate) fn prominence_at<F>(x: &[F], mode: ExtremumMode, peak: usize) -> (F, usize, usize)
where
    F: Float,
{
    let (left_level, left_base) = walk_base(x, mode, peak, (0..peak).rev());
    let (right_level, right_base) = walk_base(x, mode, peak, (peak + 1)..x.len());
    (
        mode.prominence(x[peak], left_level, right_level),
        left_base,
        right_base,
    )
}

/// Compute prominences and base indices for arbitrary positions.
///
/// Positions outside `x` are skipped, so the result vectors may be shorter
/// than `positions`.
pub fn peak_prominences<F>(
    x: &[F],
    positions: &[usize],
    mode: ExtremumMode,
) -> PeakProminencesResult<F>
where
    F: Float,
{
    let mut prominences = Vec::with_capacity(positions.len());
    let mut left_bases = Vec::with_capacity(positions.len());
    let mut right_bases = Vec::with_capacity(positions.len());

    for &peak in positions {
        if peak >= x.len() {
            continue;
        }
        let (prominence, left, right) = prominence_at(x, mode, peak);
        prominences.push(prominence);
        left_bases.push(left);
        right_bases.push(right);
    }

    PeakProminencesResult {
        prominences,
        left_bases,
        right_bases,
    }
}

/// Run a one-off extremum search with the given config.
pub fn find_extrema<F>(
    x: &[F],
    config: PeakFinderConfig<F>,
) -> Result<Vec<PeakInfo<F>>, ExecInvariantViolation>
where
    F: Float,
{
    let kernel = PeakFinderKernel::try_new(config)?;
    kernel.run_alloc(x)
}

/// Find local maxima retained by the prominence and distance filters.
pub fn find_peaks<F>(
    x: &[F],
    min_distance: usize,
    min_prominence: F,
) -> Result<Vec<PeakInfo<F>>, ExecInvariantViolation>
where
    F: Float,
{
    find_extrema(
        x,
        PeakFinderConfig {
            mode: ExtremumMode::Peak,
            min_distance,
            min_prominence,
        },
    )
}

/// Find local minima retained by the prominence and distance filters.
pub fn find_valleys<F>(
    x: &[F],
    min_distance: usize,
    min_prominence: F,
) -> Result<Vec<PeakInfo<F>>, ExecInvariantViolation>
where
    F: Float,
{
    find_extrema(
        x,
        PeakFinderConfig {
            mode: ExtremumMode::Valley,
            min_distance,
            min_prominence,
        },
    )
}
