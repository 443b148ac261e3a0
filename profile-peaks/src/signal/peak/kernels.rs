//! Trait-first kernel for extremum detection.

use alloc::vec::Vec;

use num_traits::Float;

use super::{local_extrema, prominence_at, ExtremumMode, PeakInfo};
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D};
use crate::signal::traits::ExtremaFind1D;

/// Constructor config for [`PeakFinderKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(default, bound(deserialize = "F: Float + serde::Deserialize<'de>"))
)]
pub struct PeakFinderConfig<F> {
    /// Search for maxima or minima.
    pub mode: ExtremumMode,
    /// Minimum index distance between any two retained extrema.
    pub min_distance: usize,
    /// Minimum prominence an extremum needs to be retained. Must be finite and `>= 0`.
    pub min_prominence: F,
}

impl<F> Default for PeakFinderConfig<F>
where
    F: Float,
{
    fn default() -> Self {
        Self {
            mode: ExtremumMode::Peak,
            min_distance: 0,
            min_prominence: F::one(),
        }
    }
}

impl<F> PeakFinderConfig<F>
where
    F: Float,
{
    /// Default thresholds for the given mode.
    pub fn new(mode: ExtremumMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Copy of this config with another mode.
    pub fn with_mode(self, mode: ExtremumMode) -> Self {
        Self { mode, ..self }
    }

    /// Copy of this config with another minimum distance.
    pub fn with_min_distance(self, min_distance: usize) -> Self {
        Self {
            min_distance,
            ..self
        }
    }

    /// Copy of this config with another minimum prominence.
    pub fn with_min_prominence(self, min_prominence: F) -> Self {
        Self {
            min_prominence,
            ..self
        }
    }
}

/// Immutable peak/valley finder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakFinderKernel<F> {
    mode: ExtremumMode,
    min_distance: usize,
    min_prominence: F,
}

impl<F> PeakFinderKernel<F>
where
    F: Float,
{
    /// Return configured mode.
    pub fn mode(&self) -> ExtremumMode {
        self.mode
    }

    /// Return configured minimum distance.
    pub fn min_distance(&self) -> usize {
        self.min_distance
    }

    /// Return configured minimum prominence.
    pub fn min_prominence(&self) -> F {
        self.min_prominence
    }

    /// Return the config this kernel was built from.
    pub fn config(&self) -> PeakFinderConfig<F> {
        PeakFinderConfig {
            mode: self.mode,
            min_distance: self.min_distance,
            min_prominence: self.min_prominence,
        }
    }

    fn run_slice(&self, signal: &[F]) -> Result<Vec<PeakInfo<F>>, ExecInvariantViolation> {
        if signal.len() < 3 {
            return Ok(Vec::new());
        }
        if let Some(index) = signal.iter().position(|v| !v.is_finite()) {
            return Err(ExecInvariantViolation::NonFinite {
                arg: "signal",
                index,
            });
        }

        let candidates = local_extrema(signal, self.mode);
        let scanned = candidates.len();
        let prominent = self.prominence_filter(signal, candidates);
        let kept_prominent = prominent.len();
        let mut selected = self.distance_filter(prominent);
        selected.sort_unstable_by_key(|p| p.position);

        tracing::debug!(
            mode = ?self.mode,
            len = signal.len(),
            scanned,
            prominent = kept_prominent,
            selected = selected.len(),
            "extremum search finished"
        );
        Ok(selected)
    }

    fn prominence_filter(&self, signal: &[F], candidates: Vec<PeakInfo<F>>) -> Vec<PeakInfo<F>> {
        candidates
            .into_iter()
            .filter(|p| {
                let (prominence, _, _) = prominence_at(signal, self.mode, p.position);
                let keep = prominence >= self.min_prominence;
                if !keep {
                    tracing::trace!(position = p.position, "dropped: below min_prominence");
                }
                keep
            })
            .collect()
    }

    fn distance_filter(&self, mut candidates: Vec<PeakInfo<F>>) -> Vec<PeakInfo<F>> {
        // Stable, so equal strengths stay in position order.
        candidates.sort_by(|a, b| self.mode.strength_order(a.value, b.value));

        let mut selected: Vec<PeakInfo<F>> = Vec::with_capacity(candidates.len());
        for cand in candidates {
            if selected
                .iter()
                .all(|kept| kept.position.abs_diff(cand.position) >= self.min_distance)
            {
                selected.push(cand);
            } else {
                tracing::trace!(
                    position = cand.position,
                    "dropped: within min_distance of a stronger extremum"
                );
            }
        }
        selected
    }
}

impl<F> KernelLifecycle for PeakFinderKernel<F>
where
    F: Float,
{
    type Config = PeakFinderConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !config.min_prominence.is_finite() {
            return Err(ConfigError::InvalidArgument {
                arg: "min_prominence",
                reason: "min_prominence must be finite",
            });
        }
        if config.min_prominence < F::zero() {
            return Err(ConfigError::InvalidArgument {
                arg: "min_prominence",
                reason: "min_prominence must be >= 0",
            });
        }
        Ok(Self {
            mode: config.mode,
            min_distance: config.min_distance,
            min_prominence: config.min_prominence,
        })
    }
}

impl<F> ExtremaFind1D<F> for PeakFinderKernel<F>
where
    F: Float,
{
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<PeakInfo<F>>, ExecInvariantViolation>
    where
        I: Read1D<F> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        self.run_slice(input)
    }
}
