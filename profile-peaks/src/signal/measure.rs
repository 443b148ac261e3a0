//! Distance between two reference edges of a derivative profile.
//!
//! A rising edge shows up as a peak of the first difference, a falling edge as
//! a valley. The kernel searches both, picks one reference extremum from each
//! position-sorted list and reports how far apart they are.

use alloc::vec::Vec;

use ndarray::{Array1, ArrayView2};
use num_traits::Float;

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D};
use crate::signal::peak::{ExtremumMode, PeakFinderConfig, PeakFinderKernel, PeakInfo};
use crate::signal::profile::{intensity_profile, DifferenceKernel, ProfileAxis};
use crate::signal::traits::{Difference1D, EdgeMeasure1D, ExtremaFind1D};

/// Which extremum of a position-sorted list is the reference edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EdgeSelect {
    /// Lowest position.
    First,
    /// Highest position.
    #[default]
    Last,
}

impl EdgeSelect {
    fn pick<F: Copy>(self, extrema: &[PeakInfo<F>]) -> Option<PeakInfo<F>> {
        match self {
            EdgeSelect::First => extrema.first().copied(),
            EdgeSelect::Last => extrema.last().copied(),
        }
    }
}

/// Constructor config for [`EdgeMeasureKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(default, bound(deserialize = "F: Float + serde::Deserialize<'de>"))
)]
pub struct EdgeMeasureConfig<F> {
    /// Minimum spacing between extrema of the same polarity.
    pub min_distance: usize,
    /// Minimum prominence of rising-edge peaks.
    pub peak_prominence: F,
    /// Minimum prominence of falling-edge valleys.
    pub valley_prominence: F,
    /// Reference rising edge.
    pub peak_select: EdgeSelect,
    /// Reference falling edge.
    pub valley_select: EdgeSelect,
}

impl<F> Default for EdgeMeasureConfig<F>
where
    F: Float,
{
    /// 20 samples apart, prominence 5 for both polarities, last of each.
    fn default() -> Self {
        let two = F::one() + F::one();
        let five = two + two + F::one();
        Self {
            min_distance: 20,
            peak_prominence: five,
            valley_prominence: five,
            peak_select: EdgeSelect::Last,
            valley_select: EdgeSelect::Last,
        }
    }
}

/// The two reference edges and their separation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeDistance<F> {
    /// Selected rising edge.
    pub peak: PeakInfo<F>,
    /// Selected falling edge.
    pub valley: PeakInfo<F>,
    /// `|peak.position - valley.position|`.
    pub distance: usize,
}

impl<F> EdgeDistance<F> {
    /// Lower and upper edge position.
    pub fn span(&self) -> (usize, usize) {
        let (a, b) = (self.peak.position, self.valley.position);
        (a.min(b), a.max(b))
    }

    /// `true` when the rising edge comes before the falling edge.
    pub fn rising_first(&self) -> bool {
        self.peak.position <= self.valley.position
    }
}

/// Immutable edge-pair measurement kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeMeasureKernel<F> {
    peaks: PeakFinderKernel<F>,
    valleys: PeakFinderKernel<F>,
    peak_select: EdgeSelect,
    valley_select: EdgeSelect,
}

impl<F> EdgeMeasureKernel<F>
where
    F: Float,
{
    /// Kernel used for rising edges.
    pub fn peak_finder(&self) -> &PeakFinderKernel<F> {
        &self.peaks
    }

    /// Kernel used for falling edges.
    pub fn valley_finder(&self) -> &PeakFinderKernel<F> {
        &self.valleys
    }
}

impl<F> KernelLifecycle for EdgeMeasureKernel<F>
where
    F: Float,
{
    type Config = EdgeMeasureConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let peaks = PeakFinderKernel::try_new(PeakFinderConfig {
            mode: ExtremumMode::Peak,
            min_distance: config.min_distance,
            min_prominence: config.peak_prominence,
        })?;
        let valleys = PeakFinderKernel::try_new(PeakFinderConfig {
            mode: ExtremumMode::Valley,
            min_distance: config.min_distance,
            min_prominence: config.valley_prominence,
        })?;
        Ok(Self {
            peaks,
            valleys,
            peak_select: config.peak_select,
            valley_select: config.valley_select,
        })
    }
}

impl<F> EdgeMeasure1D<F> for EdgeMeasureKernel<F>
where
    F: Float,
{
    fn run<I>(&self, input: &I) -> Result<Option<EdgeDistance<F>>, ExecInvariantViolation>
    where
        I: Read1D<F> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let peaks: Vec<PeakInfo<F>> = self.peaks.run_alloc(input)?;
        let valleys: Vec<PeakInfo<F>> = self.valleys.run_alloc(input)?;

        let (Some(peak), Some(valley)) = (
            self.peak_select.pick(&peaks),
            self.valley_select.pick(&valleys),
        ) else {
            tracing::debug!(
                peaks = peaks.len(),
                valleys = valleys.len(),
                "no edge pair: one polarity has no retained extremum"
            );
            return Ok(None);
        };

        let distance = peak.position.abs_diff(valley.position);
        tracing::debug!(
            peak = peak.position,
            valley = valley.position,
            distance,
            "edge pair selected"
        );
        Ok(Some(EdgeDistance {
            peak,
            valley,
            distance,
        }))
    }
}

/// Profile, differentiate and measure an intensity array in one call.
pub fn measure_edge_distance<T>(
    image: ArrayView2<'_, T>,
    axis: ProfileAxis,
    config: EdgeMeasureConfig<f64>,
) -> crate::Result<Option<EdgeDistance<f64>>>
where
    T: Copy + Into<f64>,
{
    let kernel = EdgeMeasureKernel::try_new(config)?;
    let profile = intensity_profile(image, axis)?;
    let mut derivative = Array1::<f64>::zeros(profile.len());
    DifferenceKernel.run_into(&profile, &mut derivative)?;
    Ok(kernel.run(&derivative)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use ndarray::Array2;

    /// Dark background with a bright band over `band` rows.
    fn banded_image(rows: usize, cols: usize, band: core::ops::Range<usize>) -> Array2<u8> {
        Array2::from_shape_fn((rows, cols), |(r, _)| {
            if band.contains(&r) {
                200
            } else {
                10
            }
        })
    }

    #[test]
    fn bright_band_edges_are_measured() {
        let image = banded_image(60, 8, 20..40);
        let config = EdgeMeasureConfig::default();
        let result = measure_edge_distance(image.view(), ProfileAxis::Rows, config)
            .expect("valid input")
            .expect("both edges present");
        assert_eq!(result.peak.position, 20);
        assert_eq!(result.valley.position, 40);
        assert_eq!(result.distance, 20);
        assert_eq!(result.span(), (20, 40));
        assert!(result.rising_first());
    }

    #[test]
    fn column_axis_measures_vertical_edges() {
        let image = banded_image(60, 8, 25..50);
        let config = EdgeMeasureConfig::default();
        let result = measure_edge_distance(image.t(), ProfileAxis::Columns, config)
            .expect("valid input")
            .expect("both edges present");
        assert_eq!((result.peak.position, result.valley.position), (25, 50));
    }

    #[test]
    fn selection_chooses_between_repeated_edges() {
        // Two bright bands: rising at 10 and 50, falling at 30 and 70.
        let d = {
            let mut d = vec![0.0f64; 90];
            d[10] = 50.0;
            d[30] = -40.0;
            d[50] = 60.0;
            d[70] = -45.0;
            d
        };
        let mut config = EdgeMeasureConfig::<f64>::default();

        config.peak_select = EdgeSelect::First;
        config.valley_select = EdgeSelect::Last;
        let kernel = EdgeMeasureKernel::try_new(config).expect("valid config");
        let outer = kernel.run(&d).expect("finite").expect("edges");
        assert_eq!((outer.peak.position, outer.valley.position), (10, 70));
        assert_eq!(outer.distance, 60);

        config.peak_select = EdgeSelect::Last;
        config.valley_select = EdgeSelect::First;
        let kernel = EdgeMeasureKernel::try_new(config).expect("valid config");
        let inner = kernel.run(&d).expect("finite").expect("edges");
        assert_eq!((inner.peak.position, inner.valley.position), (50, 30));
        assert_eq!(inner.span(), (30, 50));
        assert!(!inner.rising_first());
    }

    #[test]
    fn separate_prominence_thresholds_per_polarity() {
        let mut d = vec![0.0f64; 40];
        d[10] = 6.0;
        d[30] = -4.5;
        let strict = EdgeMeasureConfig::<f64>::default();
        let strict = EdgeMeasureKernel::try_new(strict).expect("valid");
        assert_eq!(strict.run(&d).expect("finite"), None);

        let relaxed = EdgeMeasureKernel::try_new(EdgeMeasureConfig {
            valley_prominence: 4.0,
            ..EdgeMeasureConfig::default()
        })
        .expect("valid");
        let found = relaxed.run(&d).expect("finite").expect("edges");
        assert_eq!(found.distance, 20);
        assert_eq!(relaxed.valley_finder().min_prominence(), 4.0);
        assert_eq!(relaxed.peak_finder().mode(), ExtremumMode::Peak);
    }

    #[test]
    fn flat_image_has_no_edges() {
        let image = Array2::<u8>::from_elem((30, 5), 128);
        let config = EdgeMeasureConfig::default();
        let result =
            measure_edge_distance(image.view(), ProfileAxis::Rows, config).expect("valid input");
        assert_eq!(result, None);
    }

    #[test]
    fn invalid_threshold_surfaces_as_config_error() {
        let image = banded_image(10, 3, 3..6);
        let err = measure_edge_distance(
            image.view(),
            ProfileAxis::Rows,
            EdgeMeasureConfig {
                peak_prominence: -1.0,
                ..EdgeMeasureConfig::default()
            },
        )
        .expect_err("negative prominence");
        let Error::Exec(ExecInvariantViolation::Config(config_err)) = err else {
            panic!("expected a config error");
        };
        assert!(matches!(
            config_err,
            ConfigError::InvalidArgument {
                arg: "min_prominence",
                ..
            }
        ));
    }

    #[test]
    fn defaults_hold_for_every_float_width() {
        let narrow = EdgeMeasureConfig::<f32>::default();
        assert_eq!(narrow.min_distance, 20);
        assert_eq!(narrow.peak_prominence, 5.0f32);
        assert_eq!(narrow.valley_prominence, 5.0f32);
        assert_eq!(narrow.peak_select, EdgeSelect::Last);
        assert_eq!(narrow.valley_select, EdgeSelect::Last);
        assert_eq!(EdgeMeasureConfig::<f64>::default().peak_prominence, 5.0);
    }

    #[test]
    fn every_image_row_is_measured_through_views() {
        // Each row carries its own bright band; rows are differentiated in place.
        let image = Array2::from_shape_fn((3, 80), |(r, c)| {
            let start = 10 + 15 * r;
            if (start..start + 30).contains(&c) {
                180.0f64
            } else {
                20.0
            }
        });
        let mut derivatives = Array2::<f64>::zeros(image.dim());
        for (row, mut out) in image.rows().into_iter().zip(derivatives.rows_mut()) {
            DifferenceKernel.run_into(&row, &mut out).expect("rows are contiguous");
        }

        let kernel = EdgeMeasureKernel::try_new(EdgeMeasureConfig::default()).expect("valid");
        for r in 0..3 {
            let found = kernel
                .run(&derivatives.row(r))
                .expect("finite")
                .expect("both edges present");
            assert_eq!(found.span(), (10 + 15 * r, 40 + 15 * r));
            assert_eq!(found.distance, 30);
        }
        assert!(matches!(
            kernel.run(&derivatives.column(0)),
            Err(ExecInvariantViolation::Config(ConfigError::NonContiguous { .. }))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_document_falls_back_to_defaults() {
        let config: EdgeMeasureConfig<f64> =
            serde_json::from_str(r#"{"valley_prominence":4.0}"#).expect("valid json");
        assert_eq!(
            config,
            EdgeMeasureConfig {
                valley_prominence: 4.0,
                ..EdgeMeasureConfig::default()
            }
        );
        assert_eq!(config.min_distance, 20);
        assert_eq!(config.peak_prominence, 5.0);

        let config: EdgeMeasureConfig<f64> =
            serde_json::from_str(r#"{"peak_select":"first"}"#).expect("valid json");
        assert_eq!(config.peak_select, EdgeSelect::First);
        assert_eq!(config.valley_select, EdgeSelect::Last);
    }
}
