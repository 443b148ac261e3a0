//! Row/column intensity profiles and their first difference.
//!
//! A profile is the mean intensity along one image axis. Its first
//! difference turns intensity steps into peaks (rising edges) and valleys
//! (falling edges), which is what [`crate::signal::peak`] searches.

use alloc::string::ToString;
use alloc::vec::Vec;

use ndarray::{Array1, Array2, ArrayView2, Axis};
use num_traits::Float;

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::traits::Difference1D;
use crate::{Error, Result};

/// Which direction of a 2D intensity array is collapsed into a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProfileAxis {
    /// One sample per row: the mean of that row. Locates horizontal edges.
    Rows,
    /// One sample per column: the mean of that column. Locates vertical edges.
    Columns,
}

/// Mean intensity along `axis` of a 2D array.
///
/// Indexed `[row, column]`. Returns [`Error::InvalidArg`] for an image with
/// no rows or no columns.
pub fn intensity_profile<T>(image: ArrayView2<'_, T>, axis: ProfileAxis) -> Result<Array1<f64>>
where
    T: Copy + Into<f64>,
{
    let (rows, cols) = image.dim();
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidArg {
            arg: "image".to_string(),
            reason: "image must have at least one row and one column".to_string(),
        });
    }

    let reduce = match axis {
        ProfileAxis::Rows => Axis(1),
        ProfileAxis::Columns => Axis(0),
    };
    let image: Array2<f64> = image.mapv(Into::into);
    image.mean_axis(reduce).ok_or_else(|| Error::InvalidArg {
        arg: "image".to_string(),
        reason: "profile axis has zero length".to_string(),
    })
}

/// Empty config for the stateless difference kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct DifferenceConfig;

/// First difference `d[0] = 0`, `d[i] = p[i] - p[i - 1]`.
///
/// The output keeps the input length so positions in the derivative map
/// straight back to rows or columns of the source image.
#[derive(Debug, Clone, Copy, Default)]
pub struct DifferenceKernel;

impl KernelLifecycle for DifferenceKernel {
    type Config = DifferenceConfig;

    fn try_new(_: Self::Config) -> core::result::Result<Self, ConfigError> {
        Ok(Self)
    }
}

fn difference_into<F: Float>(input: &[F], out: &mut [F]) {
    if let Some(first) = out.first_mut() {
        *first = F::zero();
    }
    for (dst, pair) in out.iter_mut().skip(1).zip(input.windows(2)) {
        *dst = pair[1] - pair[0];
    }
}

impl<F> Difference1D<F> for DifferenceKernel
where
    F: Float,
{
    fn run_into<I, O>(
        &self,
        input: &I,
        out: &mut O,
    ) -> core::result::Result<(), ExecInvariantViolation>
    where
        I: Read1D<F> + ?Sized,
        O: Write1D<F> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let out = out.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        if out.len() != input.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: input.len(),
                got: out.len(),
            });
        }
        difference_into(input, out);
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> core::result::Result<Vec<F>, ExecInvariantViolation>
    where
        I: Read1D<F> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let mut out = alloc::vec![F::zero(); input.len()];
        difference_into(input, &mut out);
        Ok(out)
    }
}

/// First difference of a profile, same length as the input.
pub fn first_difference<F>(profile: &[F]) -> Vec<F>
where
    F: Float,
{
    let mut out = alloc::vec![F::zero(); profile.len()];
    difference_into(profile, &mut out);
    out
}
