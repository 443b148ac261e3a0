//! Trait interfaces for profile and extremum kernels.

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use crate::signal::{measure::EdgeDistance, peak::PeakInfo};

/// 1D extremum search capability.
#[cfg(feature = "alloc")]
pub trait ExtremaFind1D<T> {
    /// Find the retained extrema of `input`, ascending by position.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<PeakInfo<T>>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// 1D first-difference capability.
pub trait Difference1D<T> {
    /// Differentiate into a caller-provided output buffer of the input's length.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Differentiate and allocate output.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Edge-pair distance capability over a derivative profile.
#[cfg(feature = "alloc")]
pub trait EdgeMeasure1D<T> {
    /// Locate the reference peak and valley of `input`.
    ///
    /// Returns `Ok(None)` when either polarity has no retained extremum.
    fn run<I>(&self, input: &I) -> Result<Option<EdgeDistance<T>>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}
