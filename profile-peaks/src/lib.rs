//! Peak and valley detection for 1D intensity profiles.
//!
//! The core of the crate is [`signal::peak`]: a strict local-extremum scan
//! followed by a prominence filter, a strength-ordered minimum-distance filter
//! and a final sort by position. Around it, [`signal::profile`] reduces a 2D
//! intensity array to a row or column profile and its first difference, and
//! [`signal::measure`] turns the extrema of that derivative into a distance
//! between two reference edges.
//!
//! Kernels follow a trait-first shape: a plain config value is validated once
//! by [`kernel::KernelLifecycle::try_new`] and the resulting kernel is
//! immutable, so a single kernel can be shared freely between call sites.
//!
//! ```
//! use profile_peaks::kernel::KernelLifecycle;
//! use profile_peaks::signal::peak::{ExtremumMode, PeakFinderConfig, PeakFinderKernel};
//! use profile_peaks::signal::traits::ExtremaFind1D;
//!
//! let kernel = PeakFinderKernel::try_new(PeakFinderConfig {
//!     mode: ExtremumMode::Peak,
//!     min_distance: 5,
//!     min_prominence: 1.0,
//! })
//! .unwrap();
//! let peaks = kernel.run_alloc(&[0.0, 1.0, 5.0, 1.0, 0.0, 1.0, 6.0, 1.0, 0.0]).unwrap();
//! assert_eq!(peaks.len(), 1);
//! assert_eq!(peaks[0].position, 6);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;
pub use error::{Error, Result};

pub mod kernel;

/// Profile extraction, extremum detection and edge measurement.
pub mod signal;
