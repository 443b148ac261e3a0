//! Trait-first kernel substrate shared by the profile and peak kernels.
//!
//! Kernels are built once from a plain config value through
//! [`KernelLifecycle::try_new`], which is the only place thresholds are
//! validated. A constructed kernel is immutable and every `run*` call is a
//! pure function of the kernel and its input buffer.

mod errors;
mod io;
mod lifecycle;

pub use errors::*;
pub use io::*;
pub use lifecycle::*;
