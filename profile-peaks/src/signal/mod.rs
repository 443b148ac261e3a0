/// Capability traits implemented by the signal kernels.
pub mod traits;

/// Peak and valley detection with prominence and spacing filters.
#[cfg(feature = "alloc")]
pub mod peak;

/// Row/column intensity profiles and their first difference.
#[cfg(feature = "alloc")]
pub mod profile;

/// Distance between reference edges of a derivative profile.
#[cfg(feature = "alloc")]
pub mod measure;
