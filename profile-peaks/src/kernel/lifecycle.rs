use super::ConfigError;

/// Validated construction shared by all kernels.
///
/// There are no setters on kernels: to change a threshold, build a new config
/// and call `try_new` again.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}
