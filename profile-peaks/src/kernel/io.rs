use super::ConfigError;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use ndarray::{ArrayBase, Data, DataMut, Ix1};

/// A 1D profile that can be borrowed as one contiguous run of samples.
pub trait Read1D<T> {
    /// Samples in index order.
    fn read_slice(&self) -> Result<&[T], ConfigError>;
}

/// A 1D output buffer that kernels fill in place.
pub trait Write1D<T> {
    /// Writable samples in index order.
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError>;
}

impl<T> Read1D<T> for [T] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T> Write1D<T> for [T] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> Read1D<T> for [T; N] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self.as_slice())
    }
}

impl<T, const N: usize> Write1D<T> for [T; N] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self.as_mut_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T> Read1D<T> for Vec<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

#[cfg(feature = "alloc")]
impl<T> Write1D<T> for Vec<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

/// Strided ndarray storage (a column of a row-major image, `s![..;2]`) has
/// no slice form and is refused rather than copied.
#[cfg(feature = "alloc")]
fn contiguous<S>(samples: Option<S>) -> Result<S, ConfigError> {
    samples.ok_or(ConfigError::NonContiguous { arg: "profile" })
}

// Covers `Array1`, `ArrayView1` and `CowArray` in one impl.
#[cfg(feature = "alloc")]
impl<S, T> Read1D<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        contiguous(self.as_slice())
    }
}

// Covers `Array1` and `ArrayViewMut1`.
#[cfg(feature = "alloc")]
impl<S, T> Write1D<T> for ArrayBase<S, Ix1>
where
    S: DataMut<Elem = T>,
{
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        contiguous(self.as_slice_mut())
    }
}
