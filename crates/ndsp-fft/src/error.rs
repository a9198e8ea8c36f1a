//! Error type shared by every plan.

use ndsp_fixed::PrecisionKind;

use crate::config::{ScalingMode, TransformKind};

/// Errors returned by plan construction and transform calls.
///
/// All of them are caller contract violations and are reported before any
/// buffer is touched. Fixed-point overflow is never an error: arithmetic
/// saturates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `n` is not one of the sizes the transform supports.
    UnsupportedSize { transform: TransformKind, n: usize },
    /// A caller buffer has the wrong length.
    BufferLength {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The scaling mode is not available for this precision.
    UnsupportedScaling {
        mode: ScalingMode,
        precision: PrecisionKind,
    },
    /// A numeric scaling code outside `0..=3`.
    InvalidScalingCode(u8),
    /// A custom window whose length is not `2N`.
    WindowLength { expected: usize, actual: usize },
    /// A twiddle table that cannot serve a transform of size `n`: its length
    /// is not a power of two, or not a multiple of `n`.
    TwiddleTable { table_len: usize, n: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedSize { transform, n } => {
                write!(f, "unsupported {transform} size {n}")
            }
            Self::BufferLength {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "buffer `{buffer}` has length {actual}, expected {expected}"
            ),
            Self::UnsupportedScaling { mode, precision } => {
                write!(f, "scaling mode {mode} is not supported for {precision}")
            }
            Self::InvalidScalingCode(code) => write!(f, "invalid scaling code {code}"),
            Self::WindowLength { expected, actual } => {
                write!(f, "window has length {actual}, expected {expected}")
            }
            Self::TwiddleTable { table_len, n } => write!(
                f,
                "twiddle table of length {table_len} cannot serve a {n}-point transform"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Check a caller buffer's length.
pub(crate) fn check_len<T>(buffer: &'static str, data: &[T], expected: usize) -> Result<(), Error> {
    if data.len() == expected {
        Ok(())
    } else {
        Err(Error::BufferLength {
            buffer,
            expected,
            actual: data.len(),
        })
    }
}
