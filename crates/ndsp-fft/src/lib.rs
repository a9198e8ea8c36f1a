//! Portable transform engine: complex FFT, real FFT, DCT-II/III, DCT-IV and
//! MDCT over fixed-point and floating-point backends.
//!
//! Every transform is a validated plan ([`FftPlan`], [`RealFftPlan`],
//! [`DctPlan`], [`Dct4Plan`], [`MdctPlan`]) built once per size and called
//! with caller-owned input and output buffers. Calls return the total right
//! shift applied on the way: the fixed-point output times `2^shift` is the
//! unnormalised transform of the input. How that shift is chosen is set per
//! call by [`ScalingMode`].
//!
//! - [`cfft`]: radix-4 decimation-in-frequency complex FFT
//! - [`split`]: real FFT via an `N/2`-point complex FFT
//! - [`dct`]: DCT-II and DCT-III via the real FFT
//! - [`dct4`]: DCT-IV via an `N/2`-point complex FFT
//! - [`mdct`]: MDCT and IMDCT via the DCT-IV
//!
//! ```
//! use ndsp_fft::{FftPlan, Fixed16, ScalingMode};
//!
//! let plan = FftPlan::<Fixed16>::new(16)?;
//! let mut x = vec![0i16; 32];
//! x[0] = 1 << 14;
//! let mut y = vec![0i16; 32];
//! let shift = plan.forward(&mut x, &mut y, ScalingMode::Static)?;
//! assert_eq!(shift, 5);
//! assert!(y.chunks(2).all(|bin| bin == [512, 0]));
//! # Ok::<(), ndsp_fft::Error>(())
//! ```

#![deny(unsafe_code)]

pub mod cfft;
mod config;
pub mod dct;
pub mod dct4;
pub mod digit_reverse;
mod error;
pub mod mdct;
mod scaling;
pub mod split;
mod twiddle;

#[cfg(test)]
mod test_support;

pub use cfft::FftPlan;
pub use config::{Direction, FUSED_REORDER_MIN_SIZE, Reorder, ScalingMode, TransformKind, Window};
pub use dct::DctPlan;
pub use dct4::Dct4Plan;
pub use error::Error;
pub use mdct::MdctPlan;
pub use ndsp_fixed::{
    Fixed16, Fixed24, Fixed32, Fixed32x16, Float32, Precision, PrecisionKind, bexp16, bexp24,
    bexp32,
};
pub use split::RealFftPlan;
pub use twiddle::{TwiddleTable, Twiddles};
