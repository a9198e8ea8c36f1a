//! Fixed-point arithmetic and precision backends for the ndsp transforms.
//!
//! The transform engine is written once against the [`Precision`] trait.
//! Each implementation is one execution backend: a sample word width, a
//! twiddle word width and the saturating, rounding arithmetic that goes with
//! them.
//!
//! | Backend | Sample | Twiddle |
//! |---|---|---|
//! | [`Fixed16`] | `i16`, Q15 | `i16`, Q15 |
//! | [`Fixed24`] | `i32` holding 24 bits, Q23 | `i32`, Q23 |
//! | [`Fixed32x16`] | `i32`, Q31 | `i16`, Q15 |
//! | [`Fixed32`] | `i32`, Q31 | `i32`, Q31 |
//! | [`Float32`] | `f32` | `f32` |
//!
//! Fixed-point backends never wrap: every add, subtract, negate and multiply
//! clamps to the representable range, and every right shift rounds to
//! nearest.

#![deny(unsafe_code)]

pub mod bexp;
pub mod ops;
mod precision;

pub use bexp::{bexp16, bexp24, bexp32, nsa16, nsa24, nsa32};
pub use precision::{Fixed16, Fixed24, Fixed32, Fixed32x16, Float32, Precision, PrecisionKind};
