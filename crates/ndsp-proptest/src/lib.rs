//! Property-based test support for the ndsp transforms.
//!
//! Provides signal generators, comparison utilities and direct `O(N^2)`
//! double-precision reference transforms to check the fast paths against.
//!
//! # Usage
//!
//! ```ignore
//! use ndsp_proptest::generators::*;
//! use ndsp_proptest::reference;
//! use test_strategy::proptest;
//!
//! #[proptest]
//! fn my_test(signal: ComplexSignal) {
//!     let spectrum = reference::dft(&signal.samples, false);
//!     assert_eq!(spectrum.len(), signal.samples.len());
//! }
//! ```

pub mod comparison;
pub mod generators;
pub mod reference;

pub use proptest;
pub use test_strategy;
