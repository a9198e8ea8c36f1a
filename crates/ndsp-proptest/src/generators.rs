//! Signal generators for property-based testing.
//!
//! Samples are produced as `f64` in units of full scale; tests multiply by
//! the backend's full-scale magnitude before quantizing.

use std::f64::consts::PI;

use proptest::prelude::*;
use test_strategy::Arbitrary;

/// Generate `len` samples uniformly drawn from `[-amplitude, amplitude]`.
pub fn signal_f64(len: usize, amplitude: f64) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-amplitude..=amplitude, len..=len)
}

/// Generate a power of two `2^k` with `k` in `min_log2..=max_log2`.
pub fn power_of_two(min_log2: u32, max_log2: u32) -> impl Strategy<Value = usize> {
    (min_log2..=max_log2).prop_map(|k| 1usize << k)
}

/// An interleaved complex signal of `n` points, `n` a power of two.
#[derive(Debug, Clone, Arbitrary)]
pub struct ComplexSignal {
    #[strategy(power_of_two(4, 10))]
    pub n: usize,
    #[strategy(signal_f64(2 * #n, 0.5))]
    pub samples: Vec<f64>,
}

/// A real signal of `n` points, `n` a power of two.
#[derive(Debug, Clone, Arbitrary)]
pub struct RealSignal {
    #[strategy(power_of_two(5, 10))]
    pub n: usize,
    #[strategy(signal_f64(#n, 0.5))]
    pub samples: Vec<f64>,
}

/// A real signal sized for the DCT family (`32..=1024` points).
#[derive(Debug, Clone, Arbitrary)]
pub struct DctSignal {
    #[strategy(power_of_two(5, 10))]
    pub n: usize,
    #[strategy(signal_f64(#n, 0.5))]
    pub samples: Vec<f64>,
}

/// A `2n`-sample MDCT input frame for `n` coefficients.
#[derive(Debug, Clone, Arbitrary)]
pub struct MdctFrame {
    #[strategy(power_of_two(5, 9))]
    pub n: usize,
    #[strategy(signal_f64(2 * #n, 0.5))]
    pub samples: Vec<f64>,
}

/// A real sinusoid completing `cycles` periods over `len` samples.
pub fn tone(len: usize, cycles: f64, amplitude: f64, phase: f64) -> Vec<f64> {
    (0..len)
        .map(|i| amplitude * (2.0 * PI * cycles * i as f64 / len as f64 + phase).cos())
        .collect()
}

/// `0, 1, 2, ..., len - 1`.
pub fn ramp(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}
