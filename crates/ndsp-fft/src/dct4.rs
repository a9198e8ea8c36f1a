//! DCT-IV through a complex FFT of half the size.
//!
//! The samples are paired as `x[2m] + i x[N-1-2m]`, pre-rotated by
//! `W_2N^m`, transformed by an `N/2`-point complex FFT and post-rotated by
//! `W_8N^(4k+1)`. The real part of output `k` is `X[2k]` and the negated
//! imaginary part is `X[N-1-2k]`.

use std::sync::Arc;

use ndsp_fixed::Precision;

use crate::cfft::FftPlan;
use crate::config::{Direction, ScalingMode, TransformKind};
use crate::error::{Error, check_len};
use crate::scaling::Scaler;
use crate::twiddle::{TwiddleTable, Twiddles};

/// A validated DCT-IV of size `N`,
/// `X[k] = sum_n x[n] cos(pi (n + 1/2)(k + 1/2) / N)`.
///
/// The transform is its own inverse up to a factor `N/2`.
#[derive(derive_more::Debug)]
pub struct Dct4Plan<P: Precision> {
    n: usize,
    fft: FftPlan<P>,
    #[debug(skip)]
    rotation: Twiddles<P>,
}

impl<P: Precision> Clone for Dct4Plan<P> {
    fn clone(&self) -> Self {
        Self {
            n: self.n,
            fft: self.fft.clone(),
            rotation: self.rotation.clone(),
        }
    }
}

impl<P: Precision> Dct4Plan<P> {
    pub fn new(n: usize) -> Result<Self, Error> {
        TransformKind::Dct4.check(n)?;
        let table = Arc::new(TwiddleTable::new(8 * n)?);
        let rotation = Twiddles::new(Arc::clone(&table), 8 * n)?;
        let fft = FftPlan::with_twiddles(Twiddles::new(table, n / 2)?)?;
        tracing::debug!(n, precision = %P::KIND, "DCT-IV plan");
        Ok(Self { n, fft, rotation })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Static shift of one call: `log2(N) + 1`.
    pub fn static_shift(&self) -> u32 {
        1 + self.fft.static_shift()
    }

    /// DCT-IV of `x` into `y`, `N` values each. `x` is clobbered.
    pub fn forward(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        mode: ScalingMode,
    ) -> Result<u32, Error> {
        check_len("x", x, self.n)?;
        check_len("y", y, self.n)?;
        let scaler = Scaler::new::<P>(mode)?;
        let (scaler, pre) = scaler.begin::<P>(x, self.static_shift());
        let shift = pre + self.run(x, y, scaler);
        tracing::trace!(n = self.n, %mode, shift, "DCT-IV");
        Ok(shift)
    }

    /// `x[..N] -> y[..N]`, using both as workspace.
    pub(crate) fn run(&self, x: &mut [P::Sample], y: &mut [P::Sample], scaler: Scaler) -> u32 {
        let n = self.n;
        let s = scaler.stage::<P>(&x[..n], 1, 1);
        for m in 0..n / 2 {
            let (re, im) = (P::shr(x[2 * m], s), P::shr(x[n - 1 - 2 * m], s));
            let (re, im) = self.rotation.rotate(re, im, 4 * m, Direction::Forward);
            y[2 * m] = re;
            y[2 * m + 1] = im;
        }

        let fft_shift = self.fft.run(&mut y[..n], &mut x[..n], Direction::Forward, scaler);

        let t = scaler.stage::<P>(&x[..n], 0, 1);
        for k in 0..n / 2 {
            let (re, im) = (P::shr(x[2 * k], t), P::shr(x[2 * k + 1], t));
            let (re, im) = self.rotation.rotate(re, im, 4 * k + 1, Direction::Forward);
            y[2 * k] = re;
            y[n - 1 - 2 * k] = P::neg(im);
        }
        s + fft_shift + t
    }
}

#[cfg(test)]
mod tests {
    use ndsp_fixed::{Fixed24, Float32};
    use ndsp_proptest::comparison::{assert_relative_rms, compare_f64};
    use ndsp_proptest::generators::DctSignal;
    use ndsp_proptest::reference;
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::test_support::{dequantize, for_each_precision, quantize, safe_modes, tolerance, zeros};

    fn check<P: Precision>(signal: &[f64]) {
        let n = signal.len();
        let plan = Dct4Plan::<P>::new(n).unwrap();
        for mode in safe_modes::<P>() {
            let input = quantize::<P>(signal);
            let expected = reference::dct4(&dequantize::<P>(&input, 0));
            let mut x = input;
            let mut y = zeros::<P>(n);
            let shift = plan.forward(&mut x, &mut y, mode).unwrap();
            let result = compare_f64(&dequantize::<P>(&y, shift), &expected, f64::INFINITY);
            assert!(
                result.relative_rms() < tolerance(P::KIND, mode),
                "{} {mode} n={n}: {result}",
                P::KIND
            );
        }
    }

    #[proptest(ProptestConfig::with_cases(16))]
    fn matches_direct_sum(signal: DctSignal) {
        for_each_precision!(check(&signal.samples));
    }

    #[proptest(ProptestConfig::with_cases(8))]
    fn applying_twice_scales_by_half_n(signal: DctSignal) {
        let n = signal.n;
        let plan = Dct4Plan::<Fixed24>::new(n).unwrap();
        let mut x = quantize::<Fixed24>(&signal.samples);
        let mut once = zeros::<Fixed24>(n);
        let mut twice = zeros::<Fixed24>(n);
        let s1 = plan.forward(&mut x, &mut once, ScalingMode::Dynamic).unwrap();
        let s2 = plan.forward(&mut once, &mut twice, ScalingMode::Dynamic).unwrap();
        let half_n = (n / 2) as f64;
        let back: Vec<f64> = dequantize::<Fixed24>(&twice, s1 + s2)
            .iter()
            .map(|v| v / half_n)
            .collect();
        let exact = dequantize::<Fixed24>(&quantize::<Fixed24>(&signal.samples), 0);
        let result = compare_f64(&back, &exact, f64::INFINITY);
        prop_assert!(result.relative_rms() < 1e-4, "{result}");
    }

    #[test]
    fn static_shift_is_log2_plus_one() {
        for n in TransformKind::Dct4.supported_sizes() {
            let plan = Dct4Plan::<Fixed24>::new(n).unwrap();
            assert_eq!(plan.static_shift(), n.trailing_zeros() + 1);
        }
    }

    #[test]
    fn every_size_round_trips_in_float() {
        for n in TransformKind::Dct4.supported_sizes() {
            let plan = Dct4Plan::<Float32>::new(n).unwrap();
            let signal: Vec<f64> = (0..n).map(|i| ((i * 29) % 31) as f64 / 31.0 - 0.5).collect();
            let mut x: Vec<f32> = signal.iter().map(|&v| v as f32).collect();
            let mut once = vec![0.0f32; n];
            let mut twice = vec![0.0f32; n];
            plan.forward(&mut x, &mut once, ScalingMode::Dynamic).unwrap();
            plan.forward(&mut once, &mut twice, ScalingMode::Dynamic).unwrap();
            let back: Vec<f64> = twice.iter().map(|&v| v as f64 * 2.0 / n as f64).collect();
            assert_relative_rms(&back, &signal, 1e-5);
        }
    }

    #[test]
    fn unsupported_sizes() {
        for n in [0, 16, 96, 2048] {
            assert_eq!(
                Dct4Plan::<Float32>::new(n).unwrap_err(),
                Error::UnsupportedSize {
                    transform: TransformKind::Dct4,
                    n
                }
            );
        }
    }
}
