//! MDCT and IMDCT through a DCT-IV of the same size.
//!
//! A frame of `2N` samples is split into quarters `a b c d` of `N/2` each
//! and folded into `N` values `(-c_r - d, a - b_r)` (`_r` is reversal),
//! whose DCT-IV is the MDCT. The IMDCT runs the DCT-IV and unfolds the
//! result into `(B, -B_r, -A_r, -A)` where `A B` are its two halves.

use ndsp_fixed::Precision;

use crate::config::{ScalingMode, TransformKind, Window};
use crate::dct4::Dct4Plan;
use crate::error::{Error, check_len};
use crate::scaling::Scaler;

/// A validated MDCT producing `N` coefficients from `2N` samples.
///
/// ```text
/// X[k] = sum_{n<2N} w[n] x[n] cos(pi / N (n + 1/2 + N/2)(k + 1/2))
/// y[n] = w[n] sum_{k<N} X[k] cos(pi / N (n + 1/2 + N/2)(k + 1/2))
/// ```
///
/// Overlap-adding consecutive inverse frames (hop `N`) reconstructs the
/// signal scaled by `N` for the rectangular window and by `N/2` for any
/// window with `w[n]^2 + w[n+N]^2 = 1`.
#[derive(derive_more::Debug)]
pub struct MdctPlan<P: Precision> {
    n: usize,
    dct4: Dct4Plan<P>,
    window: Window,
    #[debug(skip)]
    taps: Option<Vec<P::Twiddle>>,
}

impl<P: Precision> Clone for MdctPlan<P> {
    fn clone(&self) -> Self {
        Self {
            n: self.n,
            dct4: self.dct4.clone(),
            window: self.window.clone(),
            taps: self.taps.clone(),
        }
    }
}

impl<P: Precision> MdctPlan<P> {
    /// Plan with a rectangular window.
    pub fn new(n: usize) -> Result<Self, Error> {
        Self::with_window(n, Window::Rectangular)
    }

    pub fn with_window(n: usize, window: Window) -> Result<Self, Error> {
        TransformKind::Mdct.check(n)?;
        let taps = window
            .taps(n)?
            .map(|taps| taps.into_iter().map(P::twiddle_from_f64).collect());
        let dct4 = Dct4Plan::new(n)?;
        tracing::debug!(n, precision = %P::KIND, ?window, "MDCT plan");
        Ok(Self {
            n,
            dct4,
            window,
            taps,
        })
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Static shift of [`forward`](Self::forward): `log2(N) + 2`.
    pub fn forward_static_shift(&self) -> u32 {
        1 + self.dct4.static_shift()
    }

    /// Static shift of [`inverse`](Self::inverse): `log2(N) + 1`.
    pub fn inverse_static_shift(&self) -> u32 {
        self.dct4.static_shift()
    }

    /// MDCT of `2N` samples in `x` into `N` coefficients in `y`. `x` is
    /// clobbered.
    pub fn forward(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        mode: ScalingMode,
    ) -> Result<u32, Error> {
        check_len("x", x, 2 * self.n)?;
        check_len("y", y, self.n)?;
        let scaler = Scaler::new::<P>(mode)?;
        let (scaler, pre) = scaler.begin::<P>(x, self.forward_static_shift());

        let n = self.n;
        let h = n / 2;
        self.apply_window(x);
        let s = scaler.stage::<P>(x, 1, 1);
        for i in 0..h {
            let c = P::shr(x[3 * h - 1 - i], s);
            let d = P::shr(x[3 * h + i], s);
            y[i] = P::sub(P::neg(c), d);
            let a = P::shr(x[i], s);
            let b = P::shr(x[n - 1 - i], s);
            y[h + i] = P::sub(a, b);
        }
        let dct_shift = self.dct4.run(y, &mut x[..n], scaler);
        // The DCT-IV leaves its result in its second buffer.
        y.copy_from_slice(&x[..n]);

        let shift = pre + s + dct_shift;
        tracing::trace!(n, %mode, shift, "MDCT");
        Ok(shift)
    }

    /// IMDCT of `N` coefficients in `x` into `2N` samples in `y`. `x` is
    /// clobbered.
    pub fn inverse(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        mode: ScalingMode,
    ) -> Result<u32, Error> {
        check_len("x", x, self.n)?;
        check_len("y", y, 2 * self.n)?;
        let scaler = Scaler::new::<P>(mode)?;
        let (scaler, pre) = scaler.begin::<P>(x, self.inverse_static_shift());

        let n = self.n;
        let h = n / 2;
        let dct_shift = self.dct4.run(x, &mut y[..n], scaler);
        x.copy_from_slice(&y[..n]);
        for i in 0..h {
            y[i] = x[h + i];
            y[h + i] = P::neg(x[n - 1 - i]);
            y[n + i] = P::neg(x[h - 1 - i]);
            y[3 * h + i] = P::neg(x[i]);
        }
        self.apply_window(y);

        let shift = pre + dct_shift;
        tracing::trace!(n, %mode, shift, "IMDCT");
        Ok(shift)
    }

    fn apply_window(&self, x: &mut [P::Sample]) {
        if let Some(taps) = &self.taps {
            for (v, &w) in x.iter_mut().zip(taps) {
                *v = P::mul(*v, w);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ndsp_fixed::{Fixed16, Fixed32, Float32};
    use ndsp_proptest::comparison::{assert_relative_rms, compare_f64};
    use ndsp_proptest::generators::{MdctFrame, tone};
    use ndsp_proptest::reference;
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::test_support::{
        dequantize, for_each_precision, quantize, safe_modes, test_signal, tolerance, zeros,
    };

    fn check_forward<P: Precision>(frame: &[f64], expected: &[f64]) {
        let n = frame.len() / 2;
        let plan = MdctPlan::<P>::new(n).unwrap();
        for mode in safe_modes::<P>() {
            let mut x = quantize::<P>(frame);
            let mut y = zeros::<P>(n);
            let shift = plan.forward(&mut x, &mut y, mode).unwrap();
            let result = compare_f64(&dequantize::<P>(&y, shift), expected, f64::INFINITY);
            assert!(
                result.relative_rms() < tolerance(P::KIND, mode),
                "{} {mode} n={n}: {result}",
                P::KIND
            );
        }
    }

    fn check_inverse<P: Precision>(coefficients: &[f64]) {
        let n = coefficients.len();
        let plan = MdctPlan::<P>::new(n).unwrap();
        for mode in safe_modes::<P>() {
            let input = quantize::<P>(coefficients);
            let expected = reference::imdct(&dequantize::<P>(&input, 0));
            let mut x = input;
            let mut y = zeros::<P>(2 * n);
            let shift = plan.inverse(&mut x, &mut y, mode).unwrap();
            let result = compare_f64(&dequantize::<P>(&y, shift), &expected, f64::INFINITY);
            assert!(
                result.relative_rms() < tolerance(P::KIND, mode),
                "{} {mode} n={n}: {result}",
                P::KIND
            );
        }
    }

    #[proptest(ProptestConfig::with_cases(16))]
    fn forward_matches_direct_sum(frame: MdctFrame) {
        let expected = reference::mdct(&frame.samples);
        for_each_precision!(check_forward(&frame.samples, &expected));
    }

    #[test]
    fn every_supported_size_matches_direct_sum() {
        for n in TransformKind::Mdct.supported_sizes() {
            let frame = test_signal(2 * n);
            let expected = reference::mdct(&frame);
            for_each_precision!(check_forward(&frame, &expected));
        }
    }

    #[proptest(ProptestConfig::with_cases(16))]
    fn inverse_matches_direct_sum(frame: MdctFrame) {
        for_each_precision!(check_inverse(&frame.samples[..frame.n]));
    }

    /// Analyse `signal` in hops of `n`, synthesise and overlap-add. Returns
    /// the reconstruction of every sample covered by two frames.
    fn overlap_add<P: Precision>(plan: &MdctPlan<P>, signal: &[f64], mode: ScalingMode) -> Vec<f64> {
        let n = plan.len();
        let mut out = vec![0.0; signal.len()];
        for start in (0..=signal.len() - 2 * n).step_by(n) {
            let mut x = quantize::<P>(&signal[start..start + 2 * n]);
            let mut coefficients = zeros::<P>(n);
            let mut y = zeros::<P>(2 * n);
            let s1 = plan.forward(&mut x, &mut coefficients, mode).unwrap();
            let s2 = plan.inverse(&mut coefficients, &mut y, mode).unwrap();
            for (o, v) in out[start..].iter_mut().zip(dequantize::<P>(&y, s1 + s2)) {
                *o += v;
            }
        }
        out[n..signal.len() - n].to_vec()
    }

    #[test]
    fn rectangular_window_reconstructs_times_n() {
        let n = 64;
        let signal: Vec<f64> = (0..6 * n).map(|i| ((i * 17) % 41) as f64 / 41.0 - 0.5).collect();
        let plan = MdctPlan::<Float32>::new(n).unwrap();
        let back: Vec<f64> = overlap_add(&plan, &signal, ScalingMode::Static)
            .iter()
            .map(|v| v / n as f64)
            .collect();
        assert_relative_rms(&back, &signal[n..5 * n], 1e-5);
    }

    #[test]
    fn every_size_round_trips_in_float() {
        for n in TransformKind::Mdct.supported_sizes() {
            let signal = test_signal(4 * n);
            let plan = MdctPlan::<Float32>::new(n).unwrap();
            let back: Vec<f64> = overlap_add(&plan, &signal, ScalingMode::Dynamic)
                .iter()
                .map(|v| v / n as f64)
                .collect();
            assert_relative_rms(&back, &signal[n..3 * n], 1e-5);
        }
    }

    #[test]
    fn sine_window_reconstructs_times_half_n() {
        let n = 128;
        let signal: Vec<f64> = tone(5 * n, 7.3, 0.3, 0.2)
            .iter()
            .zip(tone(5 * n, 151.0, 0.15, 1.0))
            .map(|(a, b)| a + b)
            .collect();
        let plan = MdctPlan::<Fixed32>::with_window(n, Window::Sine).unwrap();
        let back: Vec<f64> = overlap_add(&plan, &signal, ScalingMode::Dynamic)
            .iter()
            .map(|v| v * 2.0 / n as f64)
            .collect();
        let expected = dequantize::<Fixed32>(&quantize::<Fixed32>(&signal[n..4 * n]), 0);
        assert_relative_rms(&back, &expected, 1e-5);
    }

    #[test]
    fn windowed_forward_matches_windowed_reference() {
        let n = 32;
        let plan = MdctPlan::<Float32>::with_window(n, Window::Sine).unwrap();
        let taps = Window::Sine.taps(n).unwrap().unwrap();
        let frame: Vec<f64> = (0..2 * n).map(|i| ((i * 5) % 13) as f64 / 13.0 - 0.5).collect();
        let windowed: Vec<f64> = frame.iter().zip(&taps).map(|(x, w)| x * w).collect();
        let mut x: Vec<f32> = frame.iter().map(|&v| v as f32).collect();
        let mut y = vec![0.0f32; n];
        plan.forward(&mut x, &mut y, ScalingMode::Static).unwrap();
        let y: Vec<f64> = y.iter().map(|&v| v as f64).collect();
        assert_relative_rms(&y, &reference::mdct(&windowed), 1e-5);
    }

    #[test]
    fn window_length_is_checked() {
        assert_eq!(
            MdctPlan::<Fixed16>::with_window(32, Window::Custom(vec![1.0; 32])).unwrap_err(),
            Error::WindowLength {
                expected: 64,
                actual: 32
            }
        );
    }

    #[test]
    fn buffer_lengths() {
        let plan = MdctPlan::<Fixed16>::new(32).unwrap();
        let mut x = zeros::<Fixed16>(32);
        let mut y = zeros::<Fixed16>(32);
        assert_eq!(
            plan.forward(&mut x, &mut y, ScalingMode::Static),
            Err(Error::BufferLength {
                buffer: "x",
                expected: 64,
                actual: 32
            })
        );
        assert_eq!(
            plan.inverse(&mut x, &mut y, ScalingMode::Static),
            Err(Error::BufferLength {
                buffer: "y",
                expected: 64,
                actual: 32
            })
        );
    }

    #[test]
    fn static_shifts() {
        let plan = MdctPlan::<Fixed16>::new(256).unwrap();
        assert_eq!(plan.forward_static_shift(), 10);
        assert_eq!(plan.inverse_static_shift(), 9);
        assert!(MdctPlan::<Fixed16>::new(2048).is_err());
    }
}
