//! DCT-II and its inverse DCT-III through a real FFT of the same size.
//!
//! The forward transform reorders the input so that the even samples run
//! forwards and the odd samples backwards, `v = [x0, x2, ..., x3, x1]`.
//! The DCT-II is then the real part of `W_4N^k V[k]` where `V` is the real
//! FFT of `v`, and the pair `(k, N-k)` falls out of a single complex
//! rotation. The inverse runs the same steps backwards.
//!
//! All intermediate spectra use the packed layout: `N` values with the real
//! Nyquist bin stored at `[1]`.

use std::f64::consts::FRAC_1_SQRT_2;
use std::sync::Arc;

use ndsp_fixed::Precision;

use crate::config::{Direction, ScalingMode, TransformKind};
use crate::error::{Error, check_len};
use crate::scaling::Scaler;
use crate::split::{Layout, RealFftPlan};
use crate::twiddle::{TwiddleTable, Twiddles};

/// A validated DCT-II / DCT-III pair of size `N`.
///
/// ```text
/// forward:  X[k] = sum_n x[n] cos(pi (2n + 1) k / 2N)
/// inverse:  x[n] = X[0] + 2 sum_{k>0} X[k] cos(pi (2n + 1) k / 2N)
/// ```
///
/// so that `inverse(forward(x))` scaled back by both shifts is `N * x`.
#[derive(derive_more::Debug)]
pub struct DctPlan<P: Precision> {
    n: usize,
    rfft: RealFftPlan<P>,
    #[debug(skip)]
    rotation: Twiddles<P>,
    #[debug(skip)]
    cos_pi_4: P::Twiddle,
}

impl<P: Precision> Clone for DctPlan<P> {
    fn clone(&self) -> Self {
        Self {
            n: self.n,
            rfft: self.rfft.clone(),
            rotation: self.rotation.clone(),
            cos_pi_4: self.cos_pi_4,
        }
    }
}

impl<P: Precision> DctPlan<P> {
    pub fn new(n: usize) -> Result<Self, Error> {
        TransformKind::Dct.check(n)?;
        // One table of 4N points serves the rotation (W_4N), the split
        // (W_N) and the inner complex FFT (W_N/2).
        let table = Arc::new(TwiddleTable::new(4 * n)?);
        let rotation = Twiddles::new(Arc::clone(&table), 4 * n)?;
        let rfft = RealFftPlan::with_table(n, table)?;
        tracing::debug!(n, precision = %P::KIND, "DCT plan");
        Ok(Self {
            n,
            rfft,
            rotation,
            cos_pi_4: P::twiddle_from_f64(FRAC_1_SQRT_2),
        })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Static shift of [`forward`](Self::forward): `log2(N) + 1`.
    pub fn forward_static_shift(&self) -> u32 {
        self.rfft.forward_static_shift()
    }

    /// Static shift of [`inverse`](Self::inverse): `log2(N) + 3`.
    pub fn inverse_static_shift(&self) -> u32 {
        self.rfft.inverse_static_shift() + 1
    }

    /// DCT-II of `x` into `y`, `N` values each. `x` is clobbered.
    pub fn forward(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        mode: ScalingMode,
    ) -> Result<u32, Error> {
        check_len("x", x, self.n)?;
        check_len("y", y, self.n)?;
        let scaler = Scaler::new::<P>(mode)?;
        let (scaler, pre) = scaler.begin::<P>(x, self.forward_static_shift());
        let shift = pre + self.run_forward(x, y, scaler);
        tracing::trace!(n = self.n, %mode, shift, "DCT-II");
        Ok(shift)
    }

    /// DCT-III of `x` into `y`, `N` values each. `x` is clobbered.
    pub fn inverse(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        mode: ScalingMode,
    ) -> Result<u32, Error> {
        check_len("x", x, self.n)?;
        check_len("y", y, self.n)?;
        let scaler = Scaler::new::<P>(mode)?;
        let (scaler, pre) = scaler.begin::<P>(x, self.inverse_static_shift());
        let shift = pre + self.run_inverse(x, y, scaler);
        tracing::trace!(n = self.n, %mode, shift, "DCT-III");
        Ok(shift)
    }

    fn run_forward(&self, x: &mut [P::Sample], y: &mut [P::Sample], scaler: Scaler) -> u32 {
        let n = self.n;
        let h = n / 2;
        for k in 0..h {
            y[k] = x[2 * k];
            y[n - 1 - k] = x[2 * k + 1];
        }
        let fft_shift = self.rfft.run_forward(y, x, scaler, Layout::Packed);

        let s = scaler.stage::<P>(x, 0, 1);
        y[0] = P::shr(x[0], s);
        y[h] = P::mul(P::shr(x[1], s), self.cos_pi_4);
        for k in 1..h {
            let (re, im) = (P::shr(x[2 * k], s), P::shr(x[2 * k + 1], s));
            let (re, im) = self.rotation.rotate(re, im, k, Direction::Forward);
            y[k] = re;
            y[n - k] = P::neg(im);
        }
        fft_shift + s
    }

    fn run_inverse(&self, x: &mut [P::Sample], y: &mut [P::Sample], scaler: Scaler) -> u32 {
        let n = self.n;
        let h = n / 2;
        let s = scaler.stage::<P>(x, 1, 1);
        y[0] = P::shr(x[0], s);
        // 2 cos(pi/4) X[N/2] lands in the Nyquist slot.
        let mid = P::mul(x[h], self.cos_pi_4);
        y[1] = if s >= 1 {
            P::shr(mid, s - 1)
        } else {
            P::shl(mid, 1)
        };
        for k in 1..h {
            let (re, im) = (P::shr(x[k], s), P::neg(P::shr(x[n - k], s)));
            let (re, im) = self.rotation.rotate(re, im, k, Direction::Inverse);
            y[2 * k] = re;
            y[2 * k + 1] = im;
        }
        let fft_shift = self.rfft.run_inverse(y, x, scaler, Layout::Packed);

        for k in 0..h {
            y[2 * k] = x[k];
            y[2 * k + 1] = x[n - 1 - k];
        }
        s + fft_shift
    }
}
