//! Real FFT through a half-length complex FFT.
//!
//! A real signal `x` of length `N` is read as `N/2` complex points
//! `z[n] = x[2n] + i x[2n+1]`; no data movement is needed since that is
//! exactly the interleaved layout. After the complex FFT `Z = FFT(z)` the
//! split step separates the spectra of the even and odd samples,
//!
//! ```text
//! E[k] = (Z[k] + conj Z[M-k]) / 2
//! O[k] = -i (Z[k] - conj Z[M-k]) / 2          M = N/2
//! X[k] = E[k] + W_N^k O[k]
//! X[M-k] = conj(E[k] - W_N^k O[k])
//! ```
//!
//! with DC, Nyquist and the midpoint bin `N/4` in closed form. The inverse
//! runs the algebra backwards and feeds an inverse complex FFT.
//!
//! Spectra are `N/2 + 1` interleaved bins (`N + 2` values). Internally the
//! DCT uses a packed layout of `N` values that stores the real Nyquist bin
//! in the imaginary slot of DC.

use std::sync::Arc;

use ndsp_fixed::Precision;

use crate::cfft::FftPlan;
use crate::config::{Direction, ScalingMode, TransformKind};
use crate::error::{Error, check_len};
use crate::scaling::Scaler;
use crate::twiddle::{TwiddleTable, Twiddles};

/// Where the Nyquist bin lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    /// `N + 2` values, Nyquist at `[N]`, zero imaginary parts stored.
    Full,
    /// `N` values, Nyquist at `[1]`.
    Packed,
}

/// A validated real FFT of size `N`.
#[derive(derive_more::Debug)]
pub struct RealFftPlan<P: Precision> {
    n: usize,
    fft: FftPlan<P>,
    #[debug(skip)]
    twiddles: Twiddles<P>,
}

impl<P: Precision> Clone for RealFftPlan<P> {
    fn clone(&self) -> Self {
        Self {
            n: self.n,
            fft: self.fft.clone(),
            twiddles: self.twiddles.clone(),
        }
    }
}

impl<P: Precision> RealFftPlan<P> {
    pub fn new(n: usize) -> Result<Self, Error> {
        TransformKind::Real.check(n)?;
        Self::with_table(n, Arc::new(TwiddleTable::new(n)?))
    }

    /// Plan over a shared table whose length is a multiple of `n`. The
    /// split step reads it at stride `len / n`, the inner complex FFT at
    /// twice that.
    pub fn with_table(n: usize, table: Arc<TwiddleTable<P>>) -> Result<Self, Error> {
        TransformKind::Real.check(n)?;
        let twiddles = Twiddles::new(Arc::clone(&table), n)?;
        let fft = FftPlan::with_twiddles(Twiddles::new(table, n / 2)?)?;
        tracing::debug!(n, precision = %P::KIND, step = twiddles.step(), "real FFT plan");
        Ok(Self { n, fft, twiddles })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The inner `N/2`-point complex FFT.
    pub fn complex_plan(&self) -> &FftPlan<P> {
        &self.fft
    }

    /// Static shift of [`forward`](Self::forward): `log2(N) + 1`.
    pub fn forward_static_shift(&self) -> u32 {
        self.fft.static_shift() + 1
    }

    /// Static shift of [`inverse`](Self::inverse): `log2(N) + 2`.
    pub fn inverse_static_shift(&self) -> u32 {
        self.fft.static_shift() + 2
    }

    /// `N` real samples in `x` to `N/2 + 1` bins in `y` (`N + 2` values).
    /// The imaginary parts of DC and Nyquist are written as zero. Returns
    /// the accumulated right shift.
    pub fn forward(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        mode: ScalingMode,
    ) -> Result<u32, Error> {
        check_len("x", x, self.n)?;
        check_len("y", y, self.n + 2)?;
        let scaler = Scaler::new::<P>(mode)?;
        let (scaler, pre) = scaler.begin::<P>(x, self.forward_static_shift());
        let shift = pre + self.run_forward(x, y, scaler, Layout::Full);
        tracing::trace!(n = self.n, %mode, shift, "real FFT");
        Ok(shift)
    }

    /// `N/2 + 1` bins in `x` (`N + 2` values) to `N` real samples in `y`,
    /// unnormalised: the spectrum is extended Hermitian-symmetrically, so
    /// `inverse(forward(x))` scaled back by both shifts is `N * x`. The
    /// imaginary parts of DC and Nyquist are ignored.
    pub fn inverse(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        mode: ScalingMode,
    ) -> Result<u32, Error> {
        check_len("x", x, self.n + 2)?;
        check_len("y", y, self.n)?;
        let scaler = Scaler::new::<P>(mode)?;
        let (scaler, pre) = scaler.begin::<P>(x, self.inverse_static_shift());
        let shift = pre + self.run_inverse(x, y, scaler, Layout::Full);
        tracing::trace!(n = self.n, %mode, shift, "inverse real FFT");
        Ok(shift)
    }

    /// Complex FFT of `x[..N]` into `y`, then the split step in place.
    pub(crate) fn run_forward(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        scaler: Scaler,
        layout: Layout,
    ) -> u32 {
        let n = self.n;
        let fft_shift = self.fft.run(&mut x[..n], &mut y[..n], Direction::Forward, scaler);
        let shift = scaler.stage::<P>(&y[..n], 1, 2);
        self.split(y, shift, layout);
        fft_shift + shift
    }

    /// Inverse split step in place on `x`, then inverse complex FFT into `y`.
    pub(crate) fn run_inverse(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        scaler: Scaler,
        layout: Layout,
    ) -> u32 {
        let n = self.n;
        let measured = match layout {
            Layout::Full => n + 2,
            Layout::Packed => n,
        };
        let shift = scaler.stage::<P>(&x[..measured], 2, 2);
        self.merge(x, shift, layout);
        shift + self.fft.run(&mut x[..n], &mut y[..n], Direction::Inverse, scaler)
    }

    /// `Z -> X / 2^s`.
    fn split(&self, z: &mut [P::Sample], s: u32, layout: Layout) {
        let n = self.n;
        let m = n / 2;
        // The split carries an inherent 1/2.
        let p = s + 1;

        let (re, im) = (P::shr(z[0], s), P::shr(z[1], s));
        let dc = P::add(re, im);
        let nyquist = P::sub(re, im);

        for k in 1..m / 2 {
            let j = m - k;
            let (ar, ai) = (P::shr(z[2 * k], p), P::shr(z[2 * k + 1], p));
            let (br, bi) = (P::shr(z[2 * j], p), P::shr(z[2 * j + 1], p));
            let (sr, si) = (P::add(ar, br), P::sub(ai, bi));
            let (dr, di) = (P::sub(ar, br), P::add(ai, bi));
            let (rr, ri) = self.twiddles.rotate(di, P::neg(dr), k, Direction::Forward);
            z[2 * k] = P::add(sr, rr);
            z[2 * k + 1] = P::add(si, ri);
            z[2 * j] = P::sub(sr, rr);
            z[2 * j + 1] = P::sub(ri, si);
        }

        let h = m / 2;
        z[2 * h] = P::shr(z[2 * h], s);
        z[2 * h + 1] = P::neg(P::shr(z[2 * h + 1], s));

        z[0] = dc;
        match layout {
            Layout::Full => {
                z[1] = P::Sample::default();
                z[n] = nyquist;
                z[n + 1] = P::Sample::default();
            }
            Layout::Packed => z[1] = nyquist,
        }
    }

    /// `X -> 2 Z / 2^s`, the input of an inverse complex FFT that yields
    /// `N * x`.
    fn merge(&self, x: &mut [P::Sample], s: u32, layout: Layout) {
        let n = self.n;
        let m = n / 2;

        let nyquist = match layout {
            Layout::Full => x[n],
            Layout::Packed => x[1],
        };
        let (a, b) = (P::shr(x[0], s), P::shr(nyquist, s));

        for k in 1..m / 2 {
            let j = m - k;
            let (ar, ai) = (P::shr(x[2 * k], s), P::shr(x[2 * k + 1], s));
            let (br, bi) = (P::shr(x[2 * j], s), P::shr(x[2 * j + 1], s));
            let (sr, si) = (P::add(ar, br), P::sub(ai, bi));
            let (dr, di) = (P::sub(ar, br), P::add(ai, bi));
            let (rr, ri) = self.twiddles.rotate(dr, di, k, Direction::Inverse);
            x[2 * k] = P::sub(sr, ri);
            x[2 * k + 1] = P::add(si, rr);
            x[2 * j] = P::add(sr, ri);
            x[2 * j + 1] = P::sub(rr, si);
        }

        let h = m / 2;
        x[2 * h] = double::<P>(x[2 * h], s);
        x[2 * h + 1] = P::neg(double::<P>(x[2 * h + 1], s));

        x[0] = P::add(a, b);
        x[1] = P::sub(a, b);
    }
}

/// `2 v / 2^s` with a single rounding.
fn double<P: Precision>(v: P::Sample, s: u32) -> P::Sample {
    if s >= 1 {
        P::shr(v, s - 1)
    } else {
        P::shl(v, 1)
    }
}
