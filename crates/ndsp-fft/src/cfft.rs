//! Radix-4 decimation-in-frequency complex FFT.
//!
//! The cascade runs `log2(N) / 2` radix-4 stages, plus a terminal radix-2
//! stage when `log2(N)` is odd. Stage `s` works on blocks of length `L`
//! (`L = N` for the first stage): for each offset `n0 < L / r` it takes the
//! `r` points spaced `L / r` apart, computes an `r`-point DFT and rotates
//! output `j` by `W_L^(j * n0)`. The terminal stage has no twiddles. Output
//! comes out digit-reversed and is put back into natural order either by a
//! separate pass or by the terminal stage itself (see [`Reorder`]).
//!
//! # Scaling
//!
//! Under [`ScalingMode::Static`] the butterfly inputs are shifted right by
//! 3 bits before the first stage, 2 bits before each further radix-4 stage
//! and 1 bit before a terminal radix-2 stage: `log2(N) + 1` bits in total,
//! which keeps any full-scale input inside the word. Dynamic scaling shifts
//! by the growth of the stage (3 bits for a twiddled radix-4 stage, 2 for a
//! terminal radix-4, 1 for a terminal radix-2) minus the measured headroom.
//!
//! [`ScalingMode::Static`]: crate::ScalingMode::Static

use ndsp_fixed::Precision;

use crate::config::{Direction, Reorder, ScalingMode, TransformKind};
use crate::digit_reverse::{digit_reversal, permute, radices};
use crate::error::{Error, check_len};
use crate::scaling::Scaler;
use crate::twiddle::Twiddles;

/// A validated complex FFT of size `N`.
///
/// Buffers are interleaved `[re0, im0, re1, im1, ...]`, `2N` values each.
/// The input buffer is used as workspace and holds garbage afterwards.
#[derive(derive_more::Debug)]
pub struct FftPlan<P: Precision> {
    n: usize,
    radices: Vec<usize>,
    #[debug(skip)]
    permutation: Vec<usize>,
    reorder: Reorder,
    #[debug(skip)]
    twiddles: Twiddles<P>,
}

impl<P: Precision> Clone for FftPlan<P> {
    fn clone(&self) -> Self {
        Self {
            n: self.n,
            radices: self.radices.clone(),
            permutation: self.permutation.clone(),
            reorder: self.reorder,
            twiddles: self.twiddles.clone(),
        }
    }
}

impl<P: Precision> FftPlan<P> {
    /// Plan an `n`-point complex FFT with its own twiddle table.
    pub fn new(n: usize) -> Result<Self, Error> {
        TransformKind::Complex.check(n)?;
        Self::with_twiddles(Twiddles::for_size(n)?)
    }

    /// Plan a complex FFT over an existing (possibly shared, strided)
    /// twiddle view. The size is the view's size.
    pub fn with_twiddles(twiddles: Twiddles<P>) -> Result<Self, Error> {
        let n = twiddles.len();
        TransformKind::Complex.check(n)?;
        let reorder = Reorder::for_size(n);
        tracing::debug!(
            n,
            precision = %P::KIND,
            step = twiddles.step(),
            ?reorder,
            "complex FFT plan"
        );
        Ok(Self {
            n,
            radices: radices(n),
            permutation: digit_reversal(n),
            reorder,
            twiddles,
        })
    }

    /// Override the reorder strategy.
    pub fn with_reorder(mut self, reorder: Reorder) -> Self {
        self.reorder = reorder;
        self
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn reorder(&self) -> Reorder {
        self.reorder
    }

    pub fn twiddles(&self) -> &Twiddles<P> {
        &self.twiddles
    }

    /// Total shift of one call under static scaling: `log2(N) + 1`.
    pub fn static_shift(&self) -> u32 {
        (0..self.radices.len())
            .map(|stage| self.stage_bits(stage).0)
            .sum()
    }

    /// Forward transform `x -> y`. Returns the accumulated right shift `s`:
    /// `y * 2^s` approximates the unnormalised DFT of `x`.
    pub fn forward(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        mode: ScalingMode,
    ) -> Result<u32, Error> {
        self.call(x, y, mode, Direction::Forward)
    }

    /// Inverse transform `x -> y`, unnormalised: `inverse(forward(x))`
    /// scaled back by its shifts is `N * x`.
    pub fn inverse(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        mode: ScalingMode,
    ) -> Result<u32, Error> {
        self.call(x, y, mode, Direction::Inverse)
    }

    fn call(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        mode: ScalingMode,
        direction: Direction,
    ) -> Result<u32, Error> {
        check_len("x", x, 2 * self.n)?;
        check_len("y", y, 2 * self.n)?;
        let scaler = Scaler::new::<P>(mode)?;
        let (scaler, pre) = scaler.begin::<P>(x, self.static_shift());
        let shift = pre + self.run(x, y, direction, scaler);
        tracing::trace!(n = self.n, ?direction, %mode, shift, "complex FFT");
        Ok(shift)
    }

    /// Static shift and growth bits of stage `stage`.
    fn stage_bits(&self, stage: usize) -> (u32, u32) {
        let terminal = stage + 1 == self.radices.len();
        match (self.radices[stage], terminal) {
            (2, _) => (1, 1),
            (_, true) => (2, 2),
            _ if stage == 0 => (3, 3),
            _ => (2, 3),
        }
    }

    /// Butterfly cascade over `x[..2N]`, natural-order result in `y[..2N]`.
    pub(crate) fn run(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        direction: Direction,
        scaler: Scaler,
    ) -> u32 {
        let n = self.n;
        let mut total = 0;
        let mut len = n;
        for (stage, &radix) in self.radices.iter().enumerate() {
            let (static_bits, growth_bits) = self.stage_bits(stage);
            let shift = scaler.stage::<P>(&x[..2 * n], static_bits, growth_bits);
            total += shift;

            let terminal = stage + 1 == self.radices.len();
            if terminal {
                self.terminal_stage(x, y, radix, shift, direction);
            } else {
                self.radix4_stage(x, len, shift, direction);
            }
            len /= radix;
        }
        total
    }

    /// One twiddled radix-4 stage on blocks of length `len`, in place.
    fn radix4_stage(&self, x: &mut [P::Sample], len: usize, shift: u32, direction: Direction) {
        let n = self.n;
        let m = len / 4;
        let stride = n / len;
        for block in (0..n).step_by(len) {
            for n0 in 0..m {
                let idx = [
                    block + n0,
                    block + n0 + m,
                    block + n0 + 2 * m,
                    block + n0 + 3 * m,
                ];
                let out = radix4::<P>(idx.map(|i| load::<P>(x, i, shift)), direction);
                for (j, (&i, (re, im))) in idx.iter().zip(out).enumerate() {
                    let (re, im) = self.twiddles.rotate(re, im, j * n0 * stride, direction);
                    x[2 * i] = re;
                    x[2 * i + 1] = im;
                }
            }
        }
    }

    /// The last stage: adjacent groups of `radix` points, no twiddles.
    fn terminal_stage(
        &self,
        x: &mut [P::Sample],
        y: &mut [P::Sample],
        radix: usize,
        shift: u32,
        direction: Direction,
    ) {
        let n = self.n;
        for block in (0..n).step_by(radix) {
            let out = if radix == 4 {
                radix4::<P>(
                    [0, 1, 2, 3].map(|j| load::<P>(x, block + j, shift)),
                    direction,
                )
            } else {
                let (a, b) = (load::<P>(x, block, shift), load::<P>(x, block + 1, shift));
                let (s, d) = radix2::<P>(a, b);
                [s, d, s, d]
            };
            for (j, &(re, im)) in out.iter().take(radix).enumerate() {
                let p = block + j;
                match self.reorder {
                    Reorder::Fused => {
                        let k = self.permutation[p];
                        y[2 * k] = re;
                        y[2 * k + 1] = im;
                    }
                    Reorder::Separate => {
                        x[2 * p] = re;
                        x[2 * p + 1] = im;
                    }
                }
            }
        }
        if self.reorder == Reorder::Separate {
            permute(&self.permutation, &x[..2 * n], &mut y[..2 * n]);
        }
    }
}

#[inline]
fn load<P: Precision>(x: &[P::Sample], i: usize, shift: u32) -> (P::Sample, P::Sample) {
    (P::shr(x[2 * i], shift), P::shr(x[2 * i + 1], shift))
}

/// 4-point DFT. Forward uses `W_4 = -i`, inverse `W_4 = +i`.
#[inline]
fn radix4<P: Precision>(
    a: [(P::Sample, P::Sample); 4],
    direction: Direction,
) -> [(P::Sample, P::Sample); 4] {
    let (t0, t1) = radix2::<P>(a[0], a[2]);
    let (t2, t3) = radix2::<P>(a[1], a[3]);
    let y0 = (P::add(t0.0, t2.0), P::add(t0.1, t2.1));
    let y2 = (P::sub(t0.0, t2.0), P::sub(t0.1, t2.1));
    // t1 - i t3 and t1 + i t3.
    let minus = (P::add(t1.0, t3.1), P::sub(t1.1, t3.0));
    let plus = (P::sub(t1.0, t3.1), P::add(t1.1, t3.0));
    match direction {
        Direction::Forward => [y0, minus, y2, plus],
        Direction::Inverse => [y0, plus, y2, minus],
    }
}

/// Sum and difference of two complex points.
#[inline]
fn radix2<P: Precision>(
    a: (P::Sample, P::Sample),
    b: (P::Sample, P::Sample),
) -> ((P::Sample, P::Sample), (P::Sample, P::Sample)) {
    (
        (P::add(a.0, b.0), P::add(a.1, b.1)),
        (P::sub(a.0, b.0), P::sub(a.1, b.1)),
    )
}
