//! Twiddle-factor tables.
//!
//! A [`TwiddleTable`] of length `L` stores `exp(-2 pi i k / L)` for
//! `k = 0..=L/4`, quantized to the backend's twiddle format; the other three
//! quadrants follow by symmetry. A [`Twiddles`] view reads one table at a
//! stride (`twdstep`), so a single table serves a transform of size `L` and
//! every smaller power of two nested inside it: a DCT-IV of size `N` uses
//! an `8N` table at stride 1 for its rotations and at stride 16 for its
//! `N/2`-point complex FFT.

use std::f64::consts::PI;
use std::sync::Arc;

use ndsp_fixed::Precision;

use crate::config::Direction;
use crate::error::Error;

/// Quarter-wave table of unit complex factors.
#[derive(derive_more::Debug)]
pub struct TwiddleTable<P: Precision> {
    len: usize,
    /// Interleaved `(cos, -sin)` pairs, `len / 4 + 1` of them.
    #[debug(skip)]
    quarter: Vec<P::Twiddle>,
}

impl<P: Precision> TwiddleTable<P> {
    /// Build the table for a full circle of `len` points. `len` must be a
    /// power of two, at least 4.
    pub fn new(len: usize) -> Result<Self, Error> {
        if !len.is_power_of_two() || len < 4 {
            return Err(Error::TwiddleTable {
                table_len: len,
                n: len,
            });
        }
        let mut quarter = Vec::with_capacity(2 * (len / 4 + 1));
        for k in 0..=len / 4 {
            let angle = 2.0 * PI * k as f64 / len as f64;
            quarter.push(P::twiddle_from_f64(angle.cos()));
            quarter.push(P::twiddle_from_f64(-angle.sin()));
        }
        Ok(Self { len, quarter })
    }

    /// Number of points on the full circle.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The stored first quadrant, interleaved `(re, im)`.
    pub fn quarter(&self) -> &[P::Twiddle] {
        &self.quarter
    }

    /// `exp(-2 pi i m / len)` as `(re, im)`, for any `m`.
    pub fn factor(&self, m: usize) -> (P::Twiddle, P::Twiddle) {
        let quarter_len = self.len / 4;
        let m = m % self.len;
        let (q, r) = (m / quarter_len, m % quarter_len);
        let (a, b) = (self.quarter[2 * r], self.quarter[2 * r + 1]);
        // Multiply the first-quadrant entry by (-i)^q.
        match q {
            0 => (a, b),
            1 => (b, P::twiddle_neg(a)),
            2 => (P::twiddle_neg(a), P::twiddle_neg(b)),
            _ => (P::twiddle_neg(b), a),
        }
    }
}

/// A strided view of a shared [`TwiddleTable`]: the factors of an
/// `n`-point transform, `W_n^k = table[k * step]`.
#[derive(derive_more::Debug)]
pub struct Twiddles<P: Precision> {
    #[debug(skip)]
    table: Arc<TwiddleTable<P>>,
    n: usize,
    step: usize,
}

impl<P: Precision> Clone for Twiddles<P> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            n: self.n,
            step: self.step,
        }
    }
}

impl<P: Precision> Twiddles<P> {
    /// View `table` as the factors of an `n`-point transform. The table
    /// length must be a multiple of `n`, and `n` at least 4.
    pub fn new(table: Arc<TwiddleTable<P>>, n: usize) -> Result<Self, Error> {
        if n < 4 || !n.is_power_of_two() || table.len() % n != 0 {
            return Err(Error::TwiddleTable {
                table_len: table.len(),
                n,
            });
        }
        let step = table.len() / n;
        Ok(Self { table, n, step })
    }

    /// A view with a freshly built table of exactly `n` points.
    pub fn for_size(n: usize) -> Result<Self, Error> {
        Self::new(Arc::new(TwiddleTable::new(n)?), n)
    }

    /// Transform size this view serves.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Table stride (`twdstep`).
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn table(&self) -> &Arc<TwiddleTable<P>> {
        &self.table
    }

    /// `W_n^k = exp(-2 pi i k / n)`.
    pub fn factor(&self, k: usize) -> (P::Twiddle, P::Twiddle) {
        self.table.factor(k * self.step)
    }

    /// Multiply `re + i im` by `W_n^k`, or by its conjugate for
    /// [`Direction::Inverse`]. Whole quarter turns are exact.
    #[inline]
    pub(crate) fn rotate(
        &self,
        re: P::Sample,
        im: P::Sample,
        k: usize,
        direction: Direction,
    ) -> (P::Sample, P::Sample) {
        let table_len = self.table.len();
        let m = (k * self.step) % table_len;
        let quarter_len = table_len / 4;
        if m % quarter_len == 0 {
            let mut q = m / quarter_len;
            if direction == Direction::Inverse {
                q = (4 - q) % 4;
            }
            return match q {
                0 => (re, im),
                1 => (im, P::neg(re)),
                2 => (P::neg(re), P::neg(im)),
                _ => (P::neg(im), re),
            };
        }
        let (wr, wi) = self.table.factor(m);
        let wi = match direction {
            Direction::Forward => wi,
            Direction::Inverse => P::twiddle_neg(wi),
        };
        P::cmul(re, im, wr, wi)
    }
}
