//! Direct double-precision transforms, evaluated straight from their
//! defining sums.
//!
//! None of these are normalised. Complex data is interleaved
//! `[re0, im0, re1, im1, ...]`.

use std::f64::consts::PI;

/// Complex DFT of `x.len() / 2` points. The forward kernel is
/// `exp(-2 pi i k n / N)`; `inverse` flips its sign.
pub fn dft(x: &[f64], inverse: bool) -> Vec<f64> {
    let n = x.len() / 2;
    let sign = if inverse { 1.0 } else { -1.0 };
    // exp(sign * 2 pi i m / N) for every phase index m = k * j mod N.
    let roots: Vec<(f64, f64)> = (0..n)
        .map(|m| (sign * 2.0 * PI * m as f64 / n as f64).sin_cos())
        .collect();
    let mut out = vec![0.0; 2 * n];
    for k in 0..n {
        let (mut re, mut im) = (0.0, 0.0);
        for j in 0..n {
            let (s, c) = roots[(k * j) % n];
            re += x[2 * j] * c - x[2 * j + 1] * s;
            im += x[2 * j] * s + x[2 * j + 1] * c;
        }
        out[2 * k] = re;
        out[2 * k + 1] = im;
    }
    out
}

/// DFT of a real signal: bins `0..=N/2` interleaved, `N + 2` values.
pub fn rdft(x: &[f64]) -> Vec<f64> {
    let complex: Vec<f64> = x.iter().flat_map(|&v| [v, 0.0]).collect();
    let mut spectrum = dft(&complex, false);
    spectrum.truncate(x.len() + 2);
    spectrum
}

/// Inverse of [`rdft`] without the `1/N`: the half spectrum is extended
/// Hermitian-symmetrically, so `irdft(rdft(x)) == N * x`.
pub fn irdft(spectrum: &[f64]) -> Vec<f64> {
    let n = spectrum.len() - 2;
    let mut full = vec![0.0; 2 * n];
    for k in 0..=n / 2 {
        full[2 * k] = spectrum[2 * k];
        full[2 * k + 1] = spectrum[2 * k + 1];
    }
    for k in n / 2 + 1..n {
        full[2 * k] = spectrum[2 * (n - k)];
        full[2 * k + 1] = -spectrum[2 * (n - k) + 1];
    }
    dft(&full, true).chunks_exact(2).map(|c| c[0]).collect()
}

/// `X[k] = sum_n x[n] cos(pi (2n + 1) k / 2N)`.
pub fn dct2(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    (0..n)
        .map(|k| {
            x.iter()
                .enumerate()
                .map(|(i, &v)| v * (PI * ((2 * i + 1) * k) as f64 / (2 * n) as f64).cos())
                .sum()
        })
        .collect()
}

/// `y[n] = X[0] + 2 sum_{k >= 1} X[k] cos(pi (2n + 1) k / 2N)`, so that
/// `dct3(dct2(x)) == N * x`.
pub fn dct3(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    (0..n)
        .map(|i| {
            x[0] + 2.0
                * (1..n)
                    .map(|k| x[k] * (PI * ((2 * i + 1) * k) as f64 / (2 * n) as f64).cos())
                    .sum::<f64>()
        })
        .collect()
}

/// `X[k] = sum_n x[n] cos(pi / N (n + 1/2)(k + 1/2))`. Self-inverse up to
/// a factor `N / 2`.
pub fn dct4(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    (0..n)
        .map(|k| {
            x.iter()
                .enumerate()
                .map(|(i, &v)| {
                    v * (PI / n as f64 * (i as f64 + 0.5) * (k as f64 + 0.5)).cos()
                })
                .sum()
        })
        .collect()
}

fn mdct_kernel(n: usize, i: usize, k: usize) -> f64 {
    let n0 = 0.5 + n as f64 / 2.0;
    (PI / n as f64 * (i as f64 + n0) * (k as f64 + 0.5)).cos()
}

/// `N` coefficients from `2N` samples:
/// `X[k] = sum_n x[n] cos(pi / N (n + 1/2 + N/2)(k + 1/2))`.
pub fn mdct(x: &[f64]) -> Vec<f64> {
    let n = x.len() / 2;
    (0..n)
        .map(|k| x.iter().enumerate().map(|(i, &v)| v * mdct_kernel(n, i, k)).sum())
        .collect()
}

/// `2N` samples from `N` coefficients with the same kernel as [`mdct`].
/// Overlap-adding consecutive unwindowed frames and dividing by `N`
/// reconstructs the input. With a Princen-Bradley window applied on both
/// sides the factor is `2 / N`.
pub fn imdct(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    (0..2 * n)
        .map(|i| x.iter().enumerate().map(|(k, &v)| v * mdct_kernel(n, i, k)).sum())
        .collect()
}
