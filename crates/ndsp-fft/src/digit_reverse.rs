//! Digit-reversal permutation for the mixed radix-4/2 decimation-in-frequency
//! FFT.
//!
//! A DIF cascade over `N = 4^m * r` (`r` in `{1, 2}`) runs radix-4 stages
//! and, for odd powers of two, one terminal radix-2 stage. Its output lands
//! in digit-reversed order: the first stage's digit is the least significant
//! digit of the frequency index.

/// Radix of every butterfly stage, first stage first.
pub fn radices(n: usize) -> Vec<usize> {
    debug_assert!(n.is_power_of_two() && n >= 2);
    let log2 = n.trailing_zeros() as usize;
    let mut stages = vec![4; log2 / 2];
    if log2 % 2 == 1 {
        stages.push(2);
    }
    stages
}

/// For every output position `p` of the butterfly cascade, the frequency
/// index `k` stored there.
pub fn digit_reversal(n: usize) -> Vec<usize> {
    let stages = radices(n);
    (0..n)
        .map(|p| {
            let mut span = n;
            let mut rest = p;
            let mut weight = 1;
            let mut k = 0;
            for &radix in &stages {
                span /= radix;
                k += (rest / span) * weight;
                rest %= span;
                weight *= radix;
            }
            k
        })
        .collect()
}

/// Copy interleaved complex `src` into natural order: `dst[k] = src[p]`
/// where `k = permutation[p]`.
pub fn permute<T: Copy>(permutation: &[usize], src: &[T], dst: &mut [T]) {
    debug_assert_eq!(src.len(), 2 * permutation.len());
    debug_assert_eq!(dst.len(), src.len());
    for (p, &k) in permutation.iter().enumerate() {
        dst[2 * k] = src[2 * p];
        dst[2 * k + 1] = src[2 * p + 1];
    }
}
