//! Scalar fixed-point primitives shared by all fixed-point backends.
//!
//! Everything operates on a widened `i64` (or `i128` for 32x32 products) and
//! is narrowed with [`saturate`]. Word widths are given in bits, sign
//! included.

/// Largest value of a signed `bits`-wide word.
#[inline]
pub const fn max_value(bits: u32) -> i64 {
    (1_i64 << (bits - 1)) - 1
}

/// Smallest value of a signed `bits`-wide word.
#[inline]
pub const fn min_value(bits: u32) -> i64 {
    -(1_i64 << (bits - 1))
}

/// Clamp `v` into a signed `bits`-wide word.
#[inline]
pub fn saturate(v: i64, bits: u32) -> i64 {
    v.clamp(min_value(bits), max_value(bits))
}

/// Clamp a 128-bit intermediate into a signed `bits`-wide word.
#[inline]
pub fn saturate_wide(v: i128, bits: u32) -> i64 {
    v.clamp(min_value(bits) as i128, max_value(bits) as i128) as i64
}

/// Arithmetic right shift, rounding half up.
#[inline]
pub fn round_shift(v: i64, shift: u32) -> i64 {
    match shift {
        0 => v,
        1..=62 => (v + (1_i64 << (shift - 1))) >> shift,
        // Everything is shifted out.
        _ => 0,
    }
}

/// [`round_shift`] for 128-bit products.
#[inline]
pub fn round_shift_wide(v: i128, shift: u32) -> i128 {
    if shift == 0 {
        return v;
    }
    (v + (1_i128 << (shift - 1))) >> shift
}

/// Saturating left shift into a signed `bits`-wide word.
#[inline]
pub fn shift_left_sat(v: i64, shift: u32, bits: u32) -> i64 {
    if v == 0 {
        return 0;
    }
    // Beyond `bits` any nonzero value saturates.
    if shift >= bits {
        return if v < 0 {
            min_value(bits)
        } else {
            max_value(bits)
        };
    }
    saturate(v << shift, bits)
}

/// Quantize a real value in `[-1, 1]` to a Q(`bits`-1) word, rounding to
/// nearest. The range is symmetric: `1.0` maps to the largest positive code
/// and `-1.0` to its negation.
#[inline]
pub fn quantize_unit(v: f64, bits: u32) -> i64 {
    let max = max_value(bits);
    let scaled = (v * (1_i64 << (bits - 1)) as f64).round();
    (scaled as i64).clamp(-max, max)
}

/// Q-format multiply: `round(a * b / 2^frac_bits)`, saturated to `bits`.
#[inline]
pub fn mul_q(a: i64, b: i64, frac_bits: u32, bits: u32) -> i64 {
    saturate(round_shift(a * b, frac_bits), bits)
}

/// Complex Q-format multiply `(ar + i·ai)(br + i·bi)` with a single rounding
/// per output component. Inputs must fit in 32 bits.
#[inline]
pub fn cmul_q(ar: i64, ai: i64, br: i64, bi: i64, frac_bits: u32, bits: u32) -> (i64, i64) {
    let re = ar as i128 * br as i128 - ai as i128 * bi as i128;
    let im = ar as i128 * bi as i128 + ai as i128 * br as i128;
    (
        saturate_wide(round_shift_wide(re, frac_bits), bits),
        saturate_wide(round_shift_wide(im, frac_bits), bits),
    )
}
