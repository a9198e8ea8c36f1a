//! Headroom measurement.
//!
//! `nsa*` returns the number of redundant sign bits of a single word: how far
//! it can be shifted left without overflowing. `bexp*` is the minimum over a
//! block, used by dynamic scaling to decide how much to pre-shift before a
//! butterfly stage. Zero (and -1) report the full width minus the sign bit.

/// Redundant sign bits of a 16-bit word.
#[inline]
pub fn nsa16(x: i16) -> u32 {
    ((x ^ (x >> 15)) as u16).leading_zeros() - 1
}

/// Redundant sign bits of a 32-bit word.
#[inline]
pub fn nsa32(x: i32) -> u32 {
    ((x ^ (x >> 31)) as u32).leading_zeros() - 1
}

/// Redundant sign bits of a 24-bit value held in the low bits of an `i32`.
#[inline]
pub fn nsa24(x: i32) -> u32 {
    nsa32(x).saturating_sub(8)
}

/// Block exponent of a 16-bit buffer. An empty buffer reports full headroom.
pub fn bexp16(x: &[i16]) -> u32 {
    x.iter().map(|&v| nsa16(v)).min().unwrap_or(15)
}

/// Block exponent of a 24-bit buffer.
pub fn bexp24(x: &[i32]) -> u32 {
    x.iter().map(|&v| nsa24(v)).min().unwrap_or(23)
}

/// Block exponent of a 32-bit buffer.
pub fn bexp32(x: &[i32]) -> u32 {
    x.iter().map(|&v| nsa32(v)).min().unwrap_or(31)
}
