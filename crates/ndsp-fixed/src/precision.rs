//! Execution backends.

use std::fmt;

use crate::bexp::{bexp16, bexp24, bexp32};
use crate::ops;

/// Runtime tag for a [`Precision`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecisionKind {
    /// 16-bit samples, 16-bit twiddles.
    Fixed16x16,
    /// 24-bit samples, 24-bit twiddles.
    Fixed24x24,
    /// 32-bit samples, 16-bit twiddles.
    Fixed32x16,
    /// 32-bit samples, 32-bit twiddles.
    Fixed32x32,
    /// Single-precision floating point.
    Float32,
}

impl PrecisionKind {
    /// Returns the name of this backend.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fixed16x16 => "fixed16x16",
            Self::Fixed24x24 => "fixed24x24",
            Self::Fixed32x16 => "fixed32x16",
            Self::Fixed32x32 => "fixed32x32",
            Self::Float32 => "float32",
        }
    }

    /// True for the floating-point backend, which never shifts.
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32)
    }

    /// Significant bits of a sample word, sign included. Zero for float.
    pub fn sample_bits(self) -> u32 {
        match self {
            Self::Fixed16x16 => 16,
            Self::Fixed24x24 => 24,
            Self::Fixed32x16 | Self::Fixed32x32 => 32,
            Self::Float32 => 0,
        }
    }
}

impl fmt::Display for PrecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arithmetic of one execution backend.
///
/// Samples are stored in their native word and handed out as raw integer
/// codes (or plain floats); a `Fixed16` sample of `16384` is `0.5` full
/// scale. Twiddles are unit-magnitude factors in the backend's twiddle
/// Q-format.
pub trait Precision: Copy + fmt::Debug + Send + Sync + 'static {
    type Sample: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static;
    type Twiddle: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static;

    const KIND: PrecisionKind;

    /// Quantize a factor in `[-1, 1]` to a twiddle word.
    fn twiddle_from_f64(v: f64) -> Self::Twiddle;
    fn twiddle_to_f64(t: Self::Twiddle) -> f64;
    fn twiddle_neg(t: Self::Twiddle) -> Self::Twiddle;

    /// Round and saturate a raw value (integer code units) into a sample.
    fn quantize(v: f64) -> Self::Sample;
    /// Raw value of a sample, in integer code units.
    fn to_f64(s: Self::Sample) -> f64;
    /// Magnitude of a full-scale sample in raw units.
    fn full_scale() -> f64;

    fn add(a: Self::Sample, b: Self::Sample) -> Self::Sample;
    fn sub(a: Self::Sample, b: Self::Sample) -> Self::Sample;
    fn neg(a: Self::Sample) -> Self::Sample;
    /// Divide by `2^shift`, rounding to nearest.
    fn shr(a: Self::Sample, shift: u32) -> Self::Sample;
    /// Multiply by `2^shift`, saturating.
    fn shl(a: Self::Sample, shift: u32) -> Self::Sample;
    /// Sample times twiddle.
    fn mul(a: Self::Sample, t: Self::Twiddle) -> Self::Sample;
    /// Complex sample times complex twiddle.
    fn cmul(
        ar: Self::Sample,
        ai: Self::Sample,
        tr: Self::Twiddle,
        ti: Self::Twiddle,
    ) -> (Self::Sample, Self::Sample);

    /// Redundant sign bits of a single sample. Always zero for float.
    fn headroom(a: Self::Sample) -> u32;

    /// Block exponent: the smallest [`headroom`](Self::headroom) over `x`.
    fn bexp(x: &[Self::Sample]) -> u32 {
        x.iter()
            .map(|&v| Self::headroom(v))
            .min()
            .unwrap_or(Self::KIND.sample_bits().saturating_sub(1))
    }
}

macro_rules! fixed_backend {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:ident,
        sample: $sample:ty, $bits:expr,
        twiddle: $twiddle:ty, $tw_bits:expr,
        bexp: $bexp:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl Precision for $name {
            type Sample = $sample;
            type Twiddle = $twiddle;

            const KIND: PrecisionKind = PrecisionKind::$kind;

            #[inline]
            fn twiddle_from_f64(v: f64) -> $twiddle {
                ops::quantize_unit(v, $tw_bits) as $twiddle
            }

            #[inline]
            fn twiddle_to_f64(t: $twiddle) -> f64 {
                t as f64 / (1_i64 << ($tw_bits - 1)) as f64
            }

            #[inline]
            fn twiddle_neg(t: $twiddle) -> $twiddle {
                ops::saturate(-(t as i64), $tw_bits) as $twiddle
            }

            #[inline]
            fn quantize(v: f64) -> $sample {
                let r = v.round();
                if r >= ops::max_value($bits) as f64 {
                    ops::max_value($bits) as $sample
                } else if r <= ops::min_value($bits) as f64 {
                    ops::min_value($bits) as $sample
                } else {
                    r as $sample
                }
            }

            #[inline]
            fn to_f64(s: $sample) -> f64 {
                s as f64
            }

            #[inline]
            fn full_scale() -> f64 {
                (1_i64 << ($bits - 1)) as f64
            }

            #[inline]
            fn add(a: $sample, b: $sample) -> $sample {
                ops::saturate(a as i64 + b as i64, $bits) as $sample
            }

            #[inline]
            fn sub(a: $sample, b: $sample) -> $sample {
                ops::saturate(a as i64 - b as i64, $bits) as $sample
            }

            #[inline]
            fn neg(a: $sample) -> $sample {
                ops::saturate(-(a as i64), $bits) as $sample
            }

            #[inline]
            fn shr(a: $sample, shift: u32) -> $sample {
                ops::saturate(ops::round_shift(a as i64, shift), $bits) as $sample
            }

            #[inline]
            fn shl(a: $sample, shift: u32) -> $sample {
                ops::shift_left_sat(a as i64, shift, $bits) as $sample
            }

            #[inline]
            fn mul(a: $sample, t: $twiddle) -> $sample {
                ops::mul_q(a as i64, t as i64, $tw_bits - 1, $bits) as $sample
            }

            #[inline]
            fn cmul(ar: $sample, ai: $sample, tr: $twiddle, ti: $twiddle) -> ($sample, $sample) {
                let (re, im) = ops::cmul_q(
                    ar as i64,
                    ai as i64,
                    tr as i64,
                    ti as i64,
                    $tw_bits - 1,
                    $bits,
                );
                (re as $sample, im as $sample)
            }

            #[inline]
            fn headroom(a: $sample) -> u32 {
                $bexp(&[a])
            }

            fn bexp(x: &[$sample]) -> u32 {
                $bexp(x)
            }
        }
    };
}

fixed_backend!(
    /// 16-bit samples and twiddles, both Q15.
    Fixed16, Fixed16x16,
    sample: i16, 16,
    twiddle: i16, 16,
    bexp: bexp16
);

fixed_backend!(
    /// 24-bit samples and twiddles, Q23, held in `i32`.
    Fixed24, Fixed24x24,
    sample: i32, 24,
    twiddle: i32, 24,
    bexp: bexp24
);

fixed_backend!(
    /// 32-bit Q31 samples with 16-bit Q15 twiddles.
    Fixed32x16, Fixed32x16,
    sample: i32, 32,
    twiddle: i16, 16,
    bexp: bexp32
);

fixed_backend!(
    /// 32-bit samples and twiddles, both Q31.
    Fixed32, Fixed32x32,
    sample: i32, 32,
    twiddle: i32, 32,
    bexp: bexp32
);

/// Single-precision floating point. Shifts are plain scalings by powers of
/// two and nothing saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Float32;

impl Precision for Float32 {
    type Sample = f32;
    type Twiddle = f32;

    const KIND: PrecisionKind = PrecisionKind::Float32;

    #[inline]
    fn twiddle_from_f64(v: f64) -> f32 {
        v as f32
    }

    #[inline]
    fn twiddle_to_f64(t: f32) -> f64 {
        t as f64
    }

    #[inline]
    fn twiddle_neg(t: f32) -> f32 {
        -t
    }

    #[inline]
    fn quantize(v: f64) -> f32 {
        v as f32
    }

    #[inline]
    fn to_f64(s: f32) -> f64 {
        s as f64
    }

    #[inline]
    fn full_scale() -> f64 {
        1.0
    }

    #[inline]
    fn add(a: f32, b: f32) -> f32 {
        a + b
    }

    #[inline]
    fn sub(a: f32, b: f32) -> f32 {
        a - b
    }

    #[inline]
    fn neg(a: f32) -> f32 {
        -a
    }

    #[inline]
    fn shr(a: f32, shift: u32) -> f32 {
        a * 0.5_f32.powi(shift as i32)
    }

    #[inline]
    fn shl(a: f32, shift: u32) -> f32 {
        a * 2.0_f32.powi(shift as i32)
    }

    #[inline]
    fn mul(a: f32, t: f32) -> f32 {
        a * t
    }

    #[inline]
    fn cmul(ar: f32, ai: f32, tr: f32, ti: f32) -> (f32, f32) {
        (ar * tr - ai * ti, ar * ti + ai * tr)
    }

    #[inline]
    fn headroom(_a: f32) -> u32 {
        0
    }

    fn bexp(_x: &[f32]) -> u32 {
        0
    }
}
