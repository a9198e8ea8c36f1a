//! Transform configuration: scaling modes, reorder strategies, MDCT windows
//! and the supported size table.

use std::f64::consts::PI;
use std::fmt;

use ndsp_fixed::PrecisionKind;

use crate::error::Error;

/// Below this size the digit-reversal permutation runs as a separate pass.
pub const FUSED_REORDER_MIN_SIZE: usize = 128;

/// Fixed-point overflow-avoidance strategy for one transform call.
///
/// The numeric codes are the ones callers pass across an FFI or config
/// boundary; see [`ScalingMode::code`] and the `TryFrom<u8>` impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalingMode {
    /// No scaling. Results that do not fit saturate.
    None,
    /// One worst-case shift of the whole input up front, unscaled stages
    /// afterwards. Needs a 32-bit sample container.
    Reduced,
    /// Each stage measures the block exponent of its input and shifts only
    /// as much as the stage can grow beyond the available headroom.
    Dynamic,
    /// Fixed shift before every stage (default).
    #[default]
    Static,
}

impl ScalingMode {
    /// Numeric code of this mode.
    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Reduced => 1,
            Self::Dynamic => 2,
            Self::Static => 3,
        }
    }

    /// Lowercase name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Reduced => "reduced",
            Self::Dynamic => "dynamic",
            Self::Static => "static",
        }
    }

    /// Whether `precision` can run in this mode. Float accepts every mode
    /// and ignores it.
    pub fn is_supported_by(self, precision: PrecisionKind) -> bool {
        !(self == Self::Reduced && precision == PrecisionKind::Fixed16x16)
    }

    pub(crate) fn check(self, precision: PrecisionKind) -> Result<(), Error> {
        if self.is_supported_by(precision) {
            Ok(())
        } else {
            Err(Error::UnsupportedScaling {
                mode: self,
                precision,
            })
        }
    }
}

impl TryFrom<u8> for ScalingMode {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Reduced),
            2 => Ok(Self::Dynamic),
            3 => Ok(Self::Static),
            other => Err(Error::InvalidScalingCode(other)),
        }
    }
}

impl fmt::Display for ScalingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// Sign convention of a complex transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Kernel `exp(-2 pi i k n / N)`.
    Forward,
    /// Kernel `exp(+2 pi i k n / N)`, unnormalised.
    Inverse,
}

/// Where the digit-reversal permutation of the complex FFT happens.
///
/// Both strategies produce bit-identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reorder {
    /// The butterflies finish in place, then a separate pass permutes the
    /// result into the output buffer.
    Separate,
    /// The terminal butterfly stage stores its results straight to their
    /// permuted positions in the output buffer.
    Fused,
}

impl Reorder {
    /// Default strategy for an `n`-point complex FFT.
    pub fn for_size(n: usize) -> Self {
        if n < FUSED_REORDER_MIN_SIZE {
            Self::Separate
        } else {
            Self::Fused
        }
    }
}

/// Analysis/synthesis window of an MDCT plan, `2N` taps long.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Window {
    /// No windowing.
    #[default]
    Rectangular,
    /// `sin(pi / 2N * (n + 1/2))`, the Princen-Bradley sine window.
    Sine,
    /// Caller-supplied taps in `[-1, 1]`. Must have length `2N`.
    Custom(Vec<f64>),
}

impl Window {
    /// Taps for an MDCT with `n` coefficients, or `None` for rectangular.
    pub fn taps(&self, n: usize) -> Result<Option<Vec<f64>>, Error> {
        let len = 2 * n;
        match self {
            Self::Rectangular => Ok(None),
            Self::Sine => Ok(Some(
                (0..len)
                    .map(|i| (PI / len as f64 * (i as f64 + 0.5)).sin())
                    .collect(),
            )),
            Self::Custom(taps) if taps.len() == len => Ok(Some(taps.clone())),
            Self::Custom(taps) => Err(Error::WindowLength {
                expected: len,
                actual: taps.len(),
            }),
        }
    }
}

/// Transform families, each with its own table of supported sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Complex FFT/IFFT, `N` complex points.
    Complex,
    /// Real FFT/IFFT, `N` real samples.
    Real,
    /// DCT-II and its inverse DCT-III.
    Dct,
    /// DCT-IV.
    Dct4,
    /// MDCT/IMDCT with `N` coefficients and `2N` samples.
    Mdct,
}

impl TransformKind {
    /// Human-readable transform name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Complex => "complex FFT",
            Self::Real => "real FFT",
            Self::Dct => "DCT-II/III",
            Self::Dct4 => "DCT-IV",
            Self::Mdct => "MDCT",
        }
    }

    /// Smallest and largest supported `N`. Every power of two in between is
    /// supported too.
    pub fn size_range(self) -> (usize, usize) {
        match self {
            Self::Complex => (16, 4096),
            Self::Real => (32, 4096),
            Self::Dct | Self::Dct4 | Self::Mdct => (32, 1024),
        }
    }

    /// All supported sizes in ascending order.
    pub fn supported_sizes(self) -> impl Iterator<Item = usize> {
        let (min, max) = self.size_range();
        (min.trailing_zeros()..=max.trailing_zeros()).map(|k| 1 << k)
    }

    /// Whether `n` is one of [`Self::supported_sizes`].
    pub fn supports(self, n: usize) -> bool {
        let (min, max) = self.size_range();
        n.is_power_of_two() && (min..=max).contains(&n)
    }

    pub(crate) fn check(self, n: usize) -> Result<(), Error> {
        if self.supports(n) {
            Ok(())
        } else {
            Err(Error::UnsupportedSize { transform: self, n })
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    #[test]
    fn default_mode_is_static() {
        assert_eq!(ScalingMode::default(), ScalingMode::Static);
        assert_eq!(Window::default(), Window::Rectangular);
    }

    #[test]
    fn scaling_codes() {
        for code in 0..=3u8 {
            let mode = ScalingMode::try_from(code).unwrap();
            assert_eq!(mode.code(), code);
        }
        assert_eq!(ScalingMode::try_from(2), Ok(ScalingMode::Dynamic));
        assert_eq!(
            ScalingMode::try_from(4),
            Err(Error::InvalidScalingCode(4))
        );
    }

    #[proptest]
    fn codes_above_three_are_rejected(#[strategy(4..=u8::MAX)] code: u8) {
        prop_assert_eq!(
            ScalingMode::try_from(code),
            Err(Error::InvalidScalingCode(code))
        );
    }

    #[test]
    fn reduced_needs_a_wide_container() {
        assert!(!ScalingMode::Reduced.is_supported_by(PrecisionKind::Fixed16x16));
        assert!(ScalingMode::Reduced.is_supported_by(PrecisionKind::Fixed24x24));
        assert!(ScalingMode::Reduced.is_supported_by(PrecisionKind::Float32));
        assert!(ScalingMode::Dynamic.is_supported_by(PrecisionKind::Fixed16x16));
        assert_eq!(
            ScalingMode::Reduced.check(PrecisionKind::Fixed16x16),
            Err(Error::UnsupportedScaling {
                mode: ScalingMode::Reduced,
                precision: PrecisionKind::Fixed16x16
            })
        );
    }

    #[test]
    fn reorder_by_size() {
        assert_eq!(Reorder::for_size(16), Reorder::Separate);
        assert_eq!(Reorder::for_size(64), Reorder::Separate);
        assert_eq!(Reorder::for_size(128), Reorder::Fused);
        assert_eq!(Reorder::for_size(4096), Reorder::Fused);
    }

    #[test]
    fn size_tables() {
        let complex: Vec<usize> = TransformKind::Complex.supported_sizes().collect();
        assert_eq!(complex, [16, 32, 64, 128, 256, 512, 1024, 2048, 4096]);
        let dct: Vec<usize> = TransformKind::Dct.supported_sizes().collect();
        assert_eq!(dct, [32, 64, 128, 256, 512, 1024]);
        assert_eq!(TransformKind::Real.supported_sizes().count(), 8);

        assert!(TransformKind::Mdct.supports(512));
        assert!(!TransformKind::Mdct.supports(2048));
        assert!(!TransformKind::Real.supports(16));
        assert!(!TransformKind::Complex.supports(48));
        assert!(!TransformKind::Complex.supports(0));
    }

    #[test]
    fn mode_and_transform_names() {
        assert_eq!(ScalingMode::Reduced.name(), "reduced");
        assert_eq!(ScalingMode::Static.to_string(), "static (3)");
        assert_eq!(TransformKind::Dct4.name(), "DCT-IV");
        assert_eq!(TransformKind::Mdct.to_string(), TransformKind::Mdct.name());
    }

    #[proptest]
    fn supports_agrees_with_size_table(#[strategy(0usize..=8192)] n: usize) {
        for kind in [
            TransformKind::Complex,
            TransformKind::Real,
            TransformKind::Dct,
            TransformKind::Dct4,
            TransformKind::Mdct,
        ] {
            prop_assert_eq!(kind.supports(n), kind.supported_sizes().any(|m| m == n));
        }
    }

    #[test]
    fn sine_window_is_princen_bradley() {
        let n = 32;
        let taps = Window::Sine.taps(n).unwrap().unwrap();
        assert_eq!(taps.len(), 2 * n);
        for i in 0..n {
            let sum = taps[i] * taps[i] + taps[i + n] * taps[i + n];
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn custom_window_length_is_checked() {
        assert_eq!(Window::Rectangular.taps(32), Ok(None));
        let taps = vec![0.5; 64];
        assert_eq!(Window::Custom(taps.clone()).taps(32), Ok(Some(taps)));
        assert_eq!(
            Window::Custom(vec![1.0; 10]).taps(32),
            Err(Error::WindowLength {
                expected: 64,
                actual: 10
            })
        );
    }
}
