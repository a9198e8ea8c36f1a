//! Helpers shared by the transform tests.

use ndsp_fixed::{Precision, PrecisionKind};

use crate::config::ScalingMode;

/// Quantize a signal given in units of full scale.
pub(crate) fn quantize<P: Precision>(signal: &[f64]) -> Vec<P::Sample> {
    signal
        .iter()
        .map(|&v| P::quantize(v * P::full_scale()))
        .collect()
}

/// Exact values of quantized samples, in units of full scale, after undoing
/// a right shift of `shift` bits.
pub(crate) fn dequantize<P: Precision>(x: &[P::Sample], shift: u32) -> Vec<f64> {
    let scale = (1u64 << shift) as f64 / P::full_scale();
    x.iter().map(|&v| P::to_f64(v) * scale).collect()
}

/// Deterministic broadband signal in `[-0.5, 0.5)` of full scale.
pub(crate) fn test_signal(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| ((i * 7919) % 1000) as f64 / 1000.0 - 0.5)
        .collect()
}

/// Zeroed buffer.
pub(crate) fn zeros<P: Precision>(len: usize) -> Vec<P::Sample> {
    vec![P::Sample::default(); len]
}

/// Relative RMS error bound for a transform of up to 4096 points fed with
/// inputs of at most half full scale.
pub(crate) fn tolerance(kind: PrecisionKind, mode: ScalingMode) -> f64 {
    let reduced = matches!(mode, ScalingMode::Reduced | ScalingMode::None);
    match kind {
        PrecisionKind::Float32 => 1e-5,
        PrecisionKind::Fixed16x16 => 3e-2,
        PrecisionKind::Fixed24x24 if reduced => 3e-3,
        PrecisionKind::Fixed24x24 => 3e-4,
        PrecisionKind::Fixed32x16 => 3e-4,
        PrecisionKind::Fixed32x32 if reduced => 3e-5,
        PrecisionKind::Fixed32x32 => 3e-6,
    }
}

/// Scaling modes that keep half-full-scale input inside the word.
pub(crate) fn safe_modes<P: Precision>() -> Vec<ScalingMode> {
    [ScalingMode::Static, ScalingMode::Dynamic, ScalingMode::Reduced]
        .into_iter()
        .filter(|mode| mode.is_supported_by(P::KIND))
        .collect()
}

/// Run a generic check once per precision backend.
macro_rules! for_each_precision {
    ($check:ident ( $($arg:expr),* $(,)? )) => {{
        $check::<ndsp_fixed::Float32>($($arg),*);
        $check::<ndsp_fixed::Fixed16>($($arg),*);
        $check::<ndsp_fixed::Fixed24>($($arg),*);
        $check::<ndsp_fixed::Fixed32x16>($($arg),*);
        $check::<ndsp_fixed::Fixed32>($($arg),*);
    }};
}

pub(crate) use for_each_precision;
