//! Per-stage shift policy.
//!
//! Every stage of every transform asks the [`Scaler`] how far to shift its
//! input right before computing. A stage is described by two numbers: the
//! shift it takes under [`ScalingMode::Static`], and the number of bits its
//! output can grow by, which [`ScalingMode::Dynamic`] compares against the
//! measured block exponent of the stage input.

use ndsp_fixed::Precision;

use crate::config::ScalingMode;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scaler {
    mode: ScalingMode,
}

impl Scaler {
    /// Validate `mode` for `P`. Float always runs unscaled.
    pub(crate) fn new<P: Precision>(mode: ScalingMode) -> Result<Self, Error> {
        mode.check(P::KIND)?;
        let mode = if P::KIND.is_float() {
            ScalingMode::None
        } else {
            mode
        };
        Ok(Self { mode })
    }

    #[cfg(test)]
    pub(crate) fn mode(self) -> ScalingMode {
        self.mode
    }

    /// Apply the up-front shift of [`ScalingMode::Reduced`] to the whole
    /// input and return the scaler for the remaining stages together with
    /// the shift applied. `worst_case` is the total the transform would
    /// shift under static scaling.
    pub(crate) fn begin<P: Precision>(self, x: &mut [P::Sample], worst_case: u32) -> (Self, u32) {
        if self.mode != ScalingMode::Reduced {
            return (self, 0);
        }
        shift_right::<P>(x, worst_case);
        let rest = Self {
            mode: ScalingMode::None,
        };
        (rest, worst_case)
    }

    /// Shift for one stage whose input is `x`.
    pub(crate) fn stage<P: Precision>(self, x: &[P::Sample], static_bits: u32, growth_bits: u32) -> u32 {
        match self.mode {
            ScalingMode::Static => static_bits,
            ScalingMode::Dynamic => {
                let headroom = P::bexp(x);
                let shift = growth_bits.saturating_sub(headroom);
                tracing::trace!(headroom, growth_bits, shift, "dynamic stage shift");
                shift
            }
            ScalingMode::Reduced | ScalingMode::None => 0,
        }
    }
}

/// Rounding right shift of every sample in place.
pub(crate) fn shift_right<P: Precision>(x: &mut [P::Sample], shift: u32) {
    if shift == 0 {
        return;
    }
    for v in x.iter_mut() {
        *v = P::shr(*v, shift);
    }
}
