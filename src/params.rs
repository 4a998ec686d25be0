//! Engine parameter set and the validation rules shared by every setter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::lfo::validate_frequency,
    error::{FlangerError, Result},
    MAX_REGEN_GAIN,
};

/// Control values read by the engine on every sample.
///
/// All channels share one set. Fields are only ever replaced whole, so a
/// sample never sees half of an update.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlangerParams {
    /// Peak frequency multiplier of the sweep (>= 1.0). 1.0 disables it.
    pub depth_ratio: f32,
    /// Minimum delay added to every read offset, in samples.
    pub base_delay_samples: usize,
    /// LFO rate in Hz.
    pub modulation_frequency: f32,
    /// Phase bias in radians; channel `n` is offset by `n * phase_offset`.
    pub phase_offset: f32,
    /// Wet amount in the monitored output, [0, 1].
    pub feedback_gain: f32,
    /// Wet amount written back into the delay line, [0, 0.95].
    pub regen_gain: f32,
}

impl Default for FlangerParams {
    fn default() -> Self {
        Self {
            depth_ratio: 1.0,
            base_delay_samples: 0,
            modulation_frequency: 1.0,
            phase_offset: 0.0,
            feedback_gain: 0.5,
            regen_gain: 0.0,
        }
    }
}

impl FlangerParams {
    /// Check every field against its domain.
    pub fn validate(&self) -> Result<()> {
        validate_depth_ratio(self.depth_ratio)?;
        validate_frequency(self.modulation_frequency)?;
        validate_phase_offset(self.phase_offset)?;
        validate_feedback_gain(self.feedback_gain)?;
        validate_regen_gain(self.regen_gain)?;
        Ok(())
    }

    /// Sweep depth in samples for the given sample rate.
    ///
    /// Relates the wanted instantaneous frequency deviation to the delay
    /// excursion: `sr * (ratio - 1) / (2π * f_lfo)`.
    #[inline]
    pub fn depth_samples(&self, sample_rate: f32, lfo_frequency: f32) -> f32 {
        sample_rate * (self.depth_ratio - 1.0) / (std::f32::consts::TAU * lfo_frequency)
    }
}

pub fn validate_depth_ratio(ratio: f32) -> Result<f32> {
    if ratio.is_finite() && ratio >= 1.0 {
        Ok(ratio)
    } else {
        Err(FlangerError::invalid(
            "depth_ratio",
            ratio,
            "must be at least 1.0",
        ))
    }
}

pub fn validate_phase_offset(radians: f32) -> Result<f32> {
    if radians.is_finite() {
        Ok(radians)
    } else {
        Err(FlangerError::invalid(
            "phase_offset",
            radians,
            "must be a finite number of radians",
        ))
    }
}

pub fn validate_feedback_gain(gain: f32) -> Result<f32> {
    if (0.0..=1.0).contains(&gain) {
        Ok(gain)
    } else {
        Err(FlangerError::invalid(
            "feedback_gain",
            gain,
            "must be within [0, 1]",
        ))
    }
}

pub fn validate_regen_gain(gain: f32) -> Result<f32> {
    if (0.0..=MAX_REGEN_GAIN).contains(&gain) {
        Ok(gain)
    } else {
        Err(FlangerError::invalid(
            "regen_gain",
            gain,
            "must be within [0, 0.95]",
        ))
    }
}

/// Largest base delay a buffer of `capacity` samples can serve.
#[inline]
pub fn cap_base_delay(samples: usize, capacity: usize) -> usize {
    samples.min(capacity.saturating_sub(1))
}
