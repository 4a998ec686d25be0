#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    control::ParamMessage,
    engine::Flanger,
    error::{FlangerError, Result},
    params::FlangerParams,
    MAX_REGEN_GAIN,
};

/*
Control Surface
===============

Users don't think in "samples of base delay" or "radians of phase". The
control surface exposes the effect as eight knobs and maps them onto the
engine's parameters.

Knobs
-----

  Depth            1.000 - 1.059    Peak pitch ratio of the sweep.
                                    1.059 is roughly one semitone.
  Rate (coarse)    0 - 8 Hz         Whole-Hz part of the LFO rate.
  Rate (fine)      0.1 - 1.0 Hz     Added to the coarse rate, so the
                                    slowest possible sweep is 0.1 Hz.
  Delay (coarse)   0 - 30 ms        Minimum delay, milliseconds.
  Delay (fine)     1 - 48 samples   Added to the coarse delay.
  Phase            0 - 180 deg      Right channel LFO offset.
  Delay gain       0 - 1            Wet share of the output.
  Regeneration     0 - 0.95         Wet share fed back into the line.

Mapping
-------

    modulation_frequency = rate_coarse + rate_fine
    base_delay_samples   = round(delay_coarse_ms * sample_rate / 1000)
                           + delay_fine_samples
    phase_offset         = phase_degrees * π / 180
    feedback_gain        = delay_gain
    regen_gain           = regen_gain

Example:

  // Slow, deep jet sweep with heavy resonance
  let settings = ControlSettings {
      depth: 1.02,
      rate_coarse_hz: 0.0,
      rate_fine_hz: 0.2,
      regen_gain: 0.8,
      ..Default::default()
  };
  settings.apply(&mut flanger)?;
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Knob {
    Depth,
    RateCoarse,
    RateFine,
    DelayCoarse,
    DelayFine,
    Phase,
    DelayGain,
    Regen,
}

/// Presentation and range of one knob.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub knob: Knob,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub unit: &'static str,
}

pub static KNOBS: [ParamSpec; 8] = [
    ParamSpec {
        knob: Knob::Depth,
        label: "Depth",
        min: 1.0,
        max: 1.059,
        step: 0.001,
        unit: "",
    },
    ParamSpec {
        knob: Knob::RateCoarse,
        label: "Rate (coarse)",
        min: 0.0,
        max: 8.0,
        step: 1.0,
        unit: " Hz",
    },
    ParamSpec {
        knob: Knob::RateFine,
        label: "Rate (fine)",
        min: 0.1,
        max: 1.0,
        step: 0.01,
        unit: " Hz",
    },
    ParamSpec {
        knob: Knob::DelayCoarse,
        label: "Delay (coarse)",
        min: 0.0,
        max: 30.0,
        step: 1.0,
        unit: " ms",
    },
    ParamSpec {
        knob: Knob::DelayFine,
        label: "Delay (fine)",
        min: 1.0,
        max: 48.0,
        step: 1.0,
        unit: " samples",
    },
    ParamSpec {
        knob: Knob::Phase,
        label: "Phase offset",
        min: 0.0,
        max: 180.0,
        step: 1.0,
        unit: " deg",
    },
    ParamSpec {
        knob: Knob::DelayGain,
        label: "Delay gain",
        min: 0.0,
        max: 1.0,
        step: 0.01,
        unit: "",
    },
    ParamSpec {
        knob: Knob::Regen,
        label: "Regeneration",
        min: 0.0,
        max: MAX_REGEN_GAIN,
        step: 0.01,
        unit: "",
    },
];

impl Knob {
    pub fn spec(self) -> &'static ParamSpec {
        &KNOBS[self as usize]
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    pub depth: f32,
    pub rate_coarse_hz: f32,
    pub rate_fine_hz: f32,
    pub delay_coarse_ms: f32,
    pub delay_fine_samples: f32,
    pub phase_balance_degrees: f32,
    pub delay_gain: f32,
    pub regen_gain: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            depth: 1.0,
            rate_coarse_hz: 1.0,
            rate_fine_hz: 0.1,
            delay_coarse_ms: 10.0,
            delay_fine_samples: 1.0,
            phase_balance_degrees: 0.0,
            delay_gain: 0.5,
            regen_gain: 0.0,
        }
    }
}

impl ControlSettings {
    pub fn get(&self, knob: Knob) -> f32 {
        match knob {
            Knob::Depth => self.depth,
            Knob::RateCoarse => self.rate_coarse_hz,
            Knob::RateFine => self.rate_fine_hz,
            Knob::DelayCoarse => self.delay_coarse_ms,
            Knob::DelayFine => self.delay_fine_samples,
            Knob::Phase => self.phase_balance_degrees,
            Knob::DelayGain => self.delay_gain,
            Knob::Regen => self.regen_gain,
        }
    }

    /// Set one knob; values outside its range are rejected.
    pub fn set(&mut self, knob: Knob, value: f32) -> Result<()> {
        check_range(knob.spec(), value)?;
        *self.slot_mut(knob) = value;
        Ok(())
    }

    /// Turn a knob by whole steps, stopping at the ends of its travel.
    /// Returns the new value.
    pub fn nudge(&mut self, knob: Knob, steps: i32) -> f32 {
        let spec = knob.spec();
        let raw = self.get(knob) + steps as f32 * spec.step;
        // Snap to the step grid so repeated nudges don't drift
        let snapped = spec.min + ((raw - spec.min) / spec.step).round() * spec.step;
        let value = snapped.clamp(spec.min, spec.max);
        *self.slot_mut(knob) = value;
        value
    }

    fn slot_mut(&mut self, knob: Knob) -> &mut f32 {
        match knob {
            Knob::Depth => &mut self.depth,
            Knob::RateCoarse => &mut self.rate_coarse_hz,
            Knob::RateFine => &mut self.rate_fine_hz,
            Knob::DelayCoarse => &mut self.delay_coarse_ms,
            Knob::DelayFine => &mut self.delay_fine_samples,
            Knob::Phase => &mut self.phase_balance_degrees,
            Knob::DelayGain => &mut self.delay_gain,
            Knob::Regen => &mut self.regen_gain,
        }
    }

    pub fn modulation_frequency(&self) -> f32 {
        self.rate_coarse_hz + self.rate_fine_hz
    }

    pub fn base_delay_samples(&self, sample_rate: f32) -> usize {
        let coarse = (self.delay_coarse_ms * sample_rate / 1000.0).round() as usize;
        coarse + self.delay_fine_samples.round() as usize
    }

    pub fn phase_offset(&self) -> f32 {
        self.phase_balance_degrees.to_radians()
    }

    /// Map every knob onto engine parameters.
    pub fn to_params(&self, sample_rate: f32) -> Result<FlangerParams> {
        for spec in &KNOBS {
            check_range(spec, self.get(spec.knob))?;
        }

        let params = FlangerParams {
            depth_ratio: self.depth,
            base_delay_samples: self.base_delay_samples(sample_rate),
            modulation_frequency: self.modulation_frequency(),
            phase_offset: self.phase_offset(),
            feedback_gain: self.delay_gain,
            regen_gain: self.regen_gain,
        };
        params.validate()?;
        Ok(params)
    }

    /// The engine-level change produced by a single knob.
    pub fn message_for(&self, knob: Knob, sample_rate: f32) -> ParamMessage {
        match knob {
            Knob::Depth => ParamMessage::DepthRatio(self.depth),
            Knob::RateCoarse | Knob::RateFine => {
                ParamMessage::ModulationFrequency(self.modulation_frequency())
            }
            Knob::DelayCoarse | Knob::DelayFine => {
                ParamMessage::BaseDelay(self.base_delay_samples(sample_rate))
            }
            Knob::Phase => ParamMessage::PhaseOffset(self.phase_offset()),
            Knob::DelayGain => ParamMessage::FeedbackGain(self.delay_gain),
            Knob::Regen => ParamMessage::RegenGain(self.regen_gain),
        }
    }

    /// All six engine parameters as messages.
    pub fn messages(&self, sample_rate: f32) -> Result<[ParamMessage; 6]> {
        let p = self.to_params(sample_rate)?;
        Ok([
            ParamMessage::DepthRatio(p.depth_ratio),
            ParamMessage::BaseDelay(p.base_delay_samples),
            ParamMessage::ModulationFrequency(p.modulation_frequency),
            ParamMessage::PhaseOffset(p.phase_offset),
            ParamMessage::FeedbackGain(p.feedback_gain),
            ParamMessage::RegenGain(p.regen_gain),
        ])
    }

    /// Push every knob to a configured engine. Nothing changes if any knob
    /// is out of range.
    pub fn apply(&self, flanger: &mut Flanger) -> Result<()> {
        let sample_rate = flanger.sample_rate().ok_or(FlangerError::NotConfigured)?;
        let p = self.to_params(sample_rate)?;

        flanger.set_depth_ratio(p.depth_ratio)?;
        flanger.set_base_delay(p.base_delay_samples)?;
        flanger.set_modulation_frequency(p.modulation_frequency)?;
        flanger.set_phase_offset(p.phase_offset)?;
        flanger.set_feedback_gain(p.feedback_gain)?;
        flanger.set_regen_gain(p.regen_gain)?;
        Ok(())
    }
}

fn check_range(spec: &ParamSpec, value: f32) -> Result<()> {
    if (spec.min..=spec.max).contains(&value) {
        Ok(())
    } else {
        Err(FlangerError::invalid(
            spec.label,
            value,
            "outside the knob's range",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knob_table_order_matches_enum() {
        for (i, spec) in KNOBS.iter().enumerate() {
            assert_eq!(spec.knob as usize, i, "{} is out of place", spec.label);
            assert!(spec.min < spec.max);
        }
    }

    #[test]
    fn test_default_mapping() {
        let params = ControlSettings::default().to_params(48000.0).unwrap();
        assert!((params.modulation_frequency - 1.1).abs() < 1e-6);
        // 10 ms at 48 kHz plus one fine sample
        assert_eq!(params.base_delay_samples, 481);
        assert_eq!(params.phase_offset, 0.0);
        assert_eq!(params.feedback_gain, 0.5);
        assert_eq!(params.regen_gain, 0.0);
        assert_eq!(params.depth_ratio, 1.0);
    }

    #[test]
    fn test_delay_follows_sample_rate() {
        let settings = ControlSettings {
            delay_coarse_ms: 20.0,
            delay_fine_samples: 5.0,
            ..Default::default()
        };
        assert_eq!(settings.base_delay_samples(44100.0), 887);
        assert_eq!(settings.base_delay_samples(96000.0), 1925);
    }

    #[test]
    fn test_phase_degrees_to_radians() {
        let settings = ControlSettings {
            phase_balance_degrees: 90.0,
            ..Default::default()
        };
        assert!((settings.phase_offset() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_knob_rejected() {
        let mut settings = ControlSettings::default();
        assert!(settings.set(Knob::Regen, 0.99).is_err());
        assert!(settings.set(Knob::RateFine, 0.0).is_err());
        assert_eq!(settings, ControlSettings::default());

        settings.depth = 2.0;
        assert!(settings.to_params(48000.0).is_err());
    }

    #[test]
    fn test_nudge_stops_at_limits() {
        let mut settings = ControlSettings::default();
        assert_eq!(settings.nudge(Knob::RateCoarse, 3), 4.0);
        assert_eq!(settings.nudge(Knob::RateCoarse, 100), 8.0);
        assert_eq!(settings.nudge(Knob::RateCoarse, -100), 0.0);

        let regen = settings.nudge(Knob::Regen, 1000);
        assert!((regen - MAX_REGEN_GAIN).abs() < 1e-6);
    }

    #[test]
    fn test_nudge_stores_value_within_travel() {
        let mut settings = ControlSettings::default();
        for spec in &KNOBS {
            for steps in [1, 7, 1000, -3, -1000] {
                let value = settings.nudge(spec.knob, steps);
                assert_eq!(settings.get(spec.knob), value, "{}", spec.label);
                assert!((spec.min..=spec.max).contains(&value), "{}", spec.label);
            }
        }
        assert!(settings.to_params(48000.0).is_ok());
    }

    #[test]
    fn test_message_for_combines_coarse_and_fine() {
        let settings = ControlSettings {
            rate_coarse_hz: 2.0,
            rate_fine_hz: 0.5,
            ..Default::default()
        };
        assert_eq!(
            settings.message_for(Knob::RateFine, 48000.0),
            ParamMessage::ModulationFrequency(2.5)
        );
        assert_eq!(
            settings.message_for(Knob::DelayFine, 48000.0),
            ParamMessage::BaseDelay(481)
        );
    }

    #[test]
    fn test_apply_requires_configured_engine() {
        let mut flanger = Flanger::new();
        assert_eq!(
            ControlSettings::default().apply(&mut flanger),
            Err(FlangerError::NotConfigured)
        );

        flanger.configure(48000.0, 2, 4800).unwrap();
        let settings = ControlSettings {
            phase_balance_degrees: 180.0,
            regen_gain: 0.5,
            ..Default::default()
        };
        settings.apply(&mut flanger).unwrap();
        assert_eq!(flanger.params().base_delay_samples, 481);
        assert_eq!(flanger.params().regen_gain, 0.5);
        let right = flanger.channel(1).unwrap().oscillator();
        assert!((right.phase_offset() - std::f32::consts::PI).abs() < 1e-6);
    }
}
