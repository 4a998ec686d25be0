//! Low Frequency Oscillator (LFO) driving the delay sweep.

use crate::error::{FlangerError, Result};

/*
Counter-Driven Cosine LFO
=========================

The sweep oscillator is not a phase accumulator. It keeps an integer step
counter and evaluates the waveform analytically every sample:

    value = cos(2π * step * (frequency / sample_rate) + phase_offset)

Vocabulary
----------

  period      Whole samples per cycle: floor(sample_rate / frequency).
              At 1 Hz and 48 kHz this is 48000 samples.

  step        Integer position inside the period, 0 ..= period - 1.
              Advances once per sample and wraps to 0.

  offset      Constant phase bias in radians. The right channel of a stereo
              flanger uses a non-zero offset so the two sweeps drift apart,
              which widens the image.


Why a Counter
-------------

Because the value is a pure function of `step`, a frequency change takes
effect on the very next sample. Nothing has to be re-rendered. The only
discontinuity is the phase reset when a shorter period would leave the
counter out of range.

The counter wraps at a whole number of samples, so the cycle repeats
exactly even when sample_rate / frequency is not an integer. The last
partial sample of each ideal cycle is dropped.


Typical Rates
-------------

    0.1 - 0.5 Hz    Slow jet-plane flanger sweeps
    0.5 - 2 Hz      Classic chorus shimmer
    2 - 9 Hz        Vibrato territory (use a fully wet mix)
*/

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Calculate samples per LFO period.
///
/// # Example
/// ```
/// use saavy_flanger::dsp::lfo::samples_per_period;
/// let samples = samples_per_period(5.0, 48000.0);
/// assert_eq!(samples, 9600.0); // 5 Hz at 48kHz = 9600 samples
/// ```
#[inline]
pub fn samples_per_period(frequency_hz: f32, sample_rate: f32) -> f32 {
    sample_rate / frequency_hz
}

/// Reject non-positive or non-finite modulation rates.
pub fn validate_frequency(frequency_hz: f32) -> Result<f32> {
    if frequency_hz.is_finite() && frequency_hz > 0.0 {
        Ok(frequency_hz)
    } else {
        Err(FlangerError::invalid(
            "modulation_frequency",
            frequency_hz,
            "must be a positive number of Hz",
        ))
    }
}

#[derive(Debug, Clone)]
pub struct Oscillator {
    sample_rate: f32,
    frequency: f32,
    period_in_samples: u32,
    phase_step: u32,
    phase_offset: f32,
}

impl Oscillator {
    pub fn new(sample_rate: f32, frequency: f32) -> Result<Self> {
        let frequency = validate_frequency(frequency)?;
        Ok(Self {
            sample_rate,
            frequency,
            period_in_samples: period_for(frequency, sample_rate),
            phase_step: 0,
            phase_offset: 0.0,
        })
    }

    /// Waveform value for the current step, in [-1, 1].
    #[inline]
    pub fn current_value(&self) -> f32 {
        let cycles_per_sample = self.frequency as f64 / self.sample_rate as f64;
        let phase = std::f64::consts::TAU * self.phase_step as f64 * cycles_per_sample
            + self.phase_offset as f64;
        phase.cos() as f32
    }

    /// Retune the oscillator. Resets the phase if it would fall outside
    /// the new, shorter period.
    pub fn set_frequency(&mut self, frequency: f32) -> Result<()> {
        self.frequency = validate_frequency(frequency)?;
        self.period_in_samples = period_for(self.frequency, self.sample_rate);

        if self.phase_step >= self.period_in_samples - 1 {
            self.phase_step = 0;
        }
        Ok(())
    }

    pub fn set_phase_offset(&mut self, radians: f32) {
        self.phase_offset = radians;
    }

    /// Step once; call after `current_value` has been read for the sample.
    #[inline]
    pub fn advance(&mut self) {
        if self.phase_step + 1 < self.period_in_samples {
            self.phase_step += 1;
        } else {
            self.phase_step = 0;
        }
    }

    pub fn reset(&mut self) {
        self.phase_step = 0;
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn phase_offset(&self) -> f32 {
        self.phase_offset
    }

    pub fn period_in_samples(&self) -> u32 {
        self.period_in_samples
    }

    pub fn phase_step(&self) -> u32 {
        self.phase_step
    }
}

// Rates above the sample rate still get a one-sample period.
fn period_for(frequency: f32, sample_rate: f32) -> u32 {
    (samples_per_period(frequency, sample_rate).floor() as u32).max(1)
}
