//! The modulation engine: the only piece a host talks to.
//!
//! A [`Flanger`] owns one [`ChannelState`] per audio channel plus the shared
//! [`FlangerParams`]. Hosts call [`Flanger::configure`] at stream start, then
//! pull one output sample per input sample with [`Flanger::process`].

mod channel;

pub use channel::ChannelState;

use no_denormals::no_denormals;
use tracing::{debug, info, warn};

use crate::{
    control::{ParamMessage, ParamReceiver},
    dsp::lfo::validate_frequency,
    error::{FlangerError, Result},
    io::{AudioInput, AudioOutput},
    params::{
        cap_base_delay, validate_depth_ratio, validate_feedback_gain, validate_phase_offset,
        validate_regen_gain, FlangerParams,
    },
};

/// Allocated per-stream state; absent until `configure`.
struct Stream {
    sample_rate: f32,
    capacity: usize,
    channels: Vec<ChannelState>,
}

#[derive(Default)]
pub struct Flanger {
    params: FlangerParams,
    stream: Option<Stream>,
}

impl Flanger {
    /// Unconfigured engine with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconfigured engine starting from `params`.
    pub fn with_params(params: FlangerParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            stream: None,
        })
    }

    /// Allocate silent per-channel state for a stream. Must be called before
    /// processing and again whenever the sample rate changes.
    pub fn configure(
        &mut self,
        sample_rate: f32,
        channel_count: usize,
        delay_capacity_samples: usize,
    ) -> Result<()> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(FlangerError::invalid(
                "sample_rate",
                sample_rate,
                "must be a positive number of Hz",
            ));
        }
        if channel_count == 0 {
            return Err(FlangerError::invalid(
                "channel_count",
                0u32,
                "at least one channel is required",
            ));
        }

        let channels = (0..channel_count)
            .map(|n| {
                ChannelState::new(
                    sample_rate,
                    delay_capacity_samples,
                    self.params.modulation_frequency,
                    n as f32 * self.params.phase_offset,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let capped = cap_base_delay(self.params.base_delay_samples, delay_capacity_samples);
        if capped != self.params.base_delay_samples {
            warn!(
                requested = self.params.base_delay_samples,
                capped, "base delay exceeds delay capacity"
            );
            self.params.base_delay_samples = capped;
        }

        self.stream = Some(Stream {
            sample_rate,
            capacity: delay_capacity_samples,
            channels,
        });

        info!(
            sample_rate,
            channel_count, delay_capacity_samples, "flanger configured"
        );
        Ok(())
    }

    /// Silence every delay line and rewind every oscillator, keeping the
    /// current allocation.
    pub fn reset(&mut self) {
        if let Some(stream) = self.stream.as_mut() {
            stream.channels.iter_mut().for_each(ChannelState::reset);
            info!("flanger state reset");
        }
    }

    /// Process one block from `input` into `output`. Both must have one
    /// slice per configured channel, all of the same length.
    pub fn process<I, O>(&mut self, input: &[I], output: &mut [O]) -> Result<()>
    where
        I: AsRef<[f32]>,
        O: AsMut<[f32]>,
    {
        let stream = self.stream.as_mut().ok_or(FlangerError::NotConfigured)?;
        let expected = stream.channels.len();
        check_channels(expected, input.len())?;
        check_channels(expected, output.len())?;

        let frames = input[0].as_ref().len();
        for (channel, (inp, out)) in input.iter().zip(output.iter_mut()).enumerate() {
            check_length(channel, frames, inp.as_ref().len())?;
            check_length(channel, frames, out.as_mut().len())?;
        }

        let params = self.params;
        let sample_rate = stream.sample_rate;
        no_denormals(|| {
            for ((state, inp), out) in stream.channels.iter_mut().zip(input).zip(output.iter_mut())
            {
                for (x, y) in inp.as_ref().iter().zip(out.as_mut().iter_mut()) {
                    *y = state.process_sample(*x, &params, sample_rate);
                }
            }
        });
        Ok(())
    }

    /// Process one block, overwriting each channel with its output.
    pub fn process_in_place<B>(&mut self, buffers: &mut [B]) -> Result<()>
    where
        B: AsMut<[f32]>,
    {
        let stream = self.stream.as_mut().ok_or(FlangerError::NotConfigured)?;
        check_channels(stream.channels.len(), buffers.len())?;

        let frames = buffers[0].as_mut().len();
        for (channel, buffer) in buffers.iter_mut().enumerate() {
            check_length(channel, frames, buffer.as_mut().len())?;
        }

        let params = self.params;
        let sample_rate = stream.sample_rate;
        no_denormals(|| {
            for (state, buffer) in stream.channels.iter_mut().zip(buffers.iter_mut()) {
                for sample in buffer.as_mut().iter_mut() {
                    *sample = state.process_sample(*sample, &params, sample_rate);
                }
            }
        });
        Ok(())
    }

    /// Convenience wrapper over owned channel buffers.
    pub fn process_block(&mut self, input: &AudioInput, output: &mut AudioOutput) -> Result<()> {
        self.process(&input.buffers, &mut output.buffers)
    }

    /// Apply a single parameter change without logging. Realtime-safe.
    pub fn apply(&mut self, message: ParamMessage) -> Result<()> {
        match message {
            ParamMessage::DepthRatio(ratio) => {
                self.params.depth_ratio = validate_depth_ratio(ratio)?;
            }
            ParamMessage::BaseDelay(samples) => {
                self.params.base_delay_samples = match &self.stream {
                    Some(stream) => cap_base_delay(samples, stream.capacity),
                    None => samples,
                };
            }
            ParamMessage::ModulationFrequency(frequency) => {
                let frequency = validate_frequency(frequency)?;
                if let Some(stream) = self.stream.as_mut() {
                    for channel in &mut stream.channels {
                        channel.oscillator_mut().set_frequency(frequency)?;
                    }
                }
                self.params.modulation_frequency = frequency;
            }
            ParamMessage::PhaseOffset(radians) => {
                let radians = validate_phase_offset(radians)?;
                if let Some(stream) = self.stream.as_mut() {
                    for (n, channel) in stream.channels.iter_mut().enumerate() {
                        channel.oscillator_mut().set_phase_offset(n as f32 * radians);
                    }
                }
                self.params.phase_offset = radians;
            }
            ParamMessage::FeedbackGain(gain) => {
                self.params.feedback_gain = validate_feedback_gain(gain)?;
            }
            ParamMessage::RegenGain(gain) => {
                self.params.regen_gain = validate_regen_gain(gain)?;
            }
            ParamMessage::Reset => {
                if let Some(stream) = self.stream.as_mut() {
                    stream.channels.iter_mut().for_each(ChannelState::reset);
                }
            }
        }
        Ok(())
    }

    /// Drain pending control messages; call at the start of a block.
    ///
    /// Returns how many were applied. Values that fail validation are
    /// dropped and the previous value stays in effect.
    pub fn apply_messages<R: ParamReceiver>(&mut self, rx: &mut R) -> usize {
        let mut applied = 0;
        while let Some(message) = rx.pop() {
            if self.apply(message).is_ok() {
                applied += 1;
            }
        }
        applied
    }

    pub fn set_depth_ratio(&mut self, ratio: f32) -> Result<()> {
        self.apply(ParamMessage::DepthRatio(ratio))?;
        debug!(ratio, "depth ratio set");
        Ok(())
    }

    /// Set the minimum delay in samples, capped at `capacity - 1` once
    /// configured.
    pub fn set_base_delay(&mut self, samples: usize) -> Result<()> {
        self.apply(ParamMessage::BaseDelay(samples))?;
        if self.params.base_delay_samples != samples {
            warn!(
                requested = samples,
                capped = self.params.base_delay_samples,
                "base delay exceeds delay capacity"
            );
        }
        debug!(samples = self.params.base_delay_samples, "base delay set");
        Ok(())
    }

    pub fn set_modulation_frequency(&mut self, frequency: f32) -> Result<()> {
        self.apply(ParamMessage::ModulationFrequency(frequency))?;
        debug!(frequency, "modulation frequency set");
        Ok(())
    }

    pub fn set_phase_offset(&mut self, radians: f32) -> Result<()> {
        self.apply(ParamMessage::PhaseOffset(radians))?;
        debug!(radians, "phase offset set");
        Ok(())
    }

    pub fn set_feedback_gain(&mut self, gain: f32) -> Result<()> {
        self.apply(ParamMessage::FeedbackGain(gain))?;
        debug!(gain, "feedback gain set");
        Ok(())
    }

    pub fn set_regen_gain(&mut self, gain: f32) -> Result<()> {
        self.apply(ParamMessage::RegenGain(gain))?;
        debug!(gain, "regen gain set");
        Ok(())
    }

    pub fn params(&self) -> &FlangerParams {
        &self.params
    }

    pub fn is_configured(&self) -> bool {
        self.stream.is_some()
    }

    pub fn sample_rate(&self) -> Option<f32> {
        self.stream.as_ref().map(|s| s.sample_rate)
    }

    pub fn channel_count(&self) -> usize {
        self.stream.as_ref().map_or(0, |s| s.channels.len())
    }

    pub fn capacity(&self) -> Option<usize> {
        self.stream.as_ref().map(|s| s.capacity)
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelState> {
        self.stream.as_ref().and_then(|s| s.channels.get(index))
    }
}

fn check_channels(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(FlangerError::ChannelMismatch { expected, actual })
    }
}

fn check_length(channel: usize, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(FlangerError::BlockLengthMismatch {
            channel,
            expected,
            actual,
        })
    }
}
