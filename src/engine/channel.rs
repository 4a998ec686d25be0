use crate::{
    dsp::{lfo::bipolar_to_unipolar, DelayBuffer, Oscillator},
    error::Result,
    params::FlangerParams,
};

/// Everything one audio channel owns exclusively: its delay history and
/// its sweep oscillator.
pub struct ChannelState {
    buffer: DelayBuffer,
    oscillator: Oscillator,
}

impl ChannelState {
    pub(crate) fn new(
        sample_rate: f32,
        capacity: usize,
        frequency: f32,
        phase_offset: f32,
    ) -> Result<Self> {
        let mut oscillator = Oscillator::new(sample_rate, frequency)?;
        oscillator.set_phase_offset(phase_offset);

        Ok(Self {
            buffer: DelayBuffer::new(capacity)?,
            oscillator,
        })
    }

    pub fn buffer(&self) -> &DelayBuffer {
        &self.buffer
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }

    pub(crate) fn oscillator_mut(&mut self) -> &mut Oscillator {
        &mut self.oscillator
    }

    pub(crate) fn reset(&mut self) {
        self.buffer.reset();
        self.oscillator.reset();
    }

    /// Run one sample through the read → mix → write → advance cycle.
    #[inline]
    pub(crate) fn process_sample(
        &mut self,
        input: f32,
        params: &FlangerParams,
        sample_rate: f32,
    ) -> f32 {
        let depth = params.depth_samples(sample_rate, self.oscillator.frequency());
        let lfo = self.oscillator.current_value();

        // Sweep spans [-base, -base - depth]; never reach past the oldest sample
        let deepest = -((self.buffer.capacity() - 1) as f32);
        let offset = (-(params.base_delay_samples as f32) - depth * bipolar_to_unipolar(lfo))
            .max(deepest);

        let delayed = self.buffer.read_at(offset);

        let output = (input + params.feedback_gain * delayed) / (1.0 + params.feedback_gain);
        let regen = (input + params.regen_gain * delayed) / (1.0 + params.regen_gain);

        self.buffer.write(regen);
        self.buffer.advance();
        self.oscillator.advance();

        output
    }
}
