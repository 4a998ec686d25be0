//! Test signals for auditioning the effect

use clap::ValueEnum;
use std::f32::consts::TAU;

/// Fixed seed so every run auditions the same noise
const NOISE_SEED: u64 = 0x9E37_79B9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Noise,
}

/// Naive (non-band-limited) test oscillator.
pub struct TestSource {
    waveform: Waveform,
    phase: f32,
    increment: f32,
    level: f32,
    noise: fastrand::Rng,
}

impl TestSource {
    pub fn new(waveform: Waveform, frequency: f32, sample_rate: f32, level: f32) -> Self {
        Self {
            waveform,
            phase: 0.0,
            increment: frequency / sample_rate,
            level: level.clamp(0.0, 1.0),
            noise: fastrand::Rng::with_seed(NOISE_SEED),
        }
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let value = match self.waveform {
            Waveform::Sine => (self.phase * TAU).sin(),
            Waveform::Saw => 2.0 * self.phase - 1.0,
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Noise => self.next_noise(),
        };

        self.phase += self.increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        value * self.level
    }

    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    fn next_noise(&mut self) -> f32 {
        self.noise.f32() * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_respect_level() {
        for waveform in [Waveform::Sine, Waveform::Saw, Waveform::Square, Waveform::Noise] {
            let mut source = TestSource::new(waveform, 220.0, 48000.0, 0.25);
            let mut buffer = vec![0.0; 1024];
            source.render(&mut buffer);
            assert!(
                buffer.iter().all(|s| s.abs() <= 0.25 + 1e-6),
                "{:?} exceeded its level",
                waveform
            );
            assert!(buffer.iter().any(|s| s.abs() > 0.01));
        }
    }

    #[test]
    fn test_noise_is_seeded_and_bipolar() {
        let mut a = TestSource::new(Waveform::Noise, 0.0, 48000.0, 1.0);
        let mut b = TestSource::new(Waveform::Noise, 0.0, 48000.0, 1.0);
        let mut first = vec![0.0; 4096];
        let mut second = vec![0.0; 4096];
        a.render(&mut first);
        b.render(&mut second);

        assert_eq!(first, second);
        assert!(first.iter().all(|s| (-1.0..1.0).contains(s)));
        assert!(first.iter().any(|&s| s < -0.5));
        assert!(first.iter().any(|&s| s > 0.5));
    }
}
