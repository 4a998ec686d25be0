//! Benchmarks for the delay primitives and the full modulation engine.
//!
//! Run with: cargo bench
//!
//! Everything here runs on the audio thread in a real host, so it has to
//! finish well inside the block deadline.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Delay buffer reads/writes and the LFO
//!   - scenarios/*  Mono and stereo flanger blocks

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_delay,
    dsp::bench_lfo,
    // Real-world scenarios
    scenarios::bench_flanger,
);
criterion_main!(benches);
