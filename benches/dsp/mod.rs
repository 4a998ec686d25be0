//! Benchmarks for low-level DSP primitives.

mod delay;
mod lfo;

pub use delay::bench_delay;
pub use lfo::bench_lfo;
