//! Low-level DSP primitives used by the modulation engine.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! making them safe to own directly inside per-channel state. They stay
//! focused on the signal-processing math; orchestration lives in `engine`.

/// Circular sample store with fractional, signed-offset reads.
pub mod delay;
/// Counter-driven cosine LFO.
pub mod lfo;

pub use delay::DelayBuffer;
pub use lfo::Oscillator;
