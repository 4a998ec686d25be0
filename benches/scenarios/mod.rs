//! Real-world scenario benchmarks.
//!
//! These model how a host drives the engine: one call per block with a
//! slowly sweeping delay and feedback enabled.

mod flanger;

pub use flanger::bench_flanger;
