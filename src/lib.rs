pub mod control; // Parameter messages, lock-free queue between threads
pub mod dsp;
pub mod engine; // Per-sample modulation engine (the host-facing surface)
pub mod error;
pub mod io;
pub mod params;
pub mod settings; // Knob-level control surface mapping

pub use engine::Flanger;
pub use error::{FlangerError, Result};
pub use params::FlangerParams;
pub use settings::ControlSettings;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;
/// Default delay line length used by the demo host, in milliseconds.
pub const DEFAULT_CAPACITY_MS: f32 = 100.0;
/// Upper bound on the regeneration gain; keeps the feedback loop bounded.
pub const MAX_REGEN_GAIN: f32 = 0.95;
/// Offsets closer to zero than this many samples read the cursor directly.
pub const ZERO_DELAY_THRESHOLD: f32 = 0.1;
