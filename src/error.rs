//! Error kinds surfaced by the engine, its setters and the control queue.

use thiserror::Error;

/// Errors reported synchronously to the caller. The per-sample algorithm
/// itself never fails; these come from setters and block-shape checks.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FlangerError {
    #[error("invalid value {value} for {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("engine must be configured before processing")]
    NotConfigured,

    #[error("expected {expected} channels, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    #[error("channel {channel} has {actual} samples, expected {expected}")]
    BlockLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    #[error("parameter queue is full")]
    QueueFull,
}

impl FlangerError {
    pub(crate) fn invalid(name: &'static str, value: impl Into<f64>, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, FlangerError>;
