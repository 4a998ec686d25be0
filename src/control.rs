//! Parameter changes as plain messages.
//!
//! A control thread owns a [`ParamSender`]; the audio thread owns the
//! matching consumer and drains it with `Flanger::apply_messages` at the top
//! of each block. Messages are `Copy`, so every parameter crosses the queue
//! as one coherent value and the audio side never allocates or locks.

use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::lfo::validate_frequency,
    error::Result,
    params::{
        validate_depth_ratio, validate_feedback_gain, validate_phase_offset, validate_regen_gain,
    },
};
#[cfg(feature = "rtrb")]
use crate::error::FlangerError;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamMessage {
    DepthRatio(f32),
    BaseDelay(usize),
    ModulationFrequency(f32),
    PhaseOffset(f32),
    FeedbackGain(f32),
    RegenGain(f32),
    /// Silence delay lines and rewind oscillators.
    Reset,
}

impl ParamMessage {
    /// Same domain checks the engine setters apply.
    pub fn validate(&self) -> Result<()> {
        match *self {
            ParamMessage::DepthRatio(ratio) => validate_depth_ratio(ratio).map(drop),
            ParamMessage::ModulationFrequency(frequency) => {
                validate_frequency(frequency).map(drop)
            }
            ParamMessage::PhaseOffset(radians) => validate_phase_offset(radians).map(drop),
            ParamMessage::FeedbackGain(gain) => validate_feedback_gain(gain).map(drop),
            ParamMessage::RegenGain(gain) => validate_regen_gain(gain).map(drop),
            ParamMessage::BaseDelay(_) | ParamMessage::Reset => Ok(()),
        }
    }
}

pub trait ParamReceiver {
    fn pop(&mut self) -> Option<ParamMessage>;
}

/// Offline hosts can queue changes in a plain deque.
impl ParamReceiver for VecDeque<ParamMessage> {
    fn pop(&mut self) -> Option<ParamMessage> {
        self.pop_front()
    }
}

#[cfg(feature = "rtrb")]
impl ParamReceiver for Consumer<ParamMessage> {
    fn pop(&mut self) -> Option<ParamMessage> {
        Consumer::pop(self).ok()
    }
}

/// Control-side end of the parameter queue.
#[cfg(feature = "rtrb")]
pub struct ParamSender {
    tx: Producer<ParamMessage>,
}

#[cfg(feature = "rtrb")]
impl ParamSender {
    /// Create a queue with room for `capacity` pending changes.
    pub fn channel(capacity: usize) -> (ParamSender, Consumer<ParamMessage>) {
        let (tx, rx) = RingBuffer::new(capacity);
        (ParamSender { tx }, rx)
    }

    /// Validate and enqueue. Invalid values are reported here, on the
    /// caller's thread, and never reach the audio thread.
    pub fn send(&mut self, message: ParamMessage) -> Result<()> {
        message.validate()?;
        self.tx.push(message).map_err(|_| FlangerError::QueueFull)
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}
