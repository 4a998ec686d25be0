// Purpose - owned multi-channel blocks for hosts that don't bring their own

#[derive(Debug, Default, Clone)]
pub struct AudioInput {
    pub buffers: Vec<Vec<f32>>,
}

#[derive(Debug, Default, Clone)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioInput {
    /// `channels` silent channels of `frames` samples each.
    pub fn silent(channels: usize, frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; frames]; channels],
        }
    }

    /// Same signal copied to every channel.
    pub fn from_mono(samples: &[f32], channels: usize) -> Self {
        Self {
            buffers: vec![samples.to_vec(); channels],
        }
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }
}

impl AudioOutput {
    /// Preallocate output matching an input's shape.
    pub fn matching(input: &AudioInput) -> Self {
        Self {
            buffers: input.buffers.iter().map(|c| vec![0.0; c.len()]).collect(),
        }
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }
}
