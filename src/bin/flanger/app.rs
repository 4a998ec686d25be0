//! Audio device setup and the realtime callback

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rtrb::RingBuffer;
use tracing::{error, info};

use saavy_flanger::{control::ParamSender, ControlSettings, Flanger, MAX_BLOCK_SIZE};

use super::source::{TestSource, Waveform};
use super::ui::{Snapshot, UiApp};

/// Pending knob changes between UI and audio thread
const PARAM_QUEUE_SIZE: usize = 64;
/// Stereo frames buffered for the scope and spectrum
const FRAME_QUEUE_SIZE: usize = 16_384;

/// Main application builder
pub struct FlangerApp {
    waveform: Waveform,
    frequency: f32,
    level: f32,
    capacity_ms: f32,
}

impl FlangerApp {
    pub fn new(waveform: Waveform, frequency: f32, level: f32, capacity_ms: f32) -> Self {
        Self {
            waveform,
            frequency,
            level,
            capacity_ms,
        }
    }

    /// Open the default output device and run the UI until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let capacity = ((self.capacity_ms * sample_rate / 1000.0) as usize).max(1);

        let settings = ControlSettings::default();
        let mut flanger = Flanger::new();
        flanger
            .configure(sample_rate, 2, capacity)
            .wrap_err("failed to configure flanger")?;
        settings
            .apply(&mut flanger)
            .wrap_err("failed to apply initial settings")?;

        info!(
            sample_rate,
            channels,
            capacity,
            source = ?self.waveform,
            "audio device ready"
        );

        let (param_tx, mut param_rx) = ParamSender::channel(PARAM_QUEUE_SIZE);
        let (mut frame_tx, frame_rx) = RingBuffer::<[f32; 2]>::new(FRAME_QUEUE_SIZE);
        let (mut snapshot_tx, snapshot_rx) = RingBuffer::<Snapshot>::new(64);

        let mut source = TestSource::new(self.waveform, self.frequency, sample_rate, self.level);
        let mut left = vec![0.0f32; MAX_BLOCK_SIZE];
        let mut right = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    flanger.apply_messages(&mut param_rx);

                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let (l, r) = (&mut left[..frames], &mut right[..frames]);

                        // Mono source, stereo effect
                        source.render(l);
                        r.copy_from_slice(l);
                        if flanger.process_in_place(&mut [&mut *l, &mut *r]).is_err() {
                            l.fill(0.0);
                            r.fill(0.0);
                        }

                        // Interleave: even device channels get left, odd get right
                        let out_off = frames_written * channels;
                        for i in 0..frames {
                            let start = out_off + i * channels;
                            let frame = &mut data[start..start + channels];
                            for (ch, out) in frame.iter_mut().enumerate() {
                                *out = if ch % 2 == 0 { l[i] } else { r[i] };
                            }
                            // Scope is best-effort, drop frames when the UI lags
                            let _ = frame_tx.push([l[i], r[i]]);
                        }

                        frames_written += frames;
                    }

                    if let (Some(l), Some(r)) = (flanger.channel(0), flanger.channel(1)) {
                        let _ = snapshot_tx.push(Snapshot {
                            lfo: [l.oscillator().current_value(), r.oscillator().current_value()],
                        });
                    }
                },
                |err| error!("audio stream error: {}", err),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        let mut ui = UiApp::new(param_tx, frame_rx, snapshot_rx, settings, sample_rate, capacity);
        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        drop(stream);
        info!("audio stream closed");
        result
    }
}
