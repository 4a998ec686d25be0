//! TUI for the flanger demo
//!
//! Knob panel, stereo scope and spectrum. Knob turns travel to the audio
//! thread as validated messages.

mod knobs;
mod spectrum;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;
use tracing::{debug, warn};

use saavy_flanger::{
    control::{ParamMessage, ParamSender},
    settings::KNOBS,
    ControlSettings,
};

use knobs::render_knobs;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;
/// Steps per PageUp/PageDown
const COARSE_STEPS: i32 = 10;

/// Per-block view of the engine, sent from the audio thread
#[derive(Debug, Clone, Copy, Default)]
pub struct Snapshot {
    /// LFO value of each channel after the block, bipolar
    pub lfo: [f32; 2],
}

pub struct UiApp {
    params: ParamSender,
    frame_rx: Consumer<[f32; 2]>,
    snapshot_rx: Consumer<Snapshot>,
    settings: ControlSettings,
    selected: usize,
    sample_rate: f32,
    capacity: usize,
    snapshot: Snapshot,
    left: Vec<f32>,
    right: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    status: String,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        params: ParamSender,
        frame_rx: Consumer<[f32; 2]>,
        snapshot_rx: Consumer<Snapshot>,
        settings: ControlSettings,
        sample_rate: f32,
        capacity: usize,
    ) -> Self {
        Self {
            params,
            frame_rx,
            snapshot_rx,
            settings,
            selected: 0,
            sample_rate,
            capacity,
            snapshot: Snapshot::default(),
            left: vec![0.0; VIS_BUFFER_SIZE],
            right: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            status: String::from("ready"),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_snapshots();
            self.spectrum.update(&self.left, &self.right);

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Drain the frame queue, keeping the last VIS_BUFFER_SIZE frames per side
    fn poll_audio(&mut self) {
        let mut received = 0;
        while let Ok([l, r]) = self.frame_rx.pop() {
            self.left.push(l);
            self.right.push(r);
            received += 1;
        }

        if received > 0 {
            for buffer in [&mut self.left, &mut self.right] {
                if buffer.len() > VIS_BUFFER_SIZE {
                    let excess = buffer.len() - VIS_BUFFER_SIZE;
                    buffer.drain(0..excess);
                }
            }
        }
    }

    fn poll_snapshots(&mut self) {
        while let Ok(snapshot) = self.snapshot_rx.pop() {
            self.snapshot = snapshot;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.selected = self.selected.checked_sub(1).unwrap_or(KNOBS.len() - 1);
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % KNOBS.len();
            }
            KeyCode::Right => self.turn(1),
            KeyCode::Left => self.turn(-1),
            KeyCode::PageUp => self.turn(COARSE_STEPS),
            KeyCode::PageDown => self.turn(-COARSE_STEPS),
            KeyCode::Char('r') | KeyCode::Char('R') => self.send(ParamMessage::Reset, "reset"),
            _ => {}
        }
    }

    /// Move the selected knob and forward the resulting engine change
    fn turn(&mut self, steps: i32) {
        let spec = &KNOBS[self.selected];
        let value = self.settings.nudge(spec.knob, steps);
        let message = self.settings.message_for(spec.knob, self.sample_rate);
        let label = format!("{} = {:.3}{}", spec.label, value, spec.unit);
        self.send(message, &label);
    }

    fn send(&mut self, message: ParamMessage, label: &str) {
        match self.params.send(message) {
            Ok(()) => {
                debug!(?message, "queued parameter change");
                self.status = label.to_string();
            }
            Err(err) => {
                warn!(?message, %err, "parameter change not sent");
                self.status = format!("{}: {}", label, err);
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Status bar
                Constraint::Min(10),    // Knobs and scope
                Constraint::Length(10), // Spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffers(&self.left, &self.right);
        render_status(frame, rows[0], self.sample_rate, &self.snapshot, &stats, &self.status);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(20)])
            .split(rows[1]);
        render_knobs(
            frame,
            middle[0],
            &self.settings,
            self.selected,
            self.sample_rate,
            self.capacity,
        );
        render_waveform(frame, middle[1], &self.left, &self.right);

        render_spectrum(frame, rows[2], self.spectrum.data());

        let help = Paragraph::new(
            " [Q] Quit  [Up/Down] Select  [Left/Right] Turn  [PgUp/PgDn] Turn x10  [R] Reset",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[3]);
    }
}
