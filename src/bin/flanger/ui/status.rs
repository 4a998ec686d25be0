//! Status bar: sample rate, LFO positions, levels and last action

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_flanger::dsp::lfo::bipolar_to_unipolar;

use super::Snapshot;

/// Width of each LFO position gauge in cells
const SWEEP_WIDTH: usize = 12;

pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Combined peak and RMS over both channels
    pub fn from_buffers(left: &[f32], right: &[f32]) -> Self {
        let count = left.len() + right.len();
        if count == 0 {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let samples = left.iter().chain(right);
        let peak = samples.clone().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (samples.map(|&x| x * x).sum::<f32>() / count as f32).sqrt();
        Self { peak, rms }
    }
}

/// `[----|-------]` with the marker at the LFO's current sweep position
fn sweep_gauge(lfo: f32) -> String {
    let pos = (bipolar_to_unipolar(lfo) * (SWEEP_WIDTH - 1) as f32).round() as usize;
    let cells: String = (0..SWEEP_WIDTH)
        .map(|i| if i == pos.min(SWEEP_WIDTH - 1) { '|' } else { '-' })
        .collect();
    format!("[{}]", cells)
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    sample_rate: f32,
    snapshot: &Snapshot,
    stats: &AudioStats,
    message: &str,
) {
    let block = Block::default().title(" saavy flanger ").borders(Borders::ALL);

    let line = Line::from(vec![
        Span::styled(
            format!(" {:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("L {}  R {}  ", sweep_gauge(snapshot.lfo[0]), sweep_gauge(snapshot.lfo[1])),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}  ", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(message.to_string(), Style::default().fg(Color::White)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
