//! Comb-filter view
//!
//! Linear frequency axis up to 8 kHz so the evenly spaced notches of the
//! delayed sum stay evenly spaced on screen. Peaks fall back slowly.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

const BANDS: usize = 96;
const MAX_DISPLAY_HZ: f32 = 8_000.0;
const FLOOR_DB: f64 = -100.0;
/// Held peaks fall this far per UI frame
const DECAY_DB: f64 = 3.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin range [start, end) summed into each band
    bands: Vec<(usize, usize)>,
    /// (band centre Hz, held level dB)
    levels: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft_len = fft_len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        let denom = (fft_len - 1) as f32;
        let window = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let bin_hz = sample_rate / fft_len as f32;
        let top = MAX_DISPLAY_HZ.min(sample_rate / 2.0);
        let last_bin = ((top / bin_hz) as usize).clamp(1, fft_len / 2);

        let mut bands = Vec::with_capacity(BANDS);
        let mut levels = Vec::with_capacity(BANDS);
        for b in 0..BANDS {
            let start = (b * last_bin / BANDS).max(1);
            let end = ((b + 1) * last_bin / BANDS).max(start + 1);
            let centre = (start + end) as f64 * 0.5 * bin_hz as f64;
            bands.push((start, end));
            levels.push((centre, FLOOR_DB));
        }

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            bands,
            levels,
        }
    }

    /// Analyse the mid (L+R) signal of the latest frames
    pub fn update(&mut self, left: &[f32], right: &[f32]) {
        let len = self.window.len();
        if left.len() < len || right.len() < len {
            return;
        }
        let (left, right) = (&left[left.len() - len..], &right[right.len() - len..]);

        for (i, slot) in self.scratch.iter_mut().enumerate() {
            *slot = Complex::new(0.5 * (left[i] + right[i]) * self.window[i], 0.0);
        }
        self.fft.process(&mut self.scratch);

        let norm = (len as f32 * 0.25).powi(2);
        for (&(start, end), (_, held)) in self.bands.iter().zip(self.levels.iter_mut()) {
            let power = self.scratch[start..end]
                .iter()
                .map(|c| c.norm_sqr())
                .fold(0.0f32, f32::max)
                / norm;
            let db = (10.0 * (power.max(1e-12) as f64).log10()).max(FLOOR_DB);
            *held = db.max(*held - DECAY_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.levels
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, levels: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let max_freq = levels.last().map(|(f, _)| *f).unwrap_or(1.0).max(1.0);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(levels);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .labels(vec!["0".to_string(), format!("{:.0} Hz", max_freq)])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
