//! Knob panel with the derived engine values underneath

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_flanger::{settings::KNOBS, ControlSettings};

pub fn render_knobs(
    frame: &mut Frame,
    area: Rect,
    settings: &ControlSettings,
    selected: usize,
    sample_rate: f32,
    capacity: usize,
) {
    let block = Block::default().title(" Controls ").borders(Borders::ALL);

    let mut lines: Vec<Line> = KNOBS
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let value = settings.get(spec.knob);
            let style = if i == selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if i == selected { ">" } else { " " };
            Line::from(vec![
                Span::styled(format!("{} {:<15}", marker, spec.label), style),
                Span::styled(
                    format!("{:>8.3}{}", value, spec.unit),
                    style.fg(if i == selected { Color::Yellow } else { Color::Cyan }),
                ),
            ])
        })
        .collect();

    let frequency = settings.modulation_frequency();
    let base = settings.base_delay_samples(sample_rate);
    let base_ms = base as f32 * 1000.0 / sample_rate;
    let depth = sample_rate * (settings.depth - 1.0) / (std::f32::consts::TAU * frequency);

    let dim = Style::default().fg(Color::DarkGray);
    lines.push(Line::raw(""));
    lines.push(Line::styled(format!("  LFO       {:.2} Hz", frequency), dim));
    let capped = if base >= capacity { " (capped)" } else { "" };
    lines.push(Line::styled(
        format!("  Delay     {} samples / {:.2} ms{}", base, base_ms, capped),
        dim,
    ));
    lines.push(Line::styled(format!("  Sweep     {:.1} samples", depth), dim));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
