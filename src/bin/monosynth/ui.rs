//! Status panel: device, last note and envelope knob positions.

use monosynth::{error::Stage, graph::EnvelopeGenerator, synth::message::KNOB_MAX};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::keys::{self, Turn, KNOB_STEP};

const STAGES: [Stage; 4] = [Stage::Attack, Stage::Sustain, Stage::Decay, Stage::Release];

pub struct HostState {
    pub device: String,
    pub sample_rate: f32,
    pub last_note: Option<u8>,
    knobs: [u8; 4],
}

fn stage_index(stage: Stage) -> usize {
    match stage {
        Stage::Attack => 0,
        Stage::Sustain => 1,
        Stage::Decay => 2,
        Stage::Release => 3,
    }
}

impl HostState {
    pub fn new(device: String, sample_rate: f32, env: &EnvelopeGenerator) -> Self {
        let position = |seconds: f64| (seconds * f64::from(KNOB_MAX)).round().min(f64::from(KNOB_MAX)) as u8;
        Self {
            device,
            sample_rate,
            last_note: None,
            knobs: [
                position(env.attack()),
                position(env.sustain()),
                position(env.decay()),
                position(env.release()),
            ],
        }
    }

    /// Move a knob and return its new position.
    pub fn turn(&mut self, stage: Stage, turn: Turn) -> u8 {
        let knob = &mut self.knobs[stage_index(stage)];
        *knob = match turn {
            Turn::Down => knob.saturating_sub(KNOB_STEP),
            Turn::Up => (*knob + KNOB_STEP).min(KNOB_MAX),
        };
        *knob
    }
}

pub fn render(frame: &mut Frame, state: &HostState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status
            Constraint::Length(10), // Knobs
            Constraint::Length(1), // Help bar
            Constraint::Min(0),
        ])
        .split(frame.area());

    let note = state
        .last_note
        .map(|s| format!("{} ({:.1} Hz)", keys::note_name(s), keys::frequency(s)))
        .unwrap_or_else(|| "-".into());
    let status = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {}  ", state.device), Style::default().fg(Color::Cyan)),
        Span::raw(format!("{:.0} Hz  ", state.sample_rate)),
        Span::styled(format!("Note: {note}"), Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().title(" monosynth ").borders(Borders::ALL));
    frame.render_widget(status, chunks[0]);

    let knob_block = Block::default().title(" Envelope ").borders(Borders::ALL);
    let inner = knob_block.inner(chunks[1]);
    frame.render_widget(knob_block, chunks[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2); 4])
        .split(inner);
    for (stage, row) in STAGES.iter().zip(rows.iter()) {
        let position = state.knobs[stage_index(*stage)];
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(f64::from(position) / f64::from(KNOB_MAX))
            .label(format!("{stage} {:.2} s", f64::from(position) / f64::from(KNOB_MAX)));
        frame.render_widget(gauge, *row);
    }

    let help = Paragraph::new(" [z..m / q..u] Play  [F1-F8] Envelope -/+  [Esc] Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}
