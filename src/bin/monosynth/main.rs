//! monosynth - play the mono patch from the terminal
//!
//! Run with: cargo run --bin monosynth
//! Log with: RUST_LOG=monosynth=debug cargo run 2> synth.log

mod keys;
mod ui;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use monosynth::{
    io::OutputDevice,
    synth::{MonoSynth, SynthMessage},
    EngineConfig, SynthConfig,
};
use ratatui::DefaultTerminal;
use rtrb::{Producer, RingBuffer};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use ui::HostState;

const EVENT_QUEUE_SIZE: usize = 64;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let device = OutputDevice::open_default()?;
    let config = SynthConfig {
        engine: EngineConfig {
            sample_rate: device.sample_rate(),
        },
        ..SynthConfig::default()
    };

    let (mut tx, rx) = RingBuffer::<SynthMessage>::new(EVENT_QUEUE_SIZE);
    let synth = MonoSynth::new(&config, rx)?;
    let mut state = HostState::new(device.name(), device.sample_rate(), synth.envelope());

    // Render thread owns the synth from here on
    let _stream = device.play(synth)?;

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut tx, &mut state);
    ratatui::restore();
    result
}

fn send(tx: &mut Producer<SynthMessage>, msg: SynthMessage) {
    if tx.push(msg).is_err() {
        warn!(?msg, "event queue full, dropping");
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    tx: &mut Producer<SynthMessage>,
    state: &mut HostState,
) -> EyreResult<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, state))?;

        if !event::poll(Duration::from_millis(16))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Esc => return Ok(()),
            KeyCode::Char(c) => {
                if let Some(semitone) = keys::semitone(c) {
                    state.last_note = Some(semitone);
                    send(
                        tx,
                        SynthMessage::NoteOn {
                            frequency: keys::frequency(semitone),
                        },
                    );
                }
            }
            code => {
                if let Some((stage, turn)) = keys::knob(code) {
                    let position = state.turn(stage, turn);
                    send(tx, SynthMessage::from_knob(stage, position));
                }
            }
        }
    }
}
