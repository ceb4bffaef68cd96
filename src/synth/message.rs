#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::error::Stage;

/// Highest knob position a host control sends.
pub const KNOB_MAX: u8 = 100;

/// Host events, sent from the control surface to a [`MonoSynth`].
///
/// [`MonoSynth`]: crate::synth::MonoSynth
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    NoteOn { frequency: f32 },
    SetAttack(f64),
    SetSustain(f64),
    SetDecay(f64),
    SetRelease(f64),
}

impl SynthMessage {
    /// Stage-time event for a knob at `position` (0..=100), one hundredth
    /// of a second per step. Positions past the end are clamped.
    pub fn from_knob(stage: Stage, position: u8) -> Self {
        let seconds = f64::from(position.min(KNOB_MAX)) / f64::from(KNOB_MAX);
        match stage {
            Stage::Attack => SynthMessage::SetAttack(seconds),
            Stage::Sustain => SynthMessage::SetSustain(seconds),
            Stage::Decay => SynthMessage::SetDecay(seconds),
            Stage::Release => SynthMessage::SetRelease(seconds),
        }
    }
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}
