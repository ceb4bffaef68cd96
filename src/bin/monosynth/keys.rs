//! QWERTY note layout and knob bindings.

use crossterm::event::KeyCode;
use monosynth::error::Stage;

/// A1, the lowest playable note.
pub const BASE_FREQUENCY: f32 = 55.0;

/// Knob travel per key press.
pub const KNOB_STEP: u8 = 5;

const LOWER_ROW: &str = "zsxdcvgbhnjm";
const UPPER_ROW: &str = "q2w3er5t6y7u";

const NOTE_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Semitones above A1 for a note key.
pub fn semitone(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    if let Some(i) = LOWER_ROW.find(c) {
        return Some(i as u8);
    }
    UPPER_ROW.find(c).map(|i| i as u8 + 12)
}

pub fn frequency(semitone: u8) -> f32 {
    BASE_FREQUENCY * 2f32.powf(f32::from(semitone) / 12.0)
}

/// Scientific pitch name, e.g. `C#2`.
pub fn note_name(semitone: u8) -> String {
    let name = NOTE_NAMES[usize::from(semitone % 12)];
    // Octave numbers change at C, three semitones above A
    let octave = 1 + (semitone + 9) / 12;
    format!("{name}{octave}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Down,
    Up,
}

/// F1..F8 lower and raise the attack, sustain, decay and release knobs.
pub fn knob(code: KeyCode) -> Option<(Stage, Turn)> {
    let KeyCode::F(n) = code else {
        return None;
    };
    let stage = match n {
        1 | 2 => Stage::Attack,
        3 | 4 => Stage::Sustain,
        5 | 6 => Stage::Decay,
        7 | 8 => Stage::Release,
        _ => return None,
    };
    let turn = if n % 2 == 1 { Turn::Down } else { Turn::Up };
    Some((stage, turn))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_span_two_octaves_from_a1() {
        assert_eq!(semitone('z'), Some(0));
        assert_eq!(semitone('m'), Some(11));
        assert_eq!(semitone('q'), Some(12));
        assert_eq!(semitone('U'), Some(23));
        assert_eq!(semitone('p'), None);

        assert_eq!(frequency(0), 55.0);
        assert!((frequency(12) - 110.0).abs() < 1e-3);
    }

    #[test]
    fn names_roll_octave_at_c() {
        assert_eq!(note_name(0), "A1");
        assert_eq!(note_name(2), "B1");
        assert_eq!(note_name(3), "C2");
        assert_eq!(note_name(12), "A2");
    }

    #[test]
    fn function_keys_pair_up_per_stage() {
        assert_eq!(knob(KeyCode::F(1)), Some((Stage::Attack, Turn::Down)));
        assert_eq!(knob(KeyCode::F(8)), Some((Stage::Release, Turn::Up)));
        assert_eq!(knob(KeyCode::F(9)), None);
        assert_eq!(knob(KeyCode::Esc), None);
    }
}
