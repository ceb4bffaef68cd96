#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// One sample of the waveform at `phase` in [0, 1).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
        }
    }
}

/// Naive phase-accumulator oscillator.
///
/// Frequency is supplied per sample so that scheduled frequency changes land
/// on the exact sample they were scheduled for.
pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn render(&mut self, frequency: &[f32], sample_rate: f32, out: &mut [f32]) {
        debug_assert_eq!(frequency.len(), out.len());

        for (sample, &freq) in out.iter_mut().zip(frequency) {
            *sample = self.waveform.sample(self.phase);
            self.phase += freq / sample_rate;
            self.phase -= self.phase.floor();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_sine() {
        let sample_rate = 48_000.0;
        let freq = [440.0f32; 128];
        let mut osc = OscillatorBlock::new(Waveform::Sine);

        let mut buffer = vec![0.0f32; 128];
        osc.render(&freq, sample_rate, &mut buffer);

        // sample n should be sin(2pi f n / sr)
        let sample_index = 12;
        let expected = (TAU * 440.0 * sample_index as f32 / sample_rate).sin();
        let actual = buffer[sample_index];
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn waveform_shapes_at_key_phases() {
        assert_eq!(Waveform::Square.sample(0.25), 1.0);
        assert_eq!(Waveform::Square.sample(0.75), -1.0);
        assert_eq!(Waveform::Sawtooth.sample(0.0), -1.0);
        assert_eq!(Waveform::Sawtooth.sample(0.5), 0.0);
        assert_eq!(Waveform::Triangle.sample(0.0), 1.0);
        assert_eq!(Waveform::Triangle.sample(0.5), -1.0);
    }

    #[test]
    fn phase_stays_wrapped() {
        let mut osc = OscillatorBlock::new(Waveform::Sawtooth);
        let freq = [1_000.0f32; 512];
        let mut out = [0.0f32; 512];
        osc.render(&freq, 44_100.0, &mut out);

        assert!((0.0..1.0).contains(&osc.phase()));
        assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn follows_per_sample_frequency() {
        let mut osc = OscillatorBlock::new(Waveform::Sawtooth);
        // 0 Hz for the first half: output frozen at phase 0
        let mut freq = [0.0f32; 8];
        freq[4..].fill(100.0);
        let mut out = [0.0f32; 8];
        osc.render(&freq, 1_000.0, &mut out);

        assert!(out[..5].iter().all(|&s| s == -1.0));
        assert!(out[5] > -1.0);
    }
}
