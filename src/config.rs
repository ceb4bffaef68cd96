#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{
        envelope::{DEFAULT_DECAY_LEVEL, DEFAULT_STAGE_TIME},
        AsdrShape, Waveform,
    },
    error::ConfigError,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate.is_finite() && self.sample_rate > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidSampleRate(self.sample_rate))
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorConfig {
    pub waveform: Waveform,
    /// Initial frequency in Hz, used until the first note.
    pub frequency: f32,
}

impl OscillatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frequency.is_finite() && self.frequency > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositiveFrequency(self.frequency))
        }
    }
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            frequency: 440.0,
        }
    }
}

/// Envelope stage times in seconds, plus the level held at the end of decay.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeConfig {
    pub attack: f64,
    pub sustain: f64,
    pub decay: f64,
    pub release: f64,
    pub decay_level: f32,
}

impl EnvelopeConfig {
    pub fn shape(&self) -> Result<AsdrShape, ConfigError> {
        AsdrShape::new(
            self.attack,
            self.sustain,
            self.decay,
            self.release,
            self.decay_level,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shape().map(|_| ())
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            attack: DEFAULT_STAGE_TIME,
            sustain: DEFAULT_STAGE_TIME,
            decay: DEFAULT_STAGE_TIME,
            release: DEFAULT_STAGE_TIME,
            decay_level: DEFAULT_DECAY_LEVEL,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SynthConfig {
    pub engine: EngineConfig,
    pub oscillator: OscillatorConfig,
    pub envelope: EnvelopeConfig,
}

impl SynthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.oscillator.validate()?;
        self.envelope.validate()
    }
}
