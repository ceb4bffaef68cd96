use thiserror::Error;

/// Envelope stage named in duration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Attack,
    Sustain,
    Decay,
    Release,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Attack => "attack",
            Stage::Sustain => "sustain",
            Stage::Decay => "decay",
            Stage::Release => "release",
        };
        f.write_str(name)
    }
}

/// A value rejected at construction or setting time.
///
/// Rejected values never reach node state.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("frequency must be positive and finite, got {0} Hz")]
    NonPositiveFrequency(f32),

    #[error("decay level must be in (0, 1], got {0}")]
    DecayLevelOutOfRange(f32),

    #[error("{stage} time must be non-negative and finite, got {seconds} s")]
    NegativeDuration { stage: Stage, seconds: f64 },

    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),
}

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("envelope has no target parameter; connect() it before trigger()")]
    TargetUnbound,

    #[error("audio device: {0}")]
    Device(String),
}

pub type Result<T, E = SynthError> = std::result::Result<T, E>;
