pub mod config;
pub mod dsp;
pub mod engine; // Clock and rendering context
pub mod error;
pub mod graph; // Audio nodes and the connection contract
pub mod io;
pub mod synth; // Patch wiring and host events

pub use config::{EngineConfig, EnvelopeConfig, OscillatorConfig, SynthConfig};
pub use engine::{AudioContext, Clock, SampleClock};
pub use error::{ConfigError, SynthError};

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Lock a mutex shared with the render thread, recovering from poisoning.
pub(crate) fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
