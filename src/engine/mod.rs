pub mod clock;
pub mod context;

pub use clock::{Clock, SampleClock};
pub use context::AudioContext;
