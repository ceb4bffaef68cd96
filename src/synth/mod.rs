// Purpose: host events and the fixed mono patch they drive
// This layer sits above graph nodes and owns one complete instrument

pub mod message;
pub mod mono;

pub use message::{MessageReceiver, SynthMessage};
pub use mono::MonoSynth;
