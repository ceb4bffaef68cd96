// Purpose - audio device output

pub mod output;

pub use output::{AudioSource, OutputDevice, PlaybackStream};
