//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components hold no handles to the graph or the clock. They stay
//! focused on the signal-processing math and the scheduling arithmetic so the
//! graph layer can add routing and thread sharing on top.

/// Signal multiplication and summing.
pub mod amplify;
/// ASDR curve shape and its scheduling onto a timeline.
pub mod envelope;
/// Periodic waveforms and a phase-accumulator oscillator.
pub mod oscillator;
/// Time-ordered parameter automation.
pub mod timeline;

pub use envelope::{AsdrShape, CurvePoint};
pub use oscillator::Waveform;
pub use timeline::{AutomationEvent, EventKind, ParamTimeline};
