//! Audio nodes and the graph that connects them.
//!
//! Each node comes in two halves: a control handle the patch code holds
//! ([`Oscillator`], [`Amplifier`]) and a processor owned by the
//! [`SignalGraph`](signal::SignalGraph) that renders it. Parameters are shared
//! between both halves through [`AudioParam`]. The [`EnvelopeGenerator`] only
//! has the control half: it schedules curves onto a parameter.

/// Voltage-controlled amplifier (signal × gain).
pub mod amplify;
/// The context's output sink.
pub mod destination;
/// ASDR envelope scheduler.
pub mod envelope;
/// Core traits and the connection contract.
pub mod node;
/// Voltage-controlled oscillator.
pub mod oscillator;
/// Shared parameter timelines.
pub mod param;
/// Node storage, routing and block rendering.
pub mod signal;

pub use amplify::Amplifier;
pub use destination::Destination;
pub use envelope::EnvelopeGenerator;
pub use node::{AudioNode, Connectable, Endpoint, HasInputTerminal, NodeId};
pub use oscillator::Oscillator;
pub use param::AudioParam;
