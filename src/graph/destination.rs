use crate::graph::node::{Connectable, Endpoint};

/// The context's output sink.
///
/// It has no input terminal: connecting a node here feeds its output
/// straight to whatever [`AudioContext::render`](crate::AudioContext::render)
/// writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination;

impl Connectable for Destination {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Sink
    }
}
