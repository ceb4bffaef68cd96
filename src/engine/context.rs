use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::{
    config::EngineConfig,
    engine::clock::{Clock, SampleClock},
    error::ConfigError,
    graph::{
        destination::Destination,
        node::{Endpoint, NodeId, OutputTerminal},
        signal::SignalGraph,
    },
    lock, MAX_BLOCK_SIZE,
};

struct ContextInner {
    clock: SampleClock,
    graph: Mutex<SignalGraph>,
}

/// Shared handle to one signal graph and the clock it renders against.
///
/// Clones are cheap and refer to the same graph. Node handles keep a clone so
/// they can route connections; the render side calls [`AudioContext::render`]
/// from the device callback (or a test, offline).
#[derive(Clone)]
pub struct AudioContext {
    inner: Arc<ContextInner>,
}

impl AudioContext {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(sample_rate = config.sample_rate, "creating audio context");

        Ok(Self {
            inner: Arc::new(ContextInner {
                clock: SampleClock::new(config.sample_rate),
                graph: Mutex::new(SignalGraph::new()),
            }),
        })
    }

    /// Offline context at the given sample rate.
    pub fn with_sample_rate(sample_rate: f32) -> Result<Self, ConfigError> {
        Self::new(&EngineConfig { sample_rate })
    }

    pub fn sample_rate(&self) -> f32 {
        self.inner.clock.sample_rate()
    }

    pub fn current_time(&self) -> f64 {
        self.inner.clock.current_time()
    }

    pub fn clock(&self) -> SampleClock {
        self.inner.clock.clone()
    }

    pub fn destination(&self) -> Destination {
        Destination
    }

    /// Nodes feeding the destination, source first.
    pub fn signal_path(&self) -> Vec<NodeId> {
        lock(&self.inner.graph).signal_path()
    }

    pub(crate) fn with_graph<R>(&self, f: impl FnOnce(&mut SignalGraph) -> R) -> R {
        f(&mut lock(&self.inner.graph))
    }

    pub(crate) fn route(&self, from: OutputTerminal, to: Endpoint) {
        self.with_graph(|graph| graph.connect(from.node(), to));
    }

    /// Render mono samples into `out`, advancing the clock by `out.len()`.
    pub fn render(&self, out: &mut [f32]) {
        let sample_rate = self.sample_rate();
        let mut graph = lock(&self.inner.graph);

        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            let time = self.inner.clock.current_time();
            graph.render(block, time, sample_rate);
            self.inner.clock.advance(block.len());
        }
    }
}

impl std::fmt::Debug for AudioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioContext")
            .field("sample_rate", &self.sample_rate())
            .field("current_time", &self.current_time())
            .finish()
    }
}
