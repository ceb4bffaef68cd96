use crate::{
    dsp::amplify::add_in_place,
    engine::AudioContext,
    graph::param::AudioParam,
};

/// Identifier of a node within its context's graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The terminal a node receives its signal on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputTerminal(pub(crate) NodeId);

/// The terminal a node emits its signal from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputTerminal(pub(crate) NodeId);

impl InputTerminal {
    pub fn node(&self) -> NodeId {
        self.0
    }
}

impl OutputTerminal {
    pub fn node(&self) -> NodeId {
        self.0
    }
}

/// Where a connection lands.
#[derive(Clone, Debug)]
pub enum Endpoint {
    /// Another node's input terminal.
    Input(InputTerminal),
    /// A parameter, as an audio-rate signal summed onto its scheduled value.
    Param(AudioParam),
    /// The raw output sink.
    Sink,
}

/// Capability of node-shaped targets.
pub trait HasInputTerminal {
    fn input(&self) -> InputTerminal;
}

/// Anything an [`AudioNode`] can be connected to.
pub trait Connectable {
    fn endpoint(&self) -> Endpoint;
}

impl<T: HasInputTerminal> Connectable for T {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Input(self.input())
    }
}

impl Connectable for AudioParam {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Param(self.clone())
    }
}

/// Control-side handle of a node living in an [`AudioContext`].
pub trait AudioNode {
    fn id(&self) -> NodeId;

    fn context(&self) -> &AudioContext;

    fn output(&self) -> OutputTerminal {
        OutputTerminal(self.id())
    }

    /// Route this node's output into `target`.
    ///
    /// Node-shaped targets receive it on their input terminal; anything else
    /// is fed directly as a sink or parameter.
    fn connect<T: Connectable + ?Sized>(&self, target: &T) {
        self.context().route(self.output(), target.endpoint());
    }
}

/// Context passed to graph nodes during rendering
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - time: clock time of the first sample in the block, in seconds
pub struct RenderCtx<'a> {
    pub sample_rate: f32,
    pub time: f64,
    pub(crate) modulation: &'a [ParamLink],
    pub(crate) buffers: &'a [Vec<f32>],
}

/// An audio-rate connection from a node's output into a parameter.
pub(crate) struct ParamLink {
    pub source: usize,
    pub param: AudioParam,
}

impl RenderCtx<'_> {
    /// Per-sample values of `param` for this block, including any audio-rate
    /// modulation routed into it.
    pub fn param_values(&self, param: &AudioParam, out: &mut [f32]) {
        param.render_block(self.time, self.sample_rate, out);

        for link in self.modulation.iter().filter(|l| l.param.same_as(param)) {
            add_in_place(out, &self.buffers[link.source][..out.len()]);
        }
    }
}

/// Render-side processor owned by the graph.
///
/// Source nodes ignore `input`; it is silence when nothing is connected.
pub trait GraphNode: Send {
    fn render_block(&mut self, input: &[f32], out: &mut [f32], ctx: &RenderCtx);
}
