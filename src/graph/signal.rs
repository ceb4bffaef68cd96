use tracing::{debug, warn};

use crate::{
    graph::node::{Endpoint, GraphNode, NodeId, ParamLink, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Signal Graph
============

Nodes own exactly one input terminal and one output terminal. Every
connect() call adds one directed edge:

  [Oscillator] ──→ [Amplifier] ──→ (sink)
                        ↑
                   gain param  ←── (optional audio-rate modulator)

Fan-out is allowed: one output may feed several inputs. Fan-in is not: an
input terminal, a parameter or the sink each take a single source, and a
later connection replaces the earlier one.

Rendering
---------

Each block every node renders exactly once, in dependency order, into its own
output buffer. Consumers read their source's buffer, so a node feeding two
others is not advanced twice. Nodes that reach nothing still render, which
keeps oscillators free-running whether or not they are audible.

A cycle is not an error. The node that closes it reads its source's buffer
from the previous block.
*/

struct NodeSlot {
    name: &'static str,
    processor: Box<dyn GraphNode>,
    input: Option<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    New,
    Visiting,
    Done,
}

pub struct SignalGraph {
    nodes: Vec<NodeSlot>,
    buffers: Vec<Vec<f32>>,
    param_links: Vec<ParamLink>,
    sink: Option<usize>,
    order: Vec<usize>,
    scratch: Vec<f32>,
    silence: Vec<f32>,
}

impl SignalGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            buffers: Vec::new(),
            param_links: Vec::new(),
            sink: None,
            order: Vec::new(),
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            silence: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Id the next added node will receive.
    pub(crate) fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }

    pub(crate) fn add_node(&mut self, name: &'static str, processor: Box<dyn GraphNode>) -> NodeId {
        let id = self.next_id();
        self.nodes.push(NodeSlot {
            name,
            processor,
            input: None,
        });
        self.buffers.push(vec![0.0; MAX_BLOCK_SIZE]);
        self.rebuild_order();

        debug!(node = id.0, name, "added node");
        id
    }

    fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn connect(&mut self, from: NodeId, to: Endpoint) {
        if !self.contains(from) {
            warn!(node = from.0, "ignoring connection from a node outside this graph");
            return;
        }
        let src = from.index();
        let src_name = self.nodes[src].name;

        match to {
            Endpoint::Input(terminal) => {
                let target = terminal.node();
                if !self.contains(target) {
                    warn!(node = target.0, "ignoring connection into a node outside this graph");
                    return;
                }
                let slot = &mut self.nodes[target.index()];
                if let Some(prev) = slot.input.replace(src) {
                    if prev != src {
                        warn!(node = target.0, previous = prev, "input terminal already connected, replacing source");
                    }
                }
                debug!(from = src_name, to = slot.name, "connected node to input");
            }
            Endpoint::Param(param) => {
                if !self.contains(param.owner()) {
                    warn!(param = param.name(), "ignoring connection into a parameter outside this graph");
                    return;
                }
                match self.param_links.iter_mut().find(|l| l.param.same_as(&param)) {
                    Some(link) => {
                        if link.source != src {
                            warn!(param = param.name(), "parameter already modulated, replacing source");
                        }
                        link.source = src;
                    }
                    None => {
                        debug!(from = src_name, param = param.name(), "connected node to parameter");
                        self.param_links.push(ParamLink { source: src, param });
                    }
                }
            }
            Endpoint::Sink => {
                if let Some(prev) = self.sink.replace(src) {
                    if prev != src {
                        warn!(previous = prev, "sink already connected, replacing source");
                    }
                }
                debug!(from = src_name, "connected node to sink");
            }
        }

        self.rebuild_order();
    }

    /// The node feeding `node`'s input terminal, if any.
    pub fn input_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes
            .get(node.index())
            .and_then(|slot| slot.input)
            .map(|idx| NodeId(idx as u32))
    }

    /// Nodes feeding the sink, source first.
    pub fn signal_path(&self) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.sink;

        while let Some(idx) = current {
            let id = NodeId(idx as u32);
            if path.contains(&id) {
                break;
            }
            path.push(id);
            current = self.nodes[idx].input;
        }

        path.reverse();
        path
    }

    fn rebuild_order(&mut self) {
        let mut marks = vec![Mark::New; self.nodes.len()];
        self.order.clear();

        for idx in 0..self.nodes.len() {
            visit(idx, &self.nodes, &self.param_links, &mut marks, &mut self.order);
        }
    }

    /// Render one block (at most `MAX_BLOCK_SIZE` frames) into `out`.
    pub fn render(&mut self, out: &mut [f32], time: f64, sample_rate: f32) {
        let frames = out.len();
        debug_assert!(frames <= MAX_BLOCK_SIZE);

        for k in 0..self.order.len() {
            let idx = self.order[k];
            let input = match self.nodes[idx].input {
                Some(src) => &self.buffers[src][..frames],
                None => &self.silence[..frames],
            };
            let ctx = RenderCtx {
                sample_rate,
                time,
                modulation: &self.param_links,
                buffers: &self.buffers,
            };

            self.nodes[idx]
                .processor
                .render_block(input, &mut self.scratch[..frames], &ctx);
            self.buffers[idx][..frames].copy_from_slice(&self.scratch[..frames]);
        }

        match self.sink {
            Some(idx) => out.copy_from_slice(&self.buffers[idx][..frames]),
            None => out.fill(0.0),
        }
    }
}

impl Default for SignalGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn visit(
    idx: usize,
    nodes: &[NodeSlot],
    links: &[ParamLink],
    marks: &mut [Mark],
    order: &mut Vec<usize>,
) {
    if marks[idx] != Mark::New {
        return;
    }
    marks[idx] = Mark::Visiting;

    let modulators = links
        .iter()
        .filter(|l| l.param.owner().index() == idx)
        .map(|l| l.source);
    let deps: Vec<usize> = nodes[idx].input.into_iter().chain(modulators).collect();

    for dep in deps {
        // Visiting means a cycle; that edge reads last block's buffer
        if marks[dep] == Mark::New {
            visit(dep, nodes, links, marks, order);
        }
    }

    marks[idx] = Mark::Done;
    order.push(idx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        node::InputTerminal,
        param::AudioParam,
    };

    /// Emits its block count, once per block.
    struct Counter {
        blocks: f32,
    }

    impl GraphNode for Counter {
        fn render_block(&mut self, _input: &[f32], out: &mut [f32], _ctx: &RenderCtx) {
            self.blocks += 1.0;
            out.fill(self.blocks);
        }
    }

    struct Double;

    impl GraphNode for Double {
        fn render_block(&mut self, input: &[f32], out: &mut [f32], _ctx: &RenderCtx) {
            for (o, &i) in out.iter_mut().zip(input) {
                *o = i * 2.0;
            }
        }
    }

    struct ParamOut {
        param: AudioParam,
    }

    impl GraphNode for ParamOut {
        fn render_block(&mut self, _input: &[f32], out: &mut [f32], ctx: &RenderCtx) {
            ctx.param_values(&self.param, out);
        }
    }

    fn input(id: NodeId) -> Endpoint {
        Endpoint::Input(InputTerminal(id))
    }

    #[test]
    fn renders_chain_into_sink() {
        let mut graph = SignalGraph::new();
        let src = graph.add_node("counter", Box::new(Counter { blocks: 0.0 }));
        let dbl = graph.add_node("double", Box::new(Double));
        graph.connect(src, input(dbl));
        graph.connect(dbl, Endpoint::Sink);

        let mut out = [0.0f32; 16];
        graph.render(&mut out, 0.0, 48_000.0);

        assert!(out.iter().all(|&s| s == 2.0));
        assert_eq!(graph.signal_path(), vec![src, dbl]);
    }

    #[test]
    fn dependency_order_ignores_insertion_order() {
        let mut graph = SignalGraph::new();
        let dbl = graph.add_node("double", Box::new(Double));
        let src = graph.add_node("counter", Box::new(Counter { blocks: 0.0 }));
        graph.connect(src, input(dbl));
        graph.connect(dbl, Endpoint::Sink);

        let mut out = [0.0f32; 8];
        graph.render(&mut out, 0.0, 48_000.0);

        // Same block, not the previous one
        assert!(out.iter().all(|&s| s == 2.0));
    }

    #[test]
    fn fan_out_renders_source_once_per_block() {
        let mut graph = SignalGraph::new();
        let src = graph.add_node("counter", Box::new(Counter { blocks: 0.0 }));
        let a = graph.add_node("a", Box::new(Double));
        let b = graph.add_node("b", Box::new(Double));
        graph.connect(src, input(a));
        graph.connect(src, input(b));
        graph.connect(b, Endpoint::Sink);

        let mut out = [0.0f32; 8];
        graph.render(&mut out, 0.0, 48_000.0);
        graph.render(&mut out, 0.0, 48_000.0);

        assert!(out.iter().all(|&s| s == 4.0), "counter advanced twice per block");
    }

    #[test]
    fn second_connection_replaces_input() {
        let mut graph = SignalGraph::new();
        let first = graph.add_node("first", Box::new(Counter { blocks: 0.0 }));
        let second = graph.add_node("second", Box::new(Counter { blocks: 10.0 }));
        let dbl = graph.add_node("double", Box::new(Double));

        graph.connect(first, input(dbl));
        graph.connect(second, input(dbl));

        assert_eq!(graph.input_of(dbl), Some(second));
    }

    #[test]
    fn unconnected_sink_is_silent() {
        let mut graph = SignalGraph::new();
        graph.add_node("counter", Box::new(Counter { blocks: 0.0 }));

        let mut out = [1.0f32; 8];
        graph.render(&mut out, 0.0, 48_000.0);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn param_modulation_is_summed_onto_schedule() {
        let mut graph = SignalGraph::new();
        let src = graph.add_node("counter", Box::new(Counter { blocks: 0.0 }));
        let param = AudioParam::new(graph.next_id(), "level", 0.5);
        let reader = graph.add_node("reader", Box::new(ParamOut { param: param.clone() }));
        graph.connect(src, Endpoint::Param(param));
        graph.connect(reader, Endpoint::Sink);

        let mut out = [0.0f32; 8];
        graph.render(&mut out, 0.0, 48_000.0);
        assert!(out.iter().all(|&s| s == 1.5));
    }

    #[test]
    fn cycles_render_without_panicking() {
        let mut graph = SignalGraph::new();
        let a = graph.add_node("a", Box::new(Double));
        let b = graph.add_node("b", Box::new(Double));
        graph.connect(a, input(b));
        graph.connect(b, input(a));
        graph.connect(b, Endpoint::Sink);

        let mut out = [0.0f32; 8];
        graph.render(&mut out, 0.0, 48_000.0);

        assert!(out.iter().all(|s| s.is_finite()));
        assert_eq!(graph.signal_path().len(), 2);
    }

    #[test]
    fn ignores_unknown_nodes() {
        let mut graph = SignalGraph::new();
        let a = graph.add_node("a", Box::new(Double));
        graph.connect(NodeId(7), input(a));
        graph.connect(a, input(NodeId(9)));

        assert_eq!(graph.input_of(a), None);
    }
}
