use tracing::debug;

use crate::{
    dsp::amplify::multiply,
    engine::AudioContext,
    graph::{
        node::{AudioNode, GraphNode, HasInputTerminal, InputTerminal, NodeId, RenderCtx},
        param::AudioParam,
    },
    MAX_BLOCK_SIZE,
};

/// Control handle of a voltage-controlled amplifier.
///
/// The gain parameter starts at 0, so the amplifier is silent until an
/// envelope (or a modulating node) drives it.
#[derive(Debug, Clone)]
pub struct Amplifier {
    id: NodeId,
    ctx: AudioContext,
    gain: AudioParam,
}

impl Amplifier {
    pub fn new(ctx: &AudioContext) -> Self {
        let (id, gain) = ctx.with_graph(|graph| {
            let gain = AudioParam::new(graph.next_id(), "gain", 0.0);
            let processor = AmpProcessor {
                gain: gain.clone(),
                gain_buffer: vec![0.0; MAX_BLOCK_SIZE],
            };
            (graph.add_node("amplifier", Box::new(processor)), gain)
        });

        debug!(node = id.0, "created amplifier");

        Self {
            id,
            ctx: ctx.clone(),
            gain,
        }
    }

    pub fn gain(&self) -> &AudioParam {
        &self.gain
    }
}

impl AudioNode for Amplifier {
    fn id(&self) -> NodeId {
        self.id
    }

    fn context(&self) -> &AudioContext {
        &self.ctx
    }
}

impl HasInputTerminal for Amplifier {
    fn input(&self) -> InputTerminal {
        InputTerminal(self.id)
    }
}

struct AmpProcessor {
    gain: AudioParam,
    gain_buffer: Vec<f32>,
}

impl GraphNode for AmpProcessor {
    fn render_block(&mut self, input: &[f32], out: &mut [f32], ctx: &RenderCtx) {
        // Slice to block size (RT-safe, no allocation)
        let gain = &mut self.gain_buffer[..out.len()];
        ctx.param_values(&self.gain, gain);
        multiply(input, gain, out);
    }
}
