use tracing::{debug, warn};

use crate::{
    dsp::oscillator::{OscillatorBlock, Waveform},
    engine::AudioContext,
    error::ConfigError,
    graph::{
        node::{AudioNode, GraphNode, HasInputTerminal, InputTerminal, NodeId, RenderCtx},
        param::AudioParam,
    },
    MAX_BLOCK_SIZE,
};

/*
Voltage-Controlled Oscillator
=============================

The VCO is the patch's only sound source. It starts running the moment it is
created and never stops; whether it is heard depends entirely on the
amplifier downstream.

  frequency param ──→ [phase accumulator] ──→ waveform(phase) ──→ out

Pitch changes are hard sets on the frequency parameter at the current clock
time. The phase is continuous across them, so a new note changes the slope
of the accumulator without a discontinuity in phase.

The node has an input terminal so it can sit anywhere in a chain, but it
ignores whatever arrives there.

Example:
  let ctx = AudioContext::with_sample_rate(48_000.0)?;
  let vco = Oscillator::new(&ctx, 440.0, Waveform::Sawtooth)?;
  vco.set_frequency(880.0)?;   // one octave up, from now on
*/

fn check_frequency(frequency: f32) -> Result<f32, ConfigError> {
    if frequency.is_finite() && frequency > 0.0 {
        Ok(frequency)
    } else {
        Err(ConfigError::NonPositiveFrequency(frequency))
    }
}

/// Control handle of an oscillator node.
#[derive(Debug, Clone)]
pub struct Oscillator {
    id: NodeId,
    ctx: AudioContext,
    waveform: Waveform,
    frequency: AudioParam,
}

impl Oscillator {
    pub fn new(ctx: &AudioContext, frequency: f32, waveform: Waveform) -> Result<Self, ConfigError> {
        let frequency = check_frequency(frequency)?;

        let (id, param) = ctx.with_graph(|graph| {
            let param = AudioParam::new(graph.next_id(), "frequency", frequency);
            let processor = OscProcessor {
                osc: OscillatorBlock::new(waveform),
                frequency: param.clone(),
                freq_buffer: vec![frequency; MAX_BLOCK_SIZE],
            };
            (graph.add_node("oscillator", Box::new(processor)), param)
        });

        debug!(node = id.0, frequency, ?waveform, "created oscillator");

        Ok(Self {
            id,
            ctx: ctx.clone(),
            waveform,
            frequency: param,
        })
    }

    /// Jump to `frequency` Hz at the current clock time.
    pub fn set_frequency(&self, frequency: f32) -> Result<(), ConfigError> {
        let frequency = check_frequency(frequency).inspect_err(|err| {
            warn!(node = self.id.0, %err, "rejected oscillator frequency");
        })?;

        self.frequency
            .set_value_at_time(frequency, self.ctx.current_time());
        Ok(())
    }

    pub fn frequency(&self) -> &AudioParam {
        &self.frequency
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }
}

impl AudioNode for Oscillator {
    fn id(&self) -> NodeId {
        self.id
    }

    fn context(&self) -> &AudioContext {
        &self.ctx
    }
}

impl HasInputTerminal for Oscillator {
    fn input(&self) -> InputTerminal {
        InputTerminal(self.id)
    }
}

struct OscProcessor {
    osc: OscillatorBlock,
    frequency: AudioParam,
    freq_buffer: Vec<f32>,
}

impl GraphNode for OscProcessor {
    fn render_block(&mut self, _input: &[f32], out: &mut [f32], ctx: &RenderCtx) {
        let freq = &mut self.freq_buffer[..out.len()];
        ctx.param_values(&self.frequency, freq);
        self.osc.render(freq, ctx.sample_rate, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_frequency() {
        let ctx = AudioContext::with_sample_rate(48_000.0).unwrap();

        assert_eq!(
            Oscillator::new(&ctx, 0.0, Waveform::Sine).unwrap_err(),
            ConfigError::NonPositiveFrequency(0.0)
        );
        assert!(Oscillator::new(&ctx, f32::INFINITY, Waveform::Sine).is_err());
    }

    #[test]
    fn rejected_frequency_leaves_schedule_untouched() {
        let ctx = AudioContext::with_sample_rate(48_000.0).unwrap();
        let vco = Oscillator::new(&ctx, 440.0, Waveform::Sine).unwrap();

        assert!(vco.set_frequency(-1.0).is_err());
        assert!(vco.frequency().events().is_empty());
        assert_eq!(vco.frequency().value_at(1.0), 440.0);
    }

    #[test]
    fn set_frequency_lands_at_current_time() {
        let ctx = AudioContext::with_sample_rate(1_000.0).unwrap();
        let vco = Oscillator::new(&ctx, 440.0, Waveform::Sine).unwrap();

        let mut out = vec![0.0; 500];
        ctx.render(&mut out);
        vco.set_frequency(880.0).unwrap();

        let events = vco.frequency().events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time, 0.5);
        assert_eq!(vco.frequency().value_at(0.49), 440.0);
        assert_eq!(vco.frequency().value_at(0.5), 880.0);
    }

    #[test]
    fn square_wave_reaches_the_sink() {
        let ctx = AudioContext::with_sample_rate(8.0).unwrap();
        let vco = Oscillator::new(&ctx, 1.0, Waveform::Square).unwrap();
        vco.connect(&ctx.destination());

        let mut out = [0.0f32; 8];
        ctx.render(&mut out);

        assert_eq!(out, [1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]);
    }
}
