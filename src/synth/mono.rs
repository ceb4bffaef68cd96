use tracing::{debug, info};

use crate::{
    config::SynthConfig,
    engine::AudioContext,
    error::SynthError,
    graph::{AudioNode, Amplifier, EnvelopeGenerator, Oscillator},
    synth::message::{MessageReceiver, SynthMessage},
};

/// The fixed monophonic patch, driven by host events.
///
/// ```text
/// [Oscillator] ──→ [Amplifier] ──→ destination
///                       ↑ gain
///               [EnvelopeGenerator]
/// ```
///
/// Host events arrive through `rx`. [`MonoSynth::render`] drains them at the
/// start of every block, so note triggers land on block boundaries of the
/// render clock.
pub struct MonoSynth<R> {
    ctx: AudioContext,
    vco: Oscillator,
    vca: Amplifier,
    env: EnvelopeGenerator,
    rx: R,
}

impl<R: MessageReceiver> MonoSynth<R> {
    pub fn new(config: &SynthConfig, rx: R) -> Result<Self, SynthError> {
        config.validate()?;

        let ctx = AudioContext::new(&config.engine)?;
        let vco = Oscillator::new(&ctx, config.oscillator.frequency, config.oscillator.waveform)?;
        let vca = Amplifier::new(&ctx);
        let mut env = EnvelopeGenerator::with_params(ctx.clock(), &config.envelope)?;

        vco.connect(&vca);
        env.connect(vca.gain());
        vca.connect(&ctx.destination());

        info!(
            sample_rate = ctx.sample_rate(),
            waveform = ?vco.waveform(),
            "mono synth patched"
        );

        Ok(Self {
            ctx,
            vco,
            vca,
            env,
            rx,
        })
    }

    /// Apply one host event. Rejected values leave the patch unchanged.
    pub fn handle(&mut self, msg: SynthMessage) -> Result<(), SynthError> {
        match msg {
            SynthMessage::NoteOn { frequency } => {
                self.vco.set_frequency(frequency)?;
                self.env.trigger()?;
            }
            SynthMessage::SetAttack(seconds) => self.env.set_attack(seconds)?,
            SynthMessage::SetSustain(seconds) => self.env.set_sustain(seconds)?,
            SynthMessage::SetDecay(seconds) => self.env.set_decay(seconds)?,
            SynthMessage::SetRelease(seconds) => self.env.set_release(seconds)?,
        }
        Ok(())
    }

    /// Drain pending host events, returning how many were read.
    pub fn process_messages(&mut self) -> usize {
        let mut count = 0;
        while let Some(msg) = self.rx.pop() {
            count += 1;
            if let Err(err) = self.handle(msg) {
                debug!(?msg, %err, "host event dropped");
            }
        }
        count
    }

    /// Process pending events, then render one buffer of mono output.
    pub fn render(&mut self, out: &mut [f32]) {
        self.process_messages();
        self.ctx.render(out);
    }

    pub fn context(&self) -> &AudioContext {
        &self.ctx
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.vco
    }

    pub fn amplifier(&self) -> &Amplifier {
        &self.vca
    }

    pub fn envelope(&self) -> &EnvelopeGenerator {
        &self.env
    }

    pub fn envelope_mut(&mut self) -> &mut EnvelopeGenerator {
        &mut self.env
    }
}
