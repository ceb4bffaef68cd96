use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    config::EnvelopeConfig,
    dsp::envelope::{AsdrShape, CurvePoint},
    engine::Clock,
    error::{ConfigError, Stage, SynthError},
    graph::param::AudioParam,
};

/// ASDR envelope scheduler.
///
/// Unlike the other nodes this one renders nothing. Each [`trigger`] reads
/// the clock and writes a five-point curve onto the bound parameter,
/// typically an amplifier's gain; the parameter's owner interpolates it.
///
/// [`trigger`]: EnvelopeGenerator::trigger
pub struct EnvelopeGenerator {
    clock: Arc<dyn Clock>,
    shape: AsdrShape,
    target: Option<AudioParam>,
}

impl EnvelopeGenerator {
    /// Envelope with default stage times (0.1 s each) and decay level.
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self::with_shape(clock, AsdrShape::default())
    }

    pub fn with_shape(clock: impl Clock + 'static, shape: AsdrShape) -> Self {
        Self {
            clock: Arc::new(clock),
            shape,
            target: None,
        }
    }

    pub fn with_params(
        clock: impl Clock + 'static,
        config: &EnvelopeConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::with_shape(clock, config.shape()?))
    }

    fn set_stage(&mut self, stage: Stage, seconds: f64) -> Result<(), ConfigError> {
        self.shape
            .set_duration(stage, seconds)
            .inspect_err(|err| warn!(%err, "rejected envelope time"))
    }

    pub fn set_attack(&mut self, seconds: f64) -> Result<(), ConfigError> {
        self.set_stage(Stage::Attack, seconds)
    }

    pub fn set_sustain(&mut self, seconds: f64) -> Result<(), ConfigError> {
        self.set_stage(Stage::Sustain, seconds)
    }

    pub fn set_decay(&mut self, seconds: f64) -> Result<(), ConfigError> {
        self.set_stage(Stage::Decay, seconds)
    }

    pub fn set_release(&mut self, seconds: f64) -> Result<(), ConfigError> {
        self.set_stage(Stage::Release, seconds)
    }

    pub fn set_decay_level(&mut self, level: f32) -> Result<(), ConfigError> {
        self.shape
            .set_decay_level(level)
            .inspect_err(|err| warn!(%err, "rejected decay level"))
    }

    pub fn attack(&self) -> f64 {
        self.shape.duration(Stage::Attack)
    }

    pub fn sustain(&self) -> f64 {
        self.shape.duration(Stage::Sustain)
    }

    pub fn decay(&self) -> f64 {
        self.shape.duration(Stage::Decay)
    }

    pub fn release(&self) -> f64 {
        self.shape.duration(Stage::Release)
    }

    pub fn decay_level(&self) -> f32 {
        self.shape.decay_level()
    }

    pub fn shape(&self) -> &AsdrShape {
        &self.shape
    }

    pub fn total_duration(&self) -> f64 {
        self.shape.total_duration()
    }

    /// Bind the parameter future triggers write to, replacing any earlier one.
    pub fn connect(&mut self, param: &AudioParam) {
        if let Some(prev) = &self.target {
            if !prev.same_as(param) {
                debug!(param = param.name(), "rebinding envelope target");
            }
        }
        self.target = Some(param.clone());
    }

    pub fn target(&self) -> Option<&AudioParam> {
        self.target.as_ref()
    }

    /// Points a trigger at `t0` would schedule with the current settings.
    pub fn curve_at(&self, t0: f64) -> [CurvePoint; 5] {
        self.shape.curve(t0)
    }

    /// Restart the curve at the current clock time.
    ///
    /// Everything already scheduled at or after now is discarded and the gain
    /// is reset to 0 before the new attack. The five points are written under
    /// one lock, so the renderer never observes half a curve.
    pub fn trigger(&self) -> Result<[CurvePoint; 5], SynthError> {
        let Some(target) = &self.target else {
            warn!("envelope triggered without a target parameter");
            return Err(SynthError::TargetUnbound);
        };

        let t0 = self.clock.current_time();
        let points = target.with_timeline(|timeline| self.shape.schedule(timeline, t0));

        debug!(
            t0,
            end = points[4].time,
            param = target.name(),
            "triggered envelope"
        );
        Ok(points)
    }
}

impl std::fmt::Debug for EnvelopeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeGenerator")
            .field("shape", &self.shape)
            .field("target", &self.target)
            .finish()
    }
}
