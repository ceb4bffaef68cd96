use crate::{
    dsp::timeline::ParamTimeline,
    error::{ConfigError, Stage},
};

/*
ASDR Envelope Scheduling
========================

This envelope does not run per sample. A trigger converts four durations and
one level into five time-stamped points and writes them onto a parameter
timeline in one go. The renderer interpolates between them afterwards, so the
curve is "fire and forget" once scheduled.

Vocabulary
----------

  attack       seconds to ramp 0 → 1
  sustain      seconds to hold at 1
  decay        seconds to ramp 1 → decay level
  release      seconds to ramp decay level → 0
  decay level  gain reached at the end of the decay stage, in (0, 1]


The Shape
---------

  gain
    1.0 ┐     ╱‾‾‾‾‾‾╲
        │    ╱        ╲
    DL  │   ╱          ●
        │  ╱            ╲
    0.0 ●─╱──────────────╲──→ time
        t0  A      S    D  R

  point   time                value
  -----   ------------------  -----------
  p0      t0                  0           (set, hard reset)
  p1      t0+A                1           (ramp)
  p2      t0+A+S              1           (ramp, i.e. hold)
  p3      t0+A+S+D            decay level (ramp)
  p4      t0+A+S+D+R          0           (ramp)

Re-triggering
-------------

Scheduling first cancels everything on the timeline at or after t0, then
sets 0 at t0. A new trigger always wins over the tail of the previous one and
the gain restarts from silence, even if the old curve was mid-release.

Zero durations make neighbouring points coincide. The timeline treats a ramp
of zero length as a jump, so all-zero durations collapse to five points at t0
and the curve settles at 0 immediately.
*/

pub const DEFAULT_STAGE_TIME: f64 = 0.1;
pub const DEFAULT_DECAY_LEVEL: f32 = 0.6667;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub time: f64,
    pub value: f32,
}

/// Durations and level that shape one envelope curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsdrShape {
    attack: f64,
    sustain: f64,
    decay: f64,
    release: f64,
    decay_level: f32,
}

fn check_duration(stage: Stage, seconds: f64) -> Result<f64, ConfigError> {
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(ConfigError::NegativeDuration { stage, seconds })
    }
}

fn check_decay_level(level: f32) -> Result<f32, ConfigError> {
    if level > 0.0 && level <= 1.0 {
        Ok(level)
    } else {
        Err(ConfigError::DecayLevelOutOfRange(level))
    }
}

impl AsdrShape {
    pub fn new(
        attack: f64,
        sustain: f64,
        decay: f64,
        release: f64,
        decay_level: f32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            attack: check_duration(Stage::Attack, attack)?,
            sustain: check_duration(Stage::Sustain, sustain)?,
            decay: check_duration(Stage::Decay, decay)?,
            release: check_duration(Stage::Release, release)?,
            decay_level: check_decay_level(decay_level)?,
        })
    }

    pub fn set_duration(&mut self, stage: Stage, seconds: f64) -> Result<(), ConfigError> {
        let seconds = check_duration(stage, seconds)?;
        match stage {
            Stage::Attack => self.attack = seconds,
            Stage::Sustain => self.sustain = seconds,
            Stage::Decay => self.decay = seconds,
            Stage::Release => self.release = seconds,
        }
        Ok(())
    }

    pub fn duration(&self, stage: Stage) -> f64 {
        match stage {
            Stage::Attack => self.attack,
            Stage::Sustain => self.sustain,
            Stage::Decay => self.decay,
            Stage::Release => self.release,
        }
    }

    pub fn set_decay_level(&mut self, level: f32) -> Result<(), ConfigError> {
        self.decay_level = check_decay_level(level)?;
        Ok(())
    }

    pub fn decay_level(&self) -> f32 {
        self.decay_level
    }

    pub fn total_duration(&self) -> f64 {
        self.attack + self.sustain + self.decay + self.release
    }

    /// The five points a trigger at `t0` schedules, in time order.
    pub fn curve(&self, t0: f64) -> [CurvePoint; 5] {
        let t1 = t0 + self.attack;
        let t2 = t1 + self.sustain;
        let t3 = t2 + self.decay;
        let t4 = t3 + self.release;

        [
            CurvePoint { time: t0, value: 0.0 },
            CurvePoint { time: t1, value: 1.0 },
            CurvePoint { time: t2, value: 1.0 },
            CurvePoint {
                time: t3,
                value: self.decay_level,
            },
            CurvePoint { time: t4, value: 0.0 },
        ]
    }

    /// Cancel the future of `timeline` from `t0` and write a fresh curve.
    pub fn schedule(&self, timeline: &mut ParamTimeline, t0: f64) -> [CurvePoint; 5] {
        let points = self.curve(t0);

        timeline.cancel_scheduled_values(t0);
        timeline.set_value_at_time(points[0].value, points[0].time);
        for point in &points[1..] {
            timeline.linear_ramp_to_value_at_time(point.value, point.time);
        }

        points
    }
}

impl Default for AsdrShape {
    fn default() -> Self {
        Self {
            attack: DEFAULT_STAGE_TIME,
            sustain: DEFAULT_STAGE_TIME,
            decay: DEFAULT_STAGE_TIME,
            release: DEFAULT_STAGE_TIME,
            decay_level: DEFAULT_DECAY_LEVEL,
        }
    }
}
