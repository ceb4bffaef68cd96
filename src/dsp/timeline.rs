use tracing::warn;

/*
Parameter Timeline
==================

A parameter timeline is a time-ordered list of scheduled values for a single
controllable quantity (an amplifier's gain, an oscillator's frequency). The
control thread writes events into the future; the render thread samples the
timeline once per output sample.

Vocabulary
----------

  event         A (time, value) pair plus how the curve reaches it.

  set-value     Jump to `value` at `time`, hold it afterwards.

  linear ramp   Travel in a straight line from the previous event's
                (time, value) to this event's (time, value).

  default       The value reported before the first event.


The Shape
---------

  set(0, t0)  ramp(1, t1)  ramp(1, t2)  ramp(0.66, t3)  ramp(0, t4)

  value
    1.0 ┐      ╱‾‾‾‾‾‾‾╲
        │     ╱         ╲____
   0.66 │    ╱               ╲
        │   ╱                 ╲
    0.0 └──●───────────────────●──→ time
          t0   t1      t2  t3  t4

Evaluating value_at(t)
----------------------

  1. Find the last event with time <= t.
  2. If none: before the first event. Report the default, unless the first
     event is a ramp, in which case ramp from the default at time 0.
  3. If the next event is a ramp ending after t: interpolate between the
     last event and that ramp's end point.
  4. Otherwise hold the last event's value.

A ramp whose start and end time are equal never interpolates (the interval
[start, end) is empty), so zero-length segments are instantaneous jumps and
never divide by zero.

Cancellation
------------

cancel_scheduled_values(t) removes every event at or after `t`. A ramp that
was in flight then disappears and the curve holds the last remaining value,
so callers usually follow a cancel with a set-value at the same time.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    SetValue,
    LinearRamp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomationEvent {
    pub kind: EventKind,
    pub time: f64,
    pub value: f32,
}

#[derive(Debug, Clone)]
pub struct ParamTimeline {
    default_value: f32,
    events: Vec<AutomationEvent>,
}

impl ParamTimeline {
    pub fn new(default_value: f32) -> Self {
        Self {
            default_value,
            events: Vec::new(),
        }
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    /// Scheduled events, sorted by time.
    pub fn events(&self) -> &[AutomationEvent] {
        &self.events
    }

    pub fn set_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(EventKind::SetValue, value, time);
    }

    pub fn linear_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(EventKind::LinearRamp, value, time);
    }

    /// Remove every event scheduled at or after `time`.
    pub fn cancel_scheduled_values(&mut self, time: f64) {
        let keep = self.events.partition_point(|e| e.time < time);
        self.events.truncate(keep);
    }

    fn insert(&mut self, kind: EventKind, value: f32, time: f64) {
        if !time.is_finite() || !value.is_finite() {
            warn!(?kind, time, value, "ignoring non-finite automation event");
            return;
        }

        // Equal times keep insertion order
        let idx = self.events.partition_point(|e| e.time <= time);
        self.events.insert(idx, AutomationEvent { kind, time, value });
    }

    pub fn value_at(&self, time: f64) -> f32 {
        // Number of events at or before `time`
        let idx = self.events.partition_point(|e| e.time <= time);

        let (start_time, start_value) = match idx {
            0 => (0.0, self.default_value),
            _ => {
                let last = &self.events[idx - 1];
                (last.time, last.value)
            }
        };

        match self.events.get(idx) {
            Some(next) if next.kind == EventKind::LinearRamp && (idx > 0 || time >= 0.0) => {
                let span = next.time - start_time;
                if span <= 0.0 {
                    return next.value;
                }
                let progress = ((time - start_time) / span) as f32;
                start_value + (next.value - start_value) * progress
            }
            _ => start_value,
        }
    }

    /// Fill `out` with one value per sample, starting at `start_time`.
    pub fn render(&self, start_time: f64, sample_rate: f32, out: &mut [f32]) {
        let dt = 1.0 / sample_rate as f64;

        // Fast path: nothing can change within this block
        let end_time = start_time + dt * out.len() as f64;
        let first_pending = self.events.partition_point(|e| e.time <= start_time);
        let constant = match self.events.get(first_pending) {
            None => true,
            Some(next) => next.kind == EventKind::SetValue && next.time >= end_time,
        };
        if constant {
            out.fill(self.value_at(start_time));
            return;
        }

        for (i, sample) in out.iter_mut().enumerate() {
            *sample = self.value_at(start_time + dt * i as f64);
        }
    }

    /// Drop events that cannot influence any value at or after `time`.
    ///
    /// The last event at or before `time` is kept as the anchor for whatever
    /// follows it.
    pub fn prune_before(&mut self, time: f64) {
        let at_or_before = self.events.partition_point(|e| e.time <= time);
        if at_or_before > 1 {
            self.events.drain(..at_or_before - 1);
        }
    }
}

impl Default for ParamTimeline {
    fn default() -> Self {
        Self::new(0.0)
    }
}
