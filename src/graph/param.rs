use std::sync::{Arc, Mutex};

use crate::{
    dsp::timeline::{AutomationEvent, ParamTimeline},
    graph::node::NodeId,
    lock,
};

struct ParamInner {
    owner: NodeId,
    name: &'static str,
    timeline: Mutex<ParamTimeline>,
}

/// Shared handle to a node parameter's automation timeline.
///
/// The control thread schedules values through any clone; the owning node
/// samples the same timeline while rendering. Clones compare equal with
/// [`AudioParam::same_as`].
#[derive(Clone)]
pub struct AudioParam {
    inner: Arc<ParamInner>,
}

impl AudioParam {
    pub(crate) fn new(owner: NodeId, name: &'static str, default_value: f32) -> Self {
        Self {
            inner: Arc::new(ParamInner {
                owner,
                name,
                timeline: Mutex::new(ParamTimeline::new(default_value)),
            }),
        }
    }

    pub fn owner(&self) -> NodeId {
        self.inner.owner
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    pub fn same_as(&self, other: &AudioParam) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn default_value(&self) -> f32 {
        lock(&self.inner.timeline).default_value()
    }

    pub fn value_at(&self, time: f64) -> f32 {
        lock(&self.inner.timeline).value_at(time)
    }

    /// Snapshot of the scheduled events.
    pub fn events(&self) -> Vec<AutomationEvent> {
        lock(&self.inner.timeline).events().to_vec()
    }

    pub fn set_value_at_time(&self, value: f32, time: f64) {
        lock(&self.inner.timeline).set_value_at_time(value, time);
    }

    pub fn linear_ramp_to_value_at_time(&self, value: f32, time: f64) {
        lock(&self.inner.timeline).linear_ramp_to_value_at_time(value, time);
    }

    pub fn cancel_scheduled_values(&self, time: f64) {
        lock(&self.inner.timeline).cancel_scheduled_values(time);
    }

    /// Run several timeline edits under one lock, so the renderer never sees
    /// a partially written curve.
    pub fn with_timeline<R>(&self, f: impl FnOnce(&mut ParamTimeline) -> R) -> R {
        f(&mut lock(&self.inner.timeline))
    }

    pub(crate) fn render_block(&self, time: f64, sample_rate: f32, out: &mut [f32]) {
        let mut timeline = lock(&self.inner.timeline);
        timeline.prune_before(time);
        timeline.render(time, sample_rate, out);
    }
}

impl std::fmt::Debug for AudioParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioParam")
            .field("owner", &self.inner.owner)
            .field("name", &self.inner.name)
            .finish()
    }
}
