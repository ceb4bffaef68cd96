use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Monotonic time source, in seconds.
pub trait Clock: Send + Sync {
    fn current_time(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn current_time(&self) -> f64 {
        (**self).current_time()
    }
}

/// Clock driven by the number of frames the renderer has produced.
///
/// Clones share the same counter. Only the render side advances it; the
/// control side reads it without locking.
#[derive(Debug, Clone)]
pub struct SampleClock {
    frames: Arc<AtomicU64>,
    sample_rate: f32,
}

impl SampleClock {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    pub(crate) fn advance(&self, frames: usize) {
        self.frames.fetch_add(frames as u64, Ordering::AcqRel);
    }
}

impl Clock for SampleClock {
    fn current_time(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_advances() {
        let clock = SampleClock::new(1_000.0);
        assert_eq!(clock.current_time(), 0.0);

        clock.advance(250);
        assert_eq!(clock.frames(), 250);
        assert_eq!(clock.current_time(), 0.25);
    }

    #[test]
    fn clones_share_the_counter() {
        let clock = SampleClock::new(48_000.0);
        let reader = clock.clone();
        clock.advance(48_000);
        assert_eq!(reader.current_time(), 1.0);
    }
}
