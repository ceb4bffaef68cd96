//! Benchmarks for parameter timeline rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::{AsdrShape, ParamTimeline};

use crate::BLOCK_SIZES;

pub fn bench_timeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/timeline");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Held value - constant fill fast path
        let mut held = ParamTimeline::new(0.0);
        held.set_value_at_time(0.5, 0.0);
        group.bench_with_input(BenchmarkId::new("held", size), &size, |b, _| {
            b.iter(|| {
                held.render(black_box(1.0), 48_000.0, black_box(&mut buffer));
            })
        });

        // Inside the attack ramp - per-sample interpolation
        let mut ramp = ParamTimeline::new(0.0);
        AsdrShape::default().schedule(&mut ramp, 0.0);
        group.bench_with_input(BenchmarkId::new("ramp", size), &size, |b, _| {
            b.iter(|| {
                ramp.render(black_box(0.01), 48_000.0, black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
