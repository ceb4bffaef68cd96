//! Benchmarks for signal × gain.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::amplify::multiply;

use crate::BLOCK_SIZES;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");

    for &size in BLOCK_SIZES {
        let signal: Vec<f32> = (0..size).map(|i| (i as f32 * 0.01).sin()).collect();
        let gain: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();
        let mut out = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("multiply", size), &size, |b, _| {
            b.iter(|| {
                multiply(black_box(&signal), black_box(&gain), black_box(&mut out));
            })
        });
    }

    group.finish();
}
