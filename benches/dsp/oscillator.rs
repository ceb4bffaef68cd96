//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::{oscillator::OscillatorBlock, Waveform};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let frequency = vec![440.0f32; size];

        for (name, waveform) in [
            ("sine", Waveform::Sine),         // sin() per sample
            ("square", Waveform::Square),     // branch per sample
            ("sawtooth", Waveform::Sawtooth), // linear ramp
            ("triangle", Waveform::Triangle), // absolute value
        ] {
            let mut osc = OscillatorBlock::new(waveform);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    osc.render(black_box(&frequency), 48_000.0, black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
