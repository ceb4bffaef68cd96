//! Benchmarks for the complete mono patch.
//!
//! oscillator → amplifier → destination, gain driven by the envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::{
    dsp::Waveform,
    graph::{Amplifier, AudioNode, EnvelopeGenerator, Oscillator},
    AudioContext,
};

use crate::BLOCK_SIZES;

pub fn bench_patch(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/patch");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let ctx = AudioContext::with_sample_rate(48_000.0).expect("valid sample rate");
        let vco = Oscillator::new(&ctx, 110.0, Waveform::Sawtooth).expect("valid frequency");
        let vca = Amplifier::new(&ctx);
        let mut env = EnvelopeGenerator::new(ctx.clock());
        vco.connect(&vca);
        env.connect(vca.gain());
        vca.connect(&ctx.destination());

        // Re-trigger each iteration so the gain stays inside a ramp
        group.bench_with_input(BenchmarkId::new("note", size), &size, |b, _| {
            b.iter(|| {
                let _ = env.trigger();
                ctx.render(black_box(&mut buffer));
            })
        });

        // Idle: gain held at 0, oscillator still running
        let idle = AudioContext::with_sample_rate(48_000.0).expect("valid sample rate");
        let vco = Oscillator::new(&idle, 110.0, Waveform::Sawtooth).expect("valid frequency");
        let vca = Amplifier::new(&idle);
        vco.connect(&vca);
        vca.connect(&idle.destination());

        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                idle.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
