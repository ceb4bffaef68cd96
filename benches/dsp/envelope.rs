//! Benchmarks for envelope triggering (control-thread cost).

use std::hint::black_box;

use criterion::Criterion;
use monosynth::{
    graph::{Amplifier, EnvelopeGenerator},
    AudioContext,
};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    let ctx = AudioContext::with_sample_rate(48_000.0).expect("valid sample rate");
    let vca = Amplifier::new(&ctx);
    let mut env = EnvelopeGenerator::new(ctx.clock());
    env.connect(vca.gain());

    // Clock never advances, so each trigger replaces the previous curve
    group.bench_function("trigger", |b| {
        b.iter(|| black_box(env.trigger()).is_ok());
    });

    group.bench_function("curve_at", |b| {
        b.iter(|| env.curve_at(black_box(1.0)));
    });

    group.finish();
}
