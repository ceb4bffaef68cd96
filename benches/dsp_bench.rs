//! Benchmarks for DSP primitives and the full mono patch.
//!
//! Run with: cargo bench
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Oscillator, amplifier, parameter timeline, envelope triggering
//!   - scenarios/*  The oscillator → amplifier → destination patch

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    dsp::bench_amplify,
    dsp::bench_oscillator,
    dsp::bench_timeline,
    dsp::bench_envelope,
    scenarios::bench_patch,
);
criterion_main!(benches);
