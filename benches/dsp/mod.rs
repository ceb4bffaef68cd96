//! Benchmarks for low-level DSP primitives.

mod amplify;
mod envelope;
mod oscillator;
mod timeline;

pub use amplify::bench_amplify;
pub use envelope::bench_envelope;
pub use oscillator::bench_oscillator;
pub use timeline::bench_timeline;
