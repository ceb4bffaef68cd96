//! Real-world scenario benchmarks.

mod patch;

pub use patch::bench_patch;
