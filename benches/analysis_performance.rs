//! Performance benchmarks for trace parsing and derived quantities
//!
//! # What We're Measuring
//!
//! 1. **Parsing**: text → validated `Trace`, dominated by float parsing
//! 2. **Speeds**: pooled `|v|` over every particle and frame
//! 3. **Spectrum**: FFT of one oscillator displacement
//!
//! Parsing and speeds should scale linearly with `frames × particles`; the
//! spectrum scales as `R log R`.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --bench analysis_performance
//!
//! # With the rayon speed pooling
//! cargo bench --bench analysis_performance --features parallel
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use simviz_rs::analysis::{kinematics, Spectrum};
use simviz_rs::trace::{parse_trace, EntityLayout};

// =================================================================================================
// Synthetic traces
// =================================================================================================

fn particle_text(particles: usize, frames: usize) -> String {
    let mut text = String::from("# W: 10\n# H: 10\n");
    for frame in 0..frames {
        let t = frame as f64 * 0.001;
        text.push_str(&format!("{}", t));
        for p in 0..particles {
            let phase = p as f64 * 0.37 + t;
            text.push_str(&format!(" {} {} {} {}", 5.0 + phase.cos(), 5.0 + phase.sin(), -phase.sin(), phase.cos()));
        }
        text.push('\n');
    }
    text
}

fn oscillator_signal(frames: usize, dt: f64) -> Vec<f64> {
    (0..frames)
        .map(|i| {
            let t = i as f64 * dt;
            (2.0 * std::f64::consts::PI * 1.3 * t).cos() + 0.3 * (2.0 * std::f64::consts::PI * 4.1 * t).sin()
        })
        .collect()
}

// =================================================================================================
// Benchmark Functions
// =================================================================================================

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_trace");

    for frames in [100, 1_000, 5_000] {
        let text = particle_text(16, frames);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(frames), &text, |b, text| {
            b.iter(|| parse_trace(black_box(text), EntityLayout::Kinematic).unwrap())
        });
    }

    group.finish();
}

fn benchmark_speeds(c: &mut Criterion) {
    let mut group = c.benchmark_group("speed_samples");

    for particles in [4, 16, 64] {
        let trace = parse_trace(&particle_text(particles, 2_000), EntityLayout::Kinematic).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(particles), &trace, |b, trace| {
            b.iter(|| kinematics::speed_samples(black_box(trace)).unwrap())
        });
    }

    group.finish();
}

fn benchmark_spectrum(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectrum");

    for frames in [1_024, 10_000, 100_000] {
        let signal = oscillator_signal(frames, 0.01);
        group.bench_with_input(BenchmarkId::from_parameter(frames), &signal, |b, signal| {
            b.iter(|| Spectrum::compute(black_box(signal), 0.01).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_speeds, benchmark_spectrum);
criterion_main!(benches);
