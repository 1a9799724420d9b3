//! Criterion benchmarks for basic, full and reduced regressors on the iiwa.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use phyz_ident::{JointTable, RegressorEngine};

// ---------------------------------------------------------------------------
// Trajectory
// ---------------------------------------------------------------------------

/// Smooth deterministic joint trajectory of `n` samples at 100 Hz.
fn trajectory(n: usize) -> (JointTable, JointTable, JointTable) {
    let t = |i: usize| i as f64 * 0.01;
    let w = |j: usize| 0.5 + 0.2 * j as f64;
    let q = JointTable::from_fn(n, 7, |i, j| (w(j) * t(i)).sin());
    let qd = JointTable::from_fn(n, 7, |i, j| w(j) * (w(j) * t(i)).cos());
    let qdd = JointTable::from_fn(n, 7, |i, j| -w(j) * w(j) * (w(j) * t(i)).sin());
    (q, qd, qdd)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_basic(c: &mut Criterion) {
    let engine = RegressorEngine::lbr_iiwa14().unwrap();
    let (q, qd, qdd) = trajectory(1);
    c.bench_function("basic_regressor", |b| {
        b.iter(|| {
            engine
                .compute_basic_regressor(q.row(0), qd.row(0), qdd.row(0))
                .unwrap()
        });
    });
}

fn bench_full(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_regressor");
    let engine = RegressorEngine::lbr_iiwa14().unwrap();

    for n in [100, 1000] {
        let (q, qd, qdd) = trajectory(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| engine.compute_full_regressor(&q, &qd, &qdd).unwrap());
        });
    }
    group.finish();
}

fn bench_reduced(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduced_regressor");
    group.sample_size(20);
    let engine = RegressorEngine::lbr_iiwa14().unwrap();

    for n in [100, 1000] {
        let (q, qd, qdd) = trajectory(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                engine
                    .compute_reduced_regressor(&q, &qd, &qdd, 1e-6)
                    .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_basic, bench_full, bench_reduced);
criterion_main!(benches);
