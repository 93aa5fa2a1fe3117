//! Estimator update benchmarks.
//!
//! Run with: `cargo bench --package geiger-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geiger_bench::{Sample, sparse_samples, steady_samples};
use geiger_lib::{RateEstimator, WindowConfig};
use std::hint::black_box;

/// Updates per benchmark iteration.
const UPDATES: u32 = 1_000;

/// Window sizes to compare.
const BUCKET_COUNTS: [usize; 3] = [10, 100, 1_000];

fn run(config: WindowConfig, samples: &[Sample]) {
    let mut estimator = RateEstimator::new(config).expect("valid config");
    for &(counter, now) in samples {
        black_box(estimator.update(counter, now));
    }
}

/// One update per bucket, the regular polling cadence.
fn steady_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("steady");
    group.throughput(Throughput::Elements(u64::from(UPDATES)));

    for buckets in BUCKET_COUNTS {
        let config = WindowConfig::new(60_000, buckets);
        let samples = steady_samples(&config, UPDATES, 17);
        group.bench_with_input(BenchmarkId::from_parameter(buckets), &samples, |b, samples| {
            b.iter(|| run(config, samples));
        });
    }

    group.finish();
}

/// Gaps longer than the window, taking the catch-up short cut every time.
fn sparse_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse");
    group.throughput(Throughput::Elements(u64::from(UPDATES)));

    for buckets in BUCKET_COUNTS {
        let config = WindowConfig::new(60_000, buckets);
        let samples = sparse_samples(&config, UPDATES);
        group.bench_with_input(BenchmarkId::from_parameter(buckets), &samples, |b, samples| {
            b.iter(|| run(config, samples));
        });
    }

    group.finish();
}

criterion_group!(benches, steady_updates, sparse_updates);
criterion_main!(benches);
