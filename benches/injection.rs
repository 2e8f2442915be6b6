//! Benchmarks for anomaly injection throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sanin::{AnomalyKind, Injector, Overrides, TimeSeries};

fn generate_test_series(count: usize) -> TimeSeries {
    let values = (0..count)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0 + (i as f64 % 7.0) * 0.1)
        .collect();
    TimeSeries::from_values(values)
}

fn bench_point_kinds(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_kinds");

    let series = generate_test_series(10_000);
    let overrides = Overrides::new().with_n_points(5);
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("spike_10000_points", |b| {
        let mut injector = Injector::new(42);
        b.iter(|| {
            let result = injector.inject(&series, AnomalyKind::Spike, &overrides, false);
            black_box(result)
        })
    });

    group.finish();
}

fn bench_window_kinds(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_kinds");

    let series = generate_test_series(10_000);
    group.throughput(Throughput::Elements(10_000));

    for kind in [
        AnomalyKind::VarianceChange,
        AnomalyKind::SeasonAmpChange,
        AnomalyKind::Blackout,
    ] {
        group.bench_function(format!("{}_10000_points", kind), |b| {
            let mut injector = Injector::new(42);
            b.iter(|| black_box(injector.inject(&series, kind, &Overrides::new(), true)))
        });
    }

    group.finish();
}

fn bench_inject_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("inject_all");

    let series = generate_test_series(1000);
    group.throughput(Throughput::Elements(11));

    group.bench_function("all_kinds_1000_points", |b| {
        let mut injector = Injector::new(42);
        b.iter(|| black_box(injector.inject_all(&series)))
    });

    group.finish();
}

criterion_group!(benches, bench_point_kinds, bench_window_kinds, bench_inject_all);
criterion_main!(benches);
