//! Benchmark the full fixed-update schedule through the `TestCity` harness.
//!
//! Run with: cargo bench -p transit --bench city_tick_bench --features bench

use criterion::{criterion_group, criterion_main, Criterion};

use transit::test_harness::TestCity;

fn bench_city_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("city_tick");
    group.sample_size(50);

    let mut city = TestCity::new()
        .with_population(2000)
        .with_stop(200.0)
        .with_stop(1400.0)
        .with_stop(2600.0)
        .with_waiting_citizens(0, 500)
        .with_waiting_citizens(1, 500)
        .with_walking_citizens(1300.0, 1000);
    city.tick(120);

    group.bench_function("single_tick", |b| {
        b.iter(|| city.tick(1));
    });

    group.finish();
}

criterion_group!(benches, bench_city_tick);
criterion_main!(benches);
