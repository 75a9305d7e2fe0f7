//! Criterion benchmarks for the transit core.
//!
//! Benchmarks:
//!   - advance_busy_corridor: one 100ms tick with several vehicles in flight
//!   - board_full_queue:      a single boarding pass against a long queue
//!
//! Run with: cargo bench -p transit --bench transit_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use transit::citizen::CitizenRoster;
use transit::config::TransitConfig;
use transit::transit::{
    board, EconomyBridge, StepOutcome, StopId, StopRegistry, TransitService, Vehicle,
};

/// Economy sink that only keeps running totals.
#[derive(Default)]
struct Totals {
    revenue: f64,
    departed: u32,
}

impl EconomyBridge for Totals {
    fn credit(&mut self, amount: f64) {
        self.revenue += amount;
    }

    fn notify(&mut self, _message: String) {}

    fn remove_population(&mut self, count: u32) {
        self.departed += count;
    }
}

fn build_corridor(stop_count: usize, riders_per_stop: usize) -> (StopRegistry, CitizenRoster) {
    let mut stops = StopRegistry::default();
    let mut roster = CitizenRoster::default();
    let spacing = 4000.0 / stop_count as f32;
    for i in 0..stop_count {
        let position = i as f32 * spacing;
        let Some(stop) = stops.add_stop(position, format!("Stop {i}")) else {
            continue;
        };
        queue(&mut stops, &mut roster, stop, position, riders_per_stop);
    }
    (stops, roster)
}

fn queue(
    stops: &mut StopRegistry,
    roster: &mut CitizenRoster,
    stop: StopId,
    position: f32,
    count: usize,
) {
    for _ in 0..count {
        let id = roster.admit(position);
        if stops.enqueue_waiting(stop, id) {
            roster.send_to_stop(id, stop);
        }
    }
}

// ---------------------------------------------------------------------------
// Benchmark: TransitService::advance
// ---------------------------------------------------------------------------

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("transit_advance");

    for &stop_count in &[4usize, 16, 64] {
        let (stops, roster) = build_corridor(stop_count, 200);
        let config = TransitConfig {
            spawn_interval_minutes: 5.0,
            ..Default::default()
        };

        // Warm up so several vehicles are already on the corridor.
        let mut service = TransitService::new(config);
        let mut warm_stops = stops.clone();
        let mut warm_roster = roster.clone();
        let mut totals = Totals::default();
        for _ in 0..300 {
            service.advance(0.1, &mut warm_stops, &mut warm_roster, &mut totals);
        }

        group.bench_with_input(
            BenchmarkId::new("busy_corridor", stop_count),
            &stop_count,
            |b, _| {
                b.iter(|| {
                    let tick =
                        service.advance(black_box(0.1), &mut warm_stops, &mut warm_roster, &mut totals);
                    black_box(tick)
                });
            },
        );
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: a single boarding pass
// ---------------------------------------------------------------------------

fn bench_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("transit_board");
    let config = TransitConfig::default();

    for &waiting in &[100usize, 1000, 10_000] {
        let (stops, roster) = build_corridor(2, waiting);
        let mut docked = match Vehicle::spawn(0, stops.route_snapshot(), &config) {
            Some(v) => v,
            None => continue,
        };
        while !matches!(docked.step(0.1, &config), StepOutcome::Docked(_)) {}

        group.bench_with_input(BenchmarkId::new("queue", waiting), &waiting, |b, _| {
            b.iter_batched(
                || (docked.clone(), stops.clone(), roster.clone()),
                |(mut vehicle, mut stops, mut roster)| {
                    let mut totals = Totals::default();
                    black_box(board(
                        &mut vehicle,
                        &mut stops,
                        &mut roster,
                        &mut totals,
                        config.fare_per_rider,
                    ))
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance, bench_board);
criterion_main!(benches);
