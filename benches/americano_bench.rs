//! Criterion benchmarks for schedule generation.
//!
//! Roster sizes span the range a club evening sees, from one court up to
//! the 20-player limit.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_americano::generator::generate_schedule;
use u_americano::history::MatchHistory;
use u_americano::metrics::FairnessMetrics;
use u_americano::models::{PlayerId, ScheduleConfig};
use u_americano::montecarlo::{MonteCarloConfig, MonteCarloRunner};
use u_americano::pairing::form_partner_pairs_optimal;
use u_americano::random::create_rng;

fn roster(n: usize) -> Vec<PlayerId> {
    (1..=n).map(|i| format!("P{i}")).collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_schedule");

    for (players, courts, rounds) in [(8usize, 2usize, 7u32), (13, 3, 12), (20, 5, 19)] {
        let config = ScheduleConfig::new(roster(players), courts, rounds);
        group.bench_with_input(
            BenchmarkId::new(format!("p{}_c{}_r{}", players, courts, rounds), players),
            &config,
            |b, config| b.iter(|| black_box(generate_schedule(black_box(config)))),
        );
    }
    group.finish();
}

fn bench_optimal_pairing(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimal_pairing");

    for players in [8usize, 12] {
        let config = ScheduleConfig::new(roster(players), players / 4, players as u32);
        let schedule = generate_schedule(&config);
        let history = MatchHistory::from_rounds(&config.player_ids, &schedule.rounds);
        group.bench_with_input(
            BenchmarkId::from_parameter(players),
            &(config.player_ids, history),
            |b, (ids, history)| {
                b.iter(|| {
                    let result = form_partner_pairs_optimal(
                        black_box(ids),
                        black_box(history),
                        true,
                        50_000,
                        &mut create_rng(42),
                    );
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    group.sample_size(10);

    for (players, courts, rounds) in [(10usize, 2usize, 10u32), (16, 4, 15)] {
        let config = ScheduleConfig::new(roster(players), courts, rounds);
        let mc = MonteCarloConfig::default().with_iterations(50).with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("p{}_c{}_r{}", players, courts, rounds), players),
            &(config, mc),
            |b, (config, mc)| {
                b.iter(|| {
                    let result = MonteCarloRunner::run(black_box(config), black_box(mc));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let config = ScheduleConfig::new(roster(20), 5, 30);
    let schedule = generate_schedule(&config);
    c.bench_function("fairness_metrics_p20_r30", |b| {
        b.iter(|| black_box(FairnessMetrics::calculate(black_box(&schedule.rounds), &config.player_ids)))
    });
}

criterion_group!(
    benches,
    bench_greedy,
    bench_optimal_pairing,
    bench_monte_carlo,
    bench_metrics
);
criterion_main!(benches);
