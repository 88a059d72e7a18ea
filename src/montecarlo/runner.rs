//! Monte Carlo search loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::MonteCarloConfig;
use super::types::{MonteCarloExtension, MonteCarloResult};
use crate::constants::{OPTIMAL_ACTIVE_PLAYERS_THRESHOLD, PLAYERS_PER_COURT};
use crate::generator::{GenerationOptions, GenerationStats, ScheduleGenerator};
use crate::models::{
    GeneratedRound, GeneratedSchedule, GenerationInfo, GenerationMethod, PlayerId, ScheduleConfig,
};
use crate::pause::effective_courts;
use crate::random::{create_rng, master_seed, shuffled, stream_seed, Stopwatch};
use crate::scoring::{extension_cost, total_schedule_cost};

/// One evaluated candidate.
struct Candidate {
    rounds: Vec<GeneratedRound>,
    cost: u32,
    stats: GenerationStats,
}

/// Why a randomized iteration was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Cancelled,
    TimedOut,
}

struct Outcome {
    best: Candidate,
    best_iteration: usize,
    baseline_cost: u32,
    iterations_run: usize,
    stats: GenerationStats,
    cancelled: bool,
    timed_out: bool,
}

/// Executes the Monte Carlo schedule search.
pub struct MonteCarloRunner;

impl MonteCarloRunner {
    /// Searches for the cheapest full schedule.
    pub fn run(config: &ScheduleConfig, mc: &MonteCarloConfig) -> MonteCarloResult {
        Self::run_with_cancel(config, mc, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// The flag is polled before every randomized iteration. When it is
    /// set, the best schedule found so far is returned with `cancelled`.
    pub fn run_with_cancel(
        config: &ScheduleConfig,
        mc: &MonteCarloConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> MonteCarloResult {
        mc.validate().expect("invalid MonteCarloConfig");

        let watch = Stopwatch::start();
        let (use_optimal, optimal_disabled_reason) =
            optimal_mode(config.player_ids.len(), config.courts);
        let options = randomized_options(use_optimal, mc);

        let outcome = search(
            mc,
            cancel.as_deref(),
            &watch,
            || {
                let (schedule, stats) = ScheduleGenerator::generate(
                    config,
                    &GenerationOptions::greedy(),
                    &mut create_rng(0),
                );
                let cost = total_schedule_cost(&schedule.rounds, &config.player_ids);
                Candidate {
                    rounds: schedule.rounds,
                    cost,
                    stats,
                }
            },
            |rng| {
                let candidate_config = ScheduleConfig::new(
                    shuffled(&config.player_ids, rng),
                    config.courts,
                    config.total_rounds,
                );
                let (schedule, stats) = ScheduleGenerator::generate(&candidate_config, &options, rng);
                let cost = total_schedule_cost(&schedule.rounds, &config.player_ids);
                Candidate {
                    rounds: schedule.rounds,
                    cost,
                    stats,
                }
            },
        );

        let info = generation_info(&outcome, use_optimal, optimal_disabled_reason, &watch);
        log::debug!(
            "monte carlo: best cost {} (baseline {}) at iteration {}/{}, {} ms",
            outcome.best.cost,
            outcome.baseline_cost,
            outcome.best_iteration,
            outcome.iterations_run,
            info.elapsed_ms
        );

        MonteCarloResult {
            schedule: GeneratedSchedule::new(outcome.best.rounds).with_info(info),
            best_cost: outcome.best.cost,
            baseline_cost: outcome.baseline_cost,
            best_iteration: outcome.best_iteration,
            iterations_run: outcome.iterations_run,
            cancelled: outcome.cancelled,
            timed_out: outcome.timed_out,
        }
    }

    /// Searches for the cheapest `count` rounds following `existing`.
    ///
    /// Candidates are ranked by
    /// [`extension_cost`](crate::scoring::extension_cost), so repeats of
    /// pairings from `existing` are charged too.
    pub fn extend(
        player_ids: &[PlayerId],
        courts: usize,
        existing: &[GeneratedRound],
        count: u32,
        mc: &MonteCarloConfig,
    ) -> MonteCarloExtension {
        Self::extend_with_cancel(player_ids, courts, existing, count, mc, None)
    }

    /// [`extend`](Self::extend) with an optional cancellation token.
    pub fn extend_with_cancel(
        player_ids: &[PlayerId],
        courts: usize,
        existing: &[GeneratedRound],
        count: u32,
        mc: &MonteCarloConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> MonteCarloExtension {
        mc.validate().expect("invalid MonteCarloConfig");

        let watch = Stopwatch::start();
        let (use_optimal, optimal_disabled_reason) = optimal_mode(player_ids.len(), courts);
        let options = randomized_options(use_optimal, mc);

        let outcome = search(
            mc,
            cancel.as_deref(),
            &watch,
            || {
                let (rounds, stats) = ScheduleGenerator::extend(
                    player_ids,
                    courts,
                    existing,
                    count,
                    &GenerationOptions::greedy(),
                    &mut create_rng(0),
                );
                let cost = extension_cost(&rounds, player_ids, existing);
                Candidate { rounds, cost, stats }
            },
            |rng| {
                let roster = shuffled(player_ids, rng);
                let (rounds, stats) =
                    ScheduleGenerator::extend(&roster, courts, existing, count, &options, rng);
                let cost = extension_cost(&rounds, player_ids, existing);
                Candidate { rounds, cost, stats }
            },
        );

        let info = generation_info(&outcome, use_optimal, optimal_disabled_reason, &watch);
        log::debug!(
            "monte carlo extension: {} rounds after {}, best cost {} (baseline {}) at iteration {}/{}, {} ms",
            count,
            existing.len(),
            outcome.best.cost,
            outcome.baseline_cost,
            outcome.best_iteration,
            outcome.iterations_run,
            info.elapsed_ms
        );

        MonteCarloExtension {
            rounds: outcome.best.rounds,
            info,
            best_cost: outcome.best.cost,
            baseline_cost: outcome.baseline_cost,
            best_iteration: outcome.best_iteration,
            iterations_run: outcome.iterations_run,
            cancelled: outcome.cancelled,
            timed_out: outcome.timed_out,
        }
    }
}

/// Best of `iterations` full schedules, with default search settings.
///
/// `iterations` below 1 still evaluates the greedy baseline.
pub fn generate_schedule_monte_carlo(config: &ScheduleConfig, iterations: usize) -> GeneratedSchedule {
    let mc = MonteCarloConfig::default().with_iterations(iterations.max(1));
    MonteCarloRunner::run(config, &mc).schedule
}

/// Best of `iterations` extensions of `existing` by `count` rounds.
pub fn generate_additional_rounds_monte_carlo(
    player_ids: &[PlayerId],
    courts: usize,
    existing: &[GeneratedRound],
    count: u32,
    iterations: usize,
) -> MonteCarloExtension {
    let mc = MonteCarloConfig::default().with_iterations(iterations.max(1));
    MonteCarloRunner::extend(player_ids, courts, existing, count, &mc)
}

/// Whether backtracking matching is used, and the reason when it is not.
fn optimal_mode(roster_size: usize, courts: usize) -> (bool, Option<String>) {
    let active = effective_courts(roster_size, courts) * PLAYERS_PER_COURT;
    if active <= OPTIMAL_ACTIVE_PLAYERS_THRESHOLD {
        (true, None)
    } else {
        (
            false,
            Some(format!(
                "{active} active players > {OPTIMAL_ACTIVE_PLAYERS_THRESHOLD} threshold"
            )),
        )
    }
}

fn randomized_options(use_optimal: bool, mc: &MonteCarloConfig) -> GenerationOptions {
    GenerationOptions::default()
        .with_randomize(true)
        .with_optimal(use_optimal)
        .with_backtrack_budget(mc.backtrack_budget)
}

fn generation_info(
    outcome: &Outcome,
    use_optimal: bool,
    optimal_disabled_reason: Option<String>,
    watch: &Stopwatch,
) -> GenerationInfo {
    GenerationInfo {
        method: GenerationMethod::MonteCarlo,
        iterations: outcome.iterations_run,
        use_optimal,
        optimal_disabled_reason,
        budget_exhausted_count: outcome.stats.budget_exhausted_count,
        total_backtrack_calls: outcome.stats.total_backtrack_calls,
        elapsed_ms: watch.elapsed_ms(),
    }
}

/// Baseline first, then randomized candidates `1..mc.iterations`.
///
/// Iteration `i` draws from `stream_seed(master, i)`, so the result does
/// not depend on evaluation order. Only the running best is kept.
fn search<B, C>(
    mc: &MonteCarloConfig,
    cancel: Option<&AtomicBool>,
    watch: &Stopwatch,
    baseline: B,
    candidate: C,
) -> Outcome
where
    B: FnOnce() -> Candidate,
    C: Fn(&mut StdRng) -> Candidate + Sync,
{
    let base = baseline();
    let baseline_cost = base.cost;
    let master = master_seed(mc.seed);

    let should_stop = || {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            Some(Stop::Cancelled)
        } else if mc
            .time_limit_ms
            .is_some_and(|limit| watch.elapsed_ms() >= limit)
        {
            Some(Stop::TimedOut)
        } else {
            None
        }
    };
    let evaluate = |i: usize| candidate(&mut create_rng(stream_seed(master, i as u64)));

    let (tally, stop) = evaluate_all(mc.iterations, mc.parallel, &should_stop, &evaluate);

    let mut stats = base.stats;
    stats += tally.stats;
    let (best, best_iteration) = match tally.best {
        Some((i, c)) if c.cost < base.cost => (c, i),
        _ => (base, 0),
    };

    Outcome {
        best,
        best_iteration,
        baseline_cost,
        iterations_run: 1 + tally.evaluated,
        stats,
        cancelled: stop == Some(Stop::Cancelled),
        timed_out: stop == Some(Stop::TimedOut),
    }
}

/// Cheapest candidate of a run of iterations, plus counters.
#[derive(Default)]
struct Tally {
    best: Option<(usize, Candidate)>,
    stats: GenerationStats,
    evaluated: usize,
}

impl Tally {
    fn record(&mut self, iteration: usize, c: Candidate) {
        self.evaluated += 1;
        self.stats += c.stats;
        self.keep((iteration, c));
    }

    /// Keeps the lower `(cost, iteration)`.
    fn keep(&mut self, (iteration, c): (usize, Candidate)) {
        let better = match &self.best {
            Some((i, b)) => (c.cost, iteration) < (b.cost, *i),
            None => true,
        };
        if better {
            log::trace!("monte carlo: iteration {} reached cost {}", iteration, c.cost);
            self.best = Some((iteration, c));
        }
    }

    #[cfg(feature = "parallel")]
    fn merge(mut self, other: Self) -> Self {
        self.evaluated += other.evaluated;
        self.stats += other.stats;
        if let Some(entry) = other.best {
            self.keep(entry);
        }
        self
    }
}

/// Evaluates iterations `1..iterations` until the stop condition holds.
///
/// Sequentially, the condition is checked before every iteration. In
/// parallel, each task checks it before it starts and the first stop
/// halts the remaining tasks.
fn evaluate_all<S, E>(
    iterations: usize,
    parallel: bool,
    should_stop: &S,
    evaluate: &E,
) -> (Tally, Option<Stop>)
where
    S: Fn() -> Option<Stop> + Sync,
    E: Fn(usize) -> Candidate + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            let reason = std::sync::OnceLock::new();
            let tally = (1..iterations)
                .into_par_iter()
                .map(|i| match should_stop() {
                    Some(stop) => {
                        let _ = reason.set(stop);
                        None
                    }
                    None => {
                        let mut one = Tally::default();
                        one.record(i, evaluate(i));
                        Some(one)
                    }
                })
                .while_some()
                .reduce(Tally::default, Tally::merge);
            return (tally, reason.into_inner());
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    let mut tally = Tally::default();
    for i in 1..iterations {
        if let Some(stop) = should_stop() {
            return (tally, Some(stop));
        }
        tally.record(i, evaluate(i));
    }
    (tally, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_additional_rounds, generate_schedule};
    use std::collections::HashSet;

    fn roster(n: usize) -> Vec<PlayerId> {
        (1..=n).map(|i| format!("P{i}")).collect()
    }

    fn assert_valid(rounds: &[GeneratedRound], player_ids: &[PlayerId]) {
        for round in rounds {
            let seen: HashSet<&PlayerId> = round
                .active_player_ids()
                .chain(round.paused_player_ids.iter())
                .collect();
            assert_eq!(seen.len(), player_ids.len());
            assert_eq!(round.paused_player_ids.len() + 4 * round.matches.len(), player_ids.len());
        }
    }

    #[test]
    fn test_single_iteration_is_greedy_baseline() {
        let config = ScheduleConfig::new(roster(9), 2, 6);
        let result = MonteCarloRunner::run(&config, &MonteCarloConfig::default().with_iterations(1));
        assert_eq!(result.schedule.rounds, generate_schedule(&config).rounds);
        assert_eq!(result.best_iteration, 0);
        assert_eq!(result.iterations_run, 1);
        assert_eq!(result.best_cost, result.baseline_cost);
    }

    #[test]
    fn test_never_worse_than_baseline() {
        let config = ScheduleConfig::new(roster(8), 2, 10);
        let mc = MonteCarloConfig::default().with_iterations(60).with_seed(5);
        let result = MonteCarloRunner::run(&config, &mc);

        assert_eq!(result.iterations_run, 60);
        assert!(result.best_cost <= result.baseline_cost);
        assert_eq!(
            result.baseline_cost,
            total_schedule_cost(&generate_schedule(&config).rounds, &config.player_ids)
        );
        assert_eq!(
            result.best_cost,
            total_schedule_cost(&result.schedule.rounds, &config.player_ids)
        );
        assert_valid(&result.schedule.rounds, &config.player_ids);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let config = ScheduleConfig::new(roster(11), 2, 7);
        let mc = MonteCarloConfig::default().with_iterations(30).with_seed(99);
        let a = MonteCarloRunner::run(&config, &mc);
        let b = MonteCarloRunner::run(&config, &mc);
        assert_eq!(a.schedule.rounds, b.schedule.rounds);
        assert_eq!(a.best_cost, b.best_cost);
        assert_eq!(a.best_iteration, b.best_iteration);
    }

    #[test]
    fn test_info_with_optimal() {
        let config = ScheduleConfig::new(roster(13), 4, 5);
        let mc = MonteCarloConfig::default().with_iterations(10).with_seed(1);
        let result = MonteCarloRunner::run(&config, &mc);
        let info = result.schedule.info.expect("monte carlo info");
        assert_eq!(info.method, GenerationMethod::MonteCarlo);
        assert_eq!(info.iterations, 10);
        // 13 players fill 3 courts: 12 active
        assert!(info.use_optimal);
        assert!(info.optimal_disabled_reason.is_none());
    }

    #[test]
    fn test_info_optimal_disabled_reason() {
        let config = ScheduleConfig::new(roster(16), 4, 3);
        let mc = MonteCarloConfig::default().with_iterations(5).with_seed(1);
        let info = MonteCarloRunner::run(&config, &mc).schedule.info.unwrap();
        assert!(!info.use_optimal);
        assert_eq!(
            info.optimal_disabled_reason.as_deref(),
            Some("16 active players > 12 threshold")
        );
        assert_eq!(info.total_backtrack_calls, 0);
        assert_eq!(info.budget_exhausted_count, 0);
    }

    #[test]
    fn test_cancel_before_start_keeps_baseline() {
        let config = ScheduleConfig::new(roster(8), 2, 5);
        let flag = Arc::new(AtomicBool::new(true));
        let mc = MonteCarloConfig::default().with_iterations(100).with_seed(2);
        let result = MonteCarloRunner::run_with_cancel(&config, &mc, Some(flag));
        assert!(result.cancelled);
        assert!(!result.timed_out);
        assert_eq!(result.iterations_run, 1);
        assert_eq!(result.best_iteration, 0);
        assert_eq!(result.schedule.rounds, generate_schedule(&config).rounds);
    }

    #[test]
    fn test_time_limit_stops_search() {
        let config = ScheduleConfig::new(roster(20), 4, 30);
        let mc = MonteCarloConfig::default()
            .with_iterations(1_000_000)
            .with_seed(2)
            .with_time_limit_ms(1);
        let result = MonteCarloRunner::run(&config, &mc);
        assert!(result.timed_out);
        assert!(!result.cancelled);
        assert!(result.iterations_run < 1_000_000);
        assert_eq!(result.schedule.rounds.len(), 30);
    }

    #[test]
    fn test_unbounded_iterations_end_on_time_limit() {
        let config = ScheduleConfig::new(roster(8), 2, 6);
        let mc = MonteCarloConfig::default()
            .with_iterations(usize::MAX)
            .with_seed(1)
            .with_time_limit_ms(50);
        let result = MonteCarloRunner::run(&config, &mc);
        assert!(result.timed_out);
        assert!(!result.cancelled);
        assert!(result.iterations_run < usize::MAX);
        assert_eq!(result.schedule.rounds.len(), 6);
    }

    #[test]
    #[should_panic(expected = "invalid MonteCarloConfig")]
    fn test_invalid_config_panics() {
        let config = ScheduleConfig::new(roster(8), 2, 5);
        MonteCarloRunner::run(&config, &MonteCarloConfig::default().with_iterations(0));
    }

    #[test]
    fn test_extension_scores_against_existing() {
        let ids = roster(10);
        let existing = generate_additional_rounds(&ids, 2, &[], 4);
        let mc = MonteCarloConfig::default().with_iterations(40).with_seed(8);
        let ext = MonteCarloRunner::extend(&ids, 2, &existing, 5, &mc);

        let numbers: Vec<u32> = ext.rounds.iter().map(|r| r.round_number).collect();
        assert_eq!(numbers, vec![5, 6, 7, 8, 9]);
        assert_eq!(ext.best_cost, extension_cost(&ext.rounds, &ids, &existing));
        assert!(ext.best_cost <= ext.baseline_cost);
        assert_eq!(
            ext.baseline_cost,
            extension_cost(&generate_additional_rounds(&ids, 2, &existing, 5), &ids, &existing)
        );
        assert_eq!(ext.info.method, GenerationMethod::MonteCarlo);
        assert_valid(&ext.rounds, &ids);
    }

    #[test]
    fn test_convenience_functions() {
        let config = ScheduleConfig::new(roster(6), 1, 4);
        let schedule = generate_schedule_monte_carlo(&config, 0);
        assert_eq!(schedule.rounds, generate_schedule(&config).rounds);
        assert_eq!(schedule.info.unwrap().iterations, 1);

        let ext = generate_additional_rounds_monte_carlo(&config.player_ids, 1, &schedule.rounds, 3, 20);
        assert_eq!(ext.rounds.len(), 3);
        assert_eq!(ext.rounds[0].round_number, 5);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let config = ScheduleConfig::new(roster(10), 2, 8);
        let mc = MonteCarloConfig::default().with_iterations(40).with_seed(17);
        let seq = MonteCarloRunner::run(&config, &mc);
        let par = MonteCarloRunner::run(&config, &mc.clone().with_parallel(true));
        assert_eq!(seq.schedule.rounds, par.schedule.rounds);
        assert_eq!(seq.best_cost, par.best_cost);
        assert_eq!(seq.best_iteration, par.best_iteration);
        assert_eq!(seq.iterations_run, par.iterations_run);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_unbounded_iterations_end_on_time_limit() {
        let config = ScheduleConfig::new(roster(8), 2, 6);
        let mc = MonteCarloConfig::default()
            .with_iterations(usize::MAX)
            .with_seed(1)
            .with_time_limit_ms(50)
            .with_parallel(true);
        let result = MonteCarloRunner::run(&config, &mc);
        assert!(result.timed_out);
        assert!(result.best_cost <= result.baseline_cost);
        assert_eq!(result.schedule.rounds.len(), 6);
    }
}
