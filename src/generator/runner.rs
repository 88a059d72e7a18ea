//! Generation loop.

use rand::Rng;

use super::config::GenerationOptions;
use super::types::{GenerationStats, RotationState};
use crate::constants::{
    OPEN_ENDED_BATCH_SIZE, OPEN_ENDED_EXTEND_THRESHOLD, OPTIMAL_ACTIVE_PLAYERS_THRESHOLD,
    PLAYERS_PER_COURT,
};
use crate::models::{
    GeneratedRound, GeneratedSchedule, GenerationInfo, GenerationMethod, PlayerId, ScheduleConfig,
};
use crate::opponents::assign_opponents;
use crate::pairing::{form_partner_pairs, form_partner_pairs_optimal};
use crate::pause::{effective_courts, select_paused_players};
use crate::random::{create_rng, Stopwatch};

/// Runs generation passes.
///
/// # Usage
///
/// ```
/// use u_americano::generator::{GenerationOptions, ScheduleGenerator};
/// use u_americano::models::ScheduleConfig;
/// use u_americano::random::create_rng;
///
/// let config = ScheduleConfig::new(["A", "B", "C", "D", "E"], 1, 5);
/// let (schedule, stats) =
///     ScheduleGenerator::generate(&config, &GenerationOptions::greedy(), &mut create_rng(0));
/// assert_eq!(schedule.rounds.len(), 5);
/// assert_eq!(stats.total_backtrack_calls, 0);
/// ```
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// Generates `config.total_rounds` rounds from scratch.
    pub fn generate<R: Rng + ?Sized>(
        config: &ScheduleConfig,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> (GeneratedSchedule, GenerationStats) {
        let (rounds, stats) = Self::generate_rounds(
            &config.player_ids,
            config.effective_courts(),
            RotationState::new(&config.player_ids),
            config.total_rounds,
            options,
            rng,
        );
        (GeneratedSchedule::new(rounds), stats)
    }

    /// Generates `count` rounds following `existing`.
    ///
    /// `existing` is replayed, not regenerated, to rebuild pause counters
    /// and history. New rounds are numbered after the last existing round.
    pub fn extend<R: Rng + ?Sized>(
        player_ids: &[PlayerId],
        courts: usize,
        existing: &[GeneratedRound],
        count: u32,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> (Vec<GeneratedRound>, GenerationStats) {
        Self::generate_rounds(
            player_ids,
            effective_courts(player_ids.len(), courts),
            RotationState::replay(player_ids, existing),
            count,
            options,
            rng,
        )
    }

    fn generate_rounds<R: Rng + ?Sized>(
        player_ids: &[PlayerId],
        courts: usize,
        mut state: RotationState,
        count: u32,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> (Vec<GeneratedRound>, GenerationStats) {
        let mut stats = GenerationStats::default();
        let mut rounds = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let (round, round_stats) = Self::play_round(player_ids, courts, &state, options, rng);
            stats += round_stats;
            state = state.advance(player_ids, &round);
            rounds.push(round);
        }

        (rounds, stats)
    }

    /// Pauses, pairs and matches up one round.
    fn play_round<R: Rng + ?Sized>(
        player_ids: &[PlayerId],
        courts: usize,
        state: &RotationState,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> (GeneratedRound, GenerationStats) {
        let round_number = state.next_round;
        let paused = select_paused_players(
            player_ids,
            courts,
            round_number,
            &state.pause,
            options.randomize,
            rng,
        );
        let active: Vec<PlayerId> = player_ids
            .iter()
            .filter(|id| !paused.contains(id))
            .cloned()
            .collect();

        let mut stats = GenerationStats::default();
        let pairs = if options.use_optimal && active.len() <= OPTIMAL_ACTIVE_PLAYERS_THRESHOLD {
            let result = form_partner_pairs_optimal(
                &active,
                &state.history,
                options.randomize,
                options.backtrack_budget,
                rng,
            );
            stats.total_backtrack_calls += result.iterations;
            if result.exhausted {
                stats.budget_exhausted_count += 1;
            }
            result.pairs
        } else {
            form_partner_pairs(&active, &state.history, options.randomize, rng)
        };
        let matches = assign_opponents(&pairs, &state.history, options.randomize, rng);

        debug_assert_eq!(paused.len() + PLAYERS_PER_COURT * matches.len(), player_ids.len());

        (
            GeneratedRound {
                round_number,
                matches,
                paused_player_ids: paused,
            },
            stats,
        )
    }
}

/// Deterministic greedy schedule with greedy telemetry attached.
///
/// # Examples
///
/// ```
/// use u_americano::generator::generate_schedule;
/// use u_americano::models::{GenerationMethod, ScheduleConfig};
///
/// let ids: Vec<String> = (1..=8).map(|i| format!("P{i}")).collect();
/// let schedule = generate_schedule(&ScheduleConfig::new(ids, 2, 7));
/// assert_eq!(schedule.rounds.len(), 7);
/// assert_eq!(schedule.info.unwrap().method, GenerationMethod::Greedy);
/// ```
pub fn generate_schedule(config: &ScheduleConfig) -> GeneratedSchedule {
    let watch = Stopwatch::start();
    // never drawn from: greedy options do not randomize
    let mut rng = create_rng(0);
    let (schedule, _) = ScheduleGenerator::generate(config, &GenerationOptions::greedy(), &mut rng);
    schedule.with_info(GenerationInfo {
        method: GenerationMethod::Greedy,
        iterations: 1,
        use_optimal: false,
        optimal_disabled_reason: None,
        budget_exhausted_count: 0,
        total_backtrack_calls: 0,
        elapsed_ms: watch.elapsed_ms(),
    })
}

/// Deterministic greedy extension of `existing` by `count` rounds.
pub fn generate_additional_rounds(
    player_ids: &[PlayerId],
    courts: usize,
    existing: &[GeneratedRound],
    count: u32,
) -> Vec<GeneratedRound> {
    let mut rng = create_rng(0);
    ScheduleGenerator::extend(
        player_ids,
        courts,
        existing,
        count,
        &GenerationOptions::greedy(),
        &mut rng,
    )
    .0
}

/// Whether an open-ended tournament at `current_round` should generate
/// another batch, given `generated_rounds` rounds exist.
pub fn needs_extension(current_round: u32, generated_rounds: u32) -> bool {
    generated_rounds.saturating_sub(current_round) < OPEN_ENDED_EXTEND_THRESHOLD
}

/// Next batch of an open-ended tournament, or nothing while enough rounds
/// remain ahead of `current_round`.
///
/// A batch is [`OPEN_ENDED_BATCH_SIZE`] greedy rounds continuing
/// `existing`.
///
/// # Examples
///
/// ```
/// use u_americano::generator::extend_open_ended;
///
/// let ids: Vec<String> = (1..=8).map(|i| format!("P{i}")).collect();
/// let first = extend_open_ended(&ids, 2, &[], 1);
/// assert_eq!(first.len(), 30);
/// assert!(extend_open_ended(&ids, 2, &first, 10).is_empty());
/// ```
pub fn extend_open_ended(
    player_ids: &[PlayerId],
    courts: usize,
    existing: &[GeneratedRound],
    current_round: u32,
) -> Vec<GeneratedRound> {
    let generated = existing.last().map_or(0, |r| r.round_number);
    if !needs_extension(current_round, generated) {
        return Vec::new();
    }
    log::debug!("open-ended: round {current_round} of {generated}, adding {OPEN_ENDED_BATCH_SIZE}");
    generate_additional_rounds(player_ids, courts, existing, OPEN_ENDED_BATCH_SIZE)
}
