//! Schedule input and output containers.

use super::{GeneratedRound, PlayerId};
use crate::constants::PLAYERS_PER_COURT;
use crate::pause::effective_courts;

/// Input to schedule generation.
///
/// The roster order matters: with randomization off, it is the final
/// tie-break for pauses, partner choice and opponent choice.
///
/// # Examples
///
/// ```
/// use u_americano::models::ScheduleConfig;
///
/// let config = ScheduleConfig::new(["A", "B", "C", "D", "E"], 2, 6);
/// assert_eq!(config.effective_courts(), 1);
/// assert_eq!(config.active_players(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScheduleConfig {
    /// Roster.
    pub player_ids: Vec<PlayerId>,
    /// Requested number of courts.
    pub courts: usize,
    /// Number of rounds to generate.
    pub total_rounds: u32,
}

impl ScheduleConfig {
    /// Creates a config from anything that yields player ids.
    pub fn new<I, S>(player_ids: I, courts: usize, total_rounds: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PlayerId>,
    {
        Self {
            player_ids: player_ids.into_iter().map(Into::into).collect(),
            courts,
            total_rounds,
        }
    }

    /// Courts that can actually be filled with four players each.
    pub fn effective_courts(&self) -> usize {
        effective_courts(self.player_ids.len(), self.courts)
    }

    /// Players on court in every round.
    pub fn active_players(&self) -> usize {
        self.effective_courts() * PLAYERS_PER_COURT
    }

    /// Players sitting out in every round.
    pub fn paused_per_round(&self) -> usize {
        self.player_ids.len() - self.active_players()
    }
}

/// How a schedule was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GenerationMethod {
    /// Single deterministic greedy pass.
    Greedy,
    /// Best of several randomized passes.
    #[cfg_attr(feature = "serde", serde(rename = "montecarlo"))]
    MonteCarlo,
}

/// Telemetry describing how a schedule was generated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GenerationInfo {
    pub method: GenerationMethod,
    /// Candidate schedules evaluated (1 for greedy).
    pub iterations: usize,
    /// Whether randomized candidates used the backtracking matcher.
    pub use_optimal: bool,
    /// Why backtracking was skipped, if it was.
    pub optimal_disabled_reason: Option<String>,
    /// Rounds where the backtracking budget ran out.
    pub budget_exhausted_count: usize,
    /// Backtracking nodes explored across all candidates.
    pub total_backtrack_calls: usize,
    /// Wall-clock time of the whole generation call.
    pub elapsed_ms: u64,
}

/// A full generated schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GeneratedSchedule {
    pub rounds: Vec<GeneratedRound>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub info: Option<GenerationInfo>,
}

impl GeneratedSchedule {
    /// Wraps rounds without telemetry.
    pub fn new(rounds: Vec<GeneratedRound>) -> Self {
        Self { rounds, info: None }
    }

    /// Attaches telemetry.
    pub fn with_info(mut self, info: GenerationInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Number of rounds.
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Total matches across all rounds.
    pub fn match_count(&self) -> usize {
        self.rounds.iter().map(|r| r.matches.len()).sum()
    }
}
