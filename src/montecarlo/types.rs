//! Monte Carlo results.

use crate::models::{GeneratedRound, GeneratedSchedule, GenerationInfo};

/// Result of a Monte Carlo schedule search.
#[derive(Debug, Clone)]
pub struct MonteCarloResult {
    /// Best schedule found, with [`GenerationInfo`] attached.
    pub schedule: GeneratedSchedule,

    /// Cost of `schedule`.
    pub best_cost: u32,

    /// Cost of the deterministic greedy baseline (iteration 0).
    pub baseline_cost: u32,

    /// Iteration that produced `schedule`; 0 means the baseline won.
    pub best_iteration: usize,

    /// Candidates actually evaluated, baseline included.
    pub iterations_run: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Whether the time limit stopped the search.
    pub timed_out: bool,
}

/// Result of a Monte Carlo extension of an existing schedule.
#[derive(Debug, Clone)]
pub struct MonteCarloExtension {
    /// New rounds only, numbered after the existing ones.
    pub rounds: Vec<GeneratedRound>,

    pub info: GenerationInfo,

    /// Extension cost of `rounds` against the existing rounds.
    pub best_cost: u32,

    pub baseline_cost: u32,

    pub best_iteration: usize,

    pub iterations_run: usize,

    pub cancelled: bool,

    pub timed_out: bool,
}
