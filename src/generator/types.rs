//! State threaded between rounds and the statistics collected along the way.

use std::ops::AddAssign;

use crate::history::MatchHistory;
use crate::models::{GeneratedRound, PlayerId};
use crate::pause::PauseState;

/// Backtracking counters from one or more generation passes.
///
/// Each pass returns its own value; callers sum them with `+=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Search nodes expanded by the backtracking matcher.
    pub total_backtrack_calls: usize,
    /// Rounds where the backtracking budget ran out.
    pub budget_exhausted_count: usize,
}

impl AddAssign for GenerationStats {
    fn add_assign(&mut self, other: Self) {
        self.total_backtrack_calls += other.total_backtrack_calls;
        self.budget_exhausted_count += other.budget_exhausted_count;
    }
}

/// Pause counters and match history as of some round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationState {
    pub pause: PauseState,
    pub history: MatchHistory,
    /// Number the next generated round will get.
    pub next_round: u32,
}

impl RotationState {
    /// State before round 1.
    pub fn new(player_ids: &[PlayerId]) -> Self {
        Self {
            pause: PauseState::new(player_ids),
            history: MatchHistory::new(player_ids),
            next_round: 1,
        }
    }

    /// Rebuilds the state after `rounds` without regenerating them.
    pub fn replay(player_ids: &[PlayerId], rounds: &[GeneratedRound]) -> Self {
        rounds
            .iter()
            .fold(Self::new(player_ids), |state, round| state.advance(player_ids, round))
    }

    /// Returns the state after `round` has been played.
    ///
    /// Players of `player_ids` not listed as paused count as active.
    pub fn advance(&self, player_ids: &[PlayerId], round: &GeneratedRound) -> Self {
        let active: Vec<PlayerId> = player_ids
            .iter()
            .filter(|id| !round.is_paused(id.as_str()))
            .cloned()
            .collect();
        Self {
            pause: self
                .pause
                .update(&round.paused_player_ids, &active, round.round_number),
            history: self.history.update(&round.matches),
            next_round: round.round_number + 1,
        }
    }
}
