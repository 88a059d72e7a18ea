//! Fairness-violation cost.
//!
//! A round costs [`PARTNER_REPEAT_PENALTY`] for every prior partnership it
//! repeats and [`OPPONENT_REPEAT_PENALTY`] for every prior opponent
//! encounter it repeats, always measured against the history *before* the
//! round. Lower is better; a schedule with no repeats costs 0.

use crate::constants::{OPPONENT_REPEAT_PENALTY, PARTNER_REPEAT_PENALTY};
use crate::history::MatchHistory;
use crate::models::{GeneratedRound, MatchAssignment, PlayerId};

/// Cost of one round's matches against the prior history.
pub fn score_arrangement(matches: &[MatchAssignment], history: &MatchHistory) -> u32 {
    matches
        .iter()
        .map(|m| {
            PARTNER_REPEAT_PENALTY * history.team_partner_count(&m.team1)
                + PARTNER_REPEAT_PENALTY * history.team_partner_count(&m.team2)
                + OPPONENT_REPEAT_PENALTY * history.cross_opponent_count(&m.team1, &m.team2)
        })
        .sum()
}

/// Cost of a whole schedule, replayed from an empty history.
pub fn total_schedule_cost(rounds: &[GeneratedRound], player_ids: &[PlayerId]) -> u32 {
    replay_cost(rounds, MatchHistory::new(player_ids))
}

/// Cost of `new_rounds` only, with history primed from `existing_rounds`.
///
/// Repeats between an existing round and a new one are charged; repeats
/// among existing rounds are not.
pub fn extension_cost(
    new_rounds: &[GeneratedRound],
    player_ids: &[PlayerId],
    existing_rounds: &[GeneratedRound],
) -> u32 {
    replay_cost(new_rounds, MatchHistory::from_rounds(player_ids, existing_rounds))
}

fn replay_cost(rounds: &[GeneratedRound], mut history: MatchHistory) -> u32 {
    let mut cost = 0;
    for round in rounds {
        cost += score_arrangement(&round.matches, &history);
        history = history.update(&round.matches);
    }
    cost
}
