//! Partner matching.
//!
//! Splits the active players of a round into partner pairs while avoiding
//! partnerships that already happened.
//!
//! # Strategies
//!
//! - [`form_partner_pairs`]: greedy, O(k²) for k players. Each unpaired
//!   player in turn takes the candidate they have partnered least.
//! - [`form_partner_pairs_optimal`]: depth-first branch and bound over all
//!   perfect matchings, capped by a node budget. Exact whenever the budget
//!   is not exhausted.
//!
//! Choosing between them is the caller's job; the number of matchings
//! grows as (k-1)!!, so the exact search is only practical for small k
//! (see [`OPTIMAL_ACTIVE_PLAYERS_THRESHOLD`](crate::constants::OPTIMAL_ACTIVE_PLAYERS_THRESHOLD)).

mod greedy;
mod optimal;

pub use greedy::form_partner_pairs;
pub use optimal::{form_partner_pairs_optimal, OptimalPairing};

use crate::constants::PARTNER_REPEAT_PENALTY;
use crate::history::MatchHistory;
use crate::models::{PlayerId, Team};

/// Repeat-partnership cost of a set of pairs.
pub fn pairing_cost(pairs: &[Team], history: &MatchHistory) -> u32 {
    pairs
        .iter()
        .map(|p| PARTNER_REPEAT_PENALTY * history.team_partner_count(p))
        .sum()
}

/// Pairwise partner-repeat costs for `players`, indexed by position.
fn cost_matrix(players: &[&PlayerId], history: &MatchHistory) -> Vec<Vec<u32>> {
    players
        .iter()
        .map(|a| {
            players
                .iter()
                .map(|b| PARTNER_REPEAT_PENALTY * history.partner_count(a, b))
                .collect()
        })
        .collect()
}

fn assert_even(n: usize) {
    assert!(
        n % 2 == 0,
        "partner matching needs an even number of active players, got {n}"
    );
}
