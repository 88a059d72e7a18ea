//! Pause rotation.
//!
//! When the roster does not fill every court, some players sit out each
//! round. Players who have paused least so far pause next, which evens out
//! pause totals over the tournament; among those, whoever paused longest
//! ago (or never) goes first.
//!
//! Selection is deterministic unless randomization is requested, in which
//! case only the final roster-order tie-break becomes random.

use std::collections::HashMap;

use rand::Rng;

use crate::constants::PLAYERS_PER_COURT;
use crate::models::PlayerId;
use crate::random::shuffled;

/// Courts that can be filled: `min(requested, floor(roster / 4))`.
pub fn effective_courts(roster_size: usize, requested_courts: usize) -> usize {
    requested_courts.min(roster_size / PLAYERS_PER_COURT)
}

/// One player's participation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PauseRecord {
    /// Rounds sat out so far.
    pub pause_count: u32,
    /// Rounds played so far.
    pub games_played: u32,
    /// Most recent round sat out; 0 if never.
    pub last_paused_round: u32,
}

/// Participation counters for a whole roster.
///
/// Invariant: for every player, `pause_count + games_played` equals the
/// number of rounds processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PauseState {
    records: HashMap<PlayerId, PauseRecord>,
}

impl PauseState {
    /// Zeroed counters for every player.
    pub fn new(player_ids: &[PlayerId]) -> Self {
        Self {
            records: player_ids
                .iter()
                .map(|id| (id.clone(), PauseRecord::default()))
                .collect(),
        }
    }

    /// Counters for `id`; zeroed if the player is unknown.
    pub fn record(&self, id: &str) -> PauseRecord {
        self.records.get(id).copied().unwrap_or_default()
    }

    pub fn pause_count(&self, id: &str) -> u32 {
        self.record(id).pause_count
    }

    pub fn games_played(&self, id: &str) -> u32 {
        self.record(id).games_played
    }

    pub fn last_paused_round(&self, id: &str) -> u32 {
        self.record(id).last_paused_round
    }

    /// Returns a new state with one more round applied.
    ///
    /// Paused players gain a pause and remember `round_number`; active
    /// players gain a game.
    pub fn update(&self, paused: &[PlayerId], active: &[PlayerId], round_number: u32) -> Self {
        let mut next = self.clone();
        for id in paused {
            let r = next.records.entry(id.clone()).or_default();
            r.pause_count += 1;
            r.last_paused_round = round_number;
        }
        for id in active {
            next.records.entry(id.clone()).or_default().games_played += 1;
        }
        next
    }
}

/// Selects who sits out `round_number`.
///
/// Pauses exactly `roster.len() - 4 * effective_courts` players, ranked by
/// ascending pause count, then ascending last-paused round, then roster
/// order (random order when `randomize` is set). The result is returned in
/// roster order.
///
/// # Examples
///
/// ```
/// use u_americano::pause::{select_paused_players, PauseState};
/// use u_americano::random::create_rng;
///
/// let roster: Vec<String> = ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect();
/// let state = PauseState::new(&roster);
/// let paused = select_paused_players(&roster, 1, 1, &state, false, &mut create_rng(0));
/// assert_eq!(paused, vec!["A".to_string()]);
/// ```
pub fn select_paused_players<R: Rng + ?Sized>(
    roster: &[PlayerId],
    effective_courts: usize,
    round_number: u32,
    state: &PauseState,
    randomize: bool,
    rng: &mut R,
) -> Vec<PlayerId> {
    let active_slots = effective_courts * PLAYERS_PER_COURT;
    if roster.len() <= active_slots {
        return Vec::new();
    }
    let to_pause = roster.len() - active_slots;

    let mut order: Vec<usize> = (0..roster.len()).collect();
    if randomize {
        order = shuffled(&order, rng);
    }
    // Stable sort: equal keys keep roster (or shuffled) order.
    order.sort_by_key(|&i| {
        let r = state.record(&roster[i]);
        (r.pause_count, r.last_paused_round)
    });

    let mut chosen: Vec<usize> = order.into_iter().take(to_pause).collect();
    chosen.sort_unstable();
    log::trace!("round {round_number}: pausing {to_pause} of {}", roster.len());
    chosen.into_iter().map(|i| roster[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_effective_courts() {
        assert_eq!(effective_courts(4, 1), 1);
        assert_eq!(effective_courts(7, 2), 1);
        assert_eq!(effective_courts(8, 2), 2);
        assert_eq!(effective_courts(20, 3), 3);
        assert_eq!(effective_courts(3, 1), 0);
    }

    #[test]
    fn test_no_pause_when_roster_fits() {
        let roster = ids(&["A", "B", "C", "D", "E", "F", "G", "H"]);
        let state = PauseState::new(&roster);
        let paused = select_paused_players(&roster, 2, 1, &state, false, &mut create_rng(1));
        assert!(paused.is_empty());
    }

    #[test]
    fn test_lowest_pause_count_selected() {
        let roster = ids(&["A", "B", "C", "D", "E"]);
        // A and C never paused, B/D/E paused once
        let state = PauseState::new(&roster).update(&ids(&["B", "D", "E"]), &ids(&["A", "C"]), 1);
        let paused = select_paused_players(&roster, 1, 2, &state, false, &mut create_rng(1));
        assert_eq!(paused, ids(&["A"]));
    }

    #[test]
    fn test_zero_pause_players_go_first() {
        let roster = ids(&["A", "B", "C", "D", "E", "F", "G", "H", "I"]);
        let mut state = PauseState::new(&roster);
        for (round, who) in [(1, "B"), (2, "D"), (3, "E"), (4, "F"), (5, "G"), (6, "H"), (7, "I")] {
            let active: Vec<PlayerId> = roster.iter().filter(|p| *p != who).cloned().collect();
            state = state.update(&ids(&[who]), &active, round);
        }
        let paused = select_paused_players(&roster, 2, 8, &state, false, &mut create_rng(9));
        assert_eq!(paused, ids(&["A"]));
    }

    #[test]
    fn test_unknown_player_counts_as_never_paused() {
        let known = ids(&["A", "B", "C", "D"]);
        let state = PauseState::new(&known)
            .update(&ids(&["A"]), &ids(&["B", "C", "D"]), 1)
            .update(&ids(&["C"]), &ids(&["A", "B", "D"]), 2)
            .update(&ids(&["B"]), &ids(&["A", "C", "D"]), 3)
            .update(&ids(&["D"]), &ids(&["A", "B", "C"]), 4);
        let roster = ids(&["A", "B", "C", "D", "E"]);
        let paused = select_paused_players(&roster, 1, 5, &state, false, &mut create_rng(9));
        assert_eq!(paused, ids(&["E"]));
    }

    #[test]
    fn test_example_pause_counts_prefer_a_or_c() {
        // pause counts A:0, B:1, C:0, D:1, E:2; one player must sit out
        let roster = ids(&["A", "B", "C", "D", "E"]);
        let state = PauseState::new(&roster)
            .update(&ids(&["B"]), &ids(&["A", "C", "D", "E"]), 1)
            .update(&ids(&["D"]), &ids(&["A", "B", "C", "E"]), 2)
            .update(&ids(&["E"]), &ids(&["A", "B", "C", "D"]), 3)
            .update(&ids(&["E"]), &ids(&["A", "B", "C", "D"]), 4);
        let paused = select_paused_players(&roster, 1, 5, &state, false, &mut create_rng(0));
        assert_eq!(paused.len(), 1);
        assert!(paused[0] == "A" || paused[0] == "C");
        // equal last-paused round, so roster order decides
        assert_eq!(paused, ids(&["A"]));
    }

    #[test]
    fn test_recent_pause_loses_tie() {
        let roster = ids(&["A", "B", "C", "D", "E"]);
        let state = PauseState::new(&roster)
            .update(&ids(&["A"]), &ids(&["B", "C", "D", "E"]), 2)
            .update(&ids(&["B"]), &ids(&["A", "C", "D", "E"]), 1)
            .update(&ids(&["C", "D", "E"]), &ids(&["A", "B"]), 3)
            .update(&ids(&["C", "D", "E"]), &ids(&["A", "B"]), 4);
        // A and B have one pause each; B paused longer ago (round 1)
        let paused = select_paused_players(&roster, 1, 5, &state, false, &mut create_rng(0));
        assert_eq!(paused, ids(&["B"]));
    }

    #[test]
    fn test_randomized_selection_respects_ranking() {
        let roster = ids(&["A", "B", "C", "D", "E", "F"]);
        let state = PauseState::new(&roster).update(&ids(&["A", "B"]), &ids(&["C", "D", "E", "F"]), 1);
        let mut rng = create_rng(5);
        for round in 2..40 {
            let paused = select_paused_players(&roster, 1, round, &state, true, &mut rng);
            assert_eq!(paused.len(), 2);
            assert!(paused.iter().all(|p| p != "A" && p != "B"));
        }
    }

    #[test]
    fn test_update_keeps_invariant() {
        let roster = ids(&["A", "B", "C", "D", "E"]);
        let mut state = PauseState::new(&roster);
        let mut rng = create_rng(2);
        for round in 1..=10 {
            let paused = select_paused_players(&roster, 1, round, &state, false, &mut rng);
            let active: Vec<PlayerId> =
                roster.iter().filter(|p| !paused.contains(p)).cloned().collect();
            state = state.update(&paused, &active, round);
        }
        for id in &roster {
            let r = state.record(id);
            assert_eq!(r.pause_count + r.games_played, 10);
            assert_eq!(r.pause_count, 2);
        }
    }

    #[test]
    fn test_update_does_not_mutate_input() {
        let roster = ids(&["A", "B", "C", "D", "E"]);
        let state = PauseState::new(&roster);
        let next = state.update(&ids(&["E"]), &ids(&["A", "B", "C", "D"]), 1);
        assert_eq!(state.pause_count("E"), 0);
        assert_eq!(next.pause_count("E"), 1);
        assert_eq!(next.last_paused_round("E"), 1);
        assert_eq!(next.games_played("A"), 1);
    }
}
