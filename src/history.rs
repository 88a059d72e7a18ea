//! Cumulative partner/opponent history.
//!
//! [`MatchHistory`] counts how often each unordered pair of players has
//! been partners and how often they have been opponents. Counts start at
//! zero and only grow.
//!
//! Updates are functional: [`MatchHistory::update`] returns a new snapshot
//! and leaves the receiver untouched, so a round can be scored against the
//! state before it was played.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{GeneratedRound, MatchAssignment, PlayerId, Team};

/// Symmetric partner/opponent count tables over a fixed roster.
///
/// # Examples
///
/// ```
/// use u_americano::history::MatchHistory;
/// use u_americano::models::MatchAssignment;
///
/// let ids: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
/// let empty = MatchHistory::new(&ids);
/// let m = MatchAssignment::new(0, ["A".into(), "B".into()], ["C".into(), "D".into()]);
///
/// let after = empty.update(&[m]);
/// assert_eq!(after.partner_count("B", "A"), 1);
/// assert_eq!(after.opponent_count("A", "D"), 1);
/// assert_eq!(empty.partner_count("A", "B"), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchHistory {
    index: Arc<HashMap<PlayerId, usize>>,
    n: usize,
    partner: Vec<u32>,
    opponent: Vec<u32>,
}

impl MatchHistory {
    /// Creates a zeroed history for every unordered pair of `player_ids`.
    pub fn new(player_ids: &[PlayerId]) -> Self {
        let index: HashMap<PlayerId, usize> = player_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let n = player_ids.len();
        Self {
            index: Arc::new(index),
            n,
            partner: vec![0; n * n],
            opponent: vec![0; n * n],
        }
    }

    /// Rebuilds history by replaying `rounds` from empty.
    pub fn from_rounds(player_ids: &[PlayerId], rounds: &[GeneratedRound]) -> Self {
        rounds
            .iter()
            .fold(Self::new(player_ids), |history, round| history.update(&round.matches))
    }

    /// Number of players tracked.
    pub fn player_count(&self) -> usize {
        self.n
    }

    /// Times `a` and `b` have been partners. 0 for unknown ids or `a == b`.
    pub fn partner_count(&self, a: &str, b: &str) -> u32 {
        self.lookup(&self.partner, a, b)
    }

    /// Times `a` and `b` have been opponents. 0 for unknown ids or `a == b`.
    pub fn opponent_count(&self, a: &str, b: &str) -> u32 {
        self.lookup(&self.opponent, a, b)
    }

    /// Prior partnerships within a team.
    pub fn team_partner_count(&self, team: &Team) -> u32 {
        self.partner_count(&team[0], &team[1])
    }

    /// Sum of prior encounters over the four cross pairs of two teams.
    pub fn cross_opponent_count(&self, team1: &Team, team2: &Team) -> u32 {
        team1
            .iter()
            .flat_map(|a| team2.iter().map(move |b| (a, b)))
            .map(|(a, b)| self.opponent_count(a, b))
            .sum()
    }

    /// Returns a new snapshot with `matches` recorded.
    ///
    /// # Panics
    /// Panics if a match names a player outside the roster.
    pub fn update(&self, matches: &[MatchAssignment]) -> Self {
        let mut next = self.clone();
        for m in matches {
            next.record(m);
        }
        next
    }

    /// Partner counts of every unordered pair, in roster order.
    pub fn partner_pair_counts(&self) -> impl Iterator<Item = u32> + '_ {
        self.upper_triangle(&self.partner)
    }

    /// Opponent counts of every unordered pair, in roster order.
    pub fn opponent_pair_counts(&self) -> impl Iterator<Item = u32> + '_ {
        self.upper_triangle(&self.opponent)
    }

    fn record(&mut self, m: &MatchAssignment) {
        for team in [&m.team1, &m.team2] {
            let (a, b) = (self.require(&team[0]), self.require(&team[1]));
            bump(&mut self.partner, self.n, a, b);
        }
        for (a, b) in m.cross_pairs() {
            let (a, b) = (self.require(a), self.require(b));
            bump(&mut self.opponent, self.n, a, b);
        }
    }

    fn lookup(&self, table: &[u32], a: &str, b: &str) -> u32 {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&i), Some(&j)) if i != j => table[i * self.n + j],
            _ => 0,
        }
    }

    fn require(&self, id: &str) -> usize {
        match self.index.get(id) {
            Some(&i) => i,
            None => panic!("player '{id}' is not part of the tracked roster"),
        }
    }

    fn upper_triangle<'a>(&'a self, table: &'a [u32]) -> impl Iterator<Item = u32> + 'a {
        let n = self.n;
        (0..n).flat_map(move |i| (i + 1..n).map(move |j| table[i * n + j]))
    }
}

fn bump(table: &mut [u32], n: usize, a: usize, b: usize) {
    assert_ne!(a, b, "a player cannot be paired with themselves");
    table[a * n + b] += 1;
    table[b * n + a] += 1;
}
