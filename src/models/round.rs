//! Matches and rounds.

use super::{PlayerId, Team};

/// One court's match: two teams of two.
///
/// Score fields are owned by the score-entry collaborator; the scheduling
/// engine never reads or writes them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MatchAssignment {
    /// 0-based court index.
    pub court_index: usize,
    pub team1: Team,
    pub team2: Team,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub score1: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub score2: Option<u32>,
}

impl MatchAssignment {
    /// Creates an unscored match.
    pub fn new(court_index: usize, team1: Team, team2: Team) -> Self {
        Self {
            court_index,
            team1,
            team2,
            score1: None,
            score2: None,
        }
    }

    /// All four players, team 1 first.
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.team1.iter().chain(self.team2.iter())
    }

    /// Whether `id` plays in this match.
    pub fn contains(&self, id: &str) -> bool {
        self.players().any(|p| p == id)
    }

    /// The four (team1 player, team2 player) cross pairs.
    pub fn cross_pairs(&self) -> impl Iterator<Item = (&PlayerId, &PlayerId)> {
        self.team1
            .iter()
            .flat_map(move |a| self.team2.iter().map(move |b| (a, b)))
    }
}

/// One round of play.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GeneratedRound {
    /// 1-based round number.
    pub round_number: u32,
    /// One match per active court.
    pub matches: Vec<MatchAssignment>,
    /// Players sitting out this round.
    pub paused_player_ids: Vec<PlayerId>,
}

impl GeneratedRound {
    /// Players on court this round, in court order.
    pub fn active_player_ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.matches.iter().flat_map(|m| m.players())
    }

    /// Whether `id` sits out this round.
    pub fn is_paused(&self, id: &str) -> bool {
        self.paused_player_ids.iter().any(|p| p == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(a: &str, b: &str) -> Team {
        [a.to_string(), b.to_string()]
    }

    #[test]
    fn test_match_players_and_cross_pairs() {
        let m = MatchAssignment::new(0, team("A", "B"), team("C", "D"));
        let players: Vec<&str> = m.players().map(String::as_str).collect();
        assert_eq!(players, vec!["A", "B", "C", "D"]);

        let cross: Vec<(&str, &str)> = m
            .cross_pairs()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        assert_eq!(cross, vec![("A", "C"), ("A", "D"), ("B", "C"), ("B", "D")]);
        assert!(m.contains("D"));
        assert!(!m.contains("E"));
    }

    #[test]
    fn test_round_active_and_paused() {
        let round = GeneratedRound {
            round_number: 1,
            matches: vec![MatchAssignment::new(0, team("A", "B"), team("C", "D"))],
            paused_player_ids: vec!["E".into()],
        };
        assert_eq!(round.active_player_ids().count(), 4);
        assert!(round.is_paused("E"));
        assert!(!round.is_paused("A"));
    }
}
