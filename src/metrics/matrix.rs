//! Pairwise encounter matrices.

use crate::history::MatchHistory;
use crate::models::{GeneratedRound, PlayerId};

/// Symmetric partner and opponent counts, in roster order.
///
/// `partner[i][j]` is how often `player_ids[i]` and `player_ids[j]` were
/// partners; the diagonal is always 0.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FrequencyMatrices {
    pub player_ids: Vec<PlayerId>,
    pub partner: Vec<Vec<u32>>,
    pub opponent: Vec<Vec<u32>>,
}

impl FrequencyMatrices {
    /// Builds both matrices from every match in `rounds`.
    pub fn build(rounds: &[GeneratedRound], player_ids: &[PlayerId]) -> Self {
        let history = MatchHistory::from_rounds(player_ids, rounds);
        Self {
            player_ids: player_ids.to_vec(),
            partner: table(player_ids, |a, b| history.partner_count(a, b)),
            opponent: table(player_ids, |a, b| history.opponent_count(a, b)),
        }
    }

    /// Highest partner count, for scaling a heatmap.
    pub fn max_partner(&self) -> u32 {
        self.partner.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Highest opponent count, for scaling a heatmap.
    pub fn max_opponent(&self) -> u32 {
        self.opponent.iter().flatten().copied().max().unwrap_or(0)
    }
}

fn table<F: Fn(&str, &str) -> u32>(player_ids: &[PlayerId], count: F) -> Vec<Vec<u32>> {
    player_ids
        .iter()
        .map(|a| player_ids.iter().map(|b| count(a.as_str(), b.as_str())).collect())
        .collect()
}
