//! Fairness metrics.

use crate::history::MatchHistory;
use crate::models::{GeneratedRound, PlayerId};

/// Fairness indicators of a schedule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FairnessMetrics {
    /// Population std dev of games played per player.
    pub games_played_std_dev: f64,
    /// Population std dev of pauses per player.
    pub pause_count_std_dev: f64,
    /// Most games played minus fewest.
    pub max_games_gap: u32,
    /// Most pauses minus fewest.
    pub max_pause_gap: u32,
    /// Distinct partners relative to the achievable maximum (0.0..=1.0).
    pub partner_variety_index: f64,
    /// Distinct opponents relative to the achievable maximum (0.0..=1.0).
    pub opponent_variety_index: f64,
    /// Most-repeated partnership count minus least, over all pairs.
    pub max_partner_gap: u32,
    /// Most-repeated opponent count minus least, over all pairs.
    pub max_opponent_gap: u32,
}

impl FairnessMetrics {
    /// Computes the metrics of `rounds` for the roster `player_ids`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_americano::generator::generate_schedule;
    /// use u_americano::metrics::FairnessMetrics;
    /// use u_americano::models::ScheduleConfig;
    ///
    /// let config = ScheduleConfig::new(["A", "B", "C", "D", "E"], 1, 10);
    /// let schedule = generate_schedule(&config);
    /// let metrics = FairnessMetrics::calculate(&schedule.rounds, &config.player_ids);
    /// assert_eq!(metrics.max_pause_gap, 0);
    /// ```
    pub fn calculate(rounds: &[GeneratedRound], player_ids: &[PlayerId]) -> Self {
        let n = player_ids.len();
        let mut games = vec![0u32; n];
        let mut pauses = vec![0u32; n];
        for round in rounds {
            for (i, id) in player_ids.iter().enumerate() {
                if round.is_paused(id) {
                    pauses[i] += 1;
                } else if round.matches.iter().any(|m| m.contains(id)) {
                    games[i] += 1;
                }
            }
        }

        let history = MatchHistory::from_rounds(player_ids, rounds);

        let mut partner_ratios = Vec::with_capacity(n);
        let mut opponent_ratios = Vec::with_capacity(n);
        for (i, id) in player_ids.iter().enumerate() {
            if games[i] == 0 {
                continue;
            }
            let others = (n - 1) as u32;
            let (partners, opponents) = player_ids
                .iter()
                .filter(|other| *other != id)
                .fold((0u32, 0u32), |(p, o), other| {
                    (
                        p + u32::from(history.partner_count(id, other) > 0),
                        o + u32::from(history.opponent_count(id, other) > 0),
                    )
                });
            partner_ratios.push(ratio(partners, games[i].min(others)));
            opponent_ratios.push(ratio(opponents, (2 * games[i]).min(others)));
        }

        Self {
            games_played_std_dev: std_dev(&games),
            pause_count_std_dev: std_dev(&pauses),
            max_games_gap: spread(games.iter().copied()),
            max_pause_gap: spread(pauses.iter().copied()),
            partner_variety_index: mean_or_one(&partner_ratios),
            opponent_variety_index: mean_or_one(&opponent_ratios),
            max_partner_gap: spread(history.partner_pair_counts()),
            max_opponent_gap: spread(history.opponent_pair_counts()),
        }
    }
}

fn ratio(met: u32, achievable: u32) -> f64 {
    if achievable == 0 {
        1.0
    } else {
        f64::from(met) / f64::from(achievable)
    }
}

fn mean_or_one(values: &[f64]) -> f64 {
    if values.is_empty() {
        1.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation.
fn std_dev(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| (f64::from(v) - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt()
}

/// Max minus min; 0 when empty.
fn spread(values: impl Iterator<Item = u32>) -> u32 {
    let (min, max) = values.fold((u32::MAX, 0), |(lo, hi), v| (lo.min(v), hi.max(v)));
    max.saturating_sub(min)
}
