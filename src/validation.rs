//! Input checks for collaborators that build a [`ScheduleConfig`].
//!
//! Generation itself assumes valid input and asserts its contracts; these
//! checks let a setup layer reject bad input with a readable error first.

use std::collections::HashSet;

use thiserror::Error;

use crate::constants::{MAX_PLAYERS, MIN_PLAYERS};
use crate::models::{GeneratedRound, PlayerId, ScheduleConfig};

/// Why a schedule configuration was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least 4 players are required, got {0}")]
    TooFewPlayers(usize),

    #[error("at most 20 players are supported, got {0}")]
    TooManyPlayers(usize),

    #[error("at least one court is required")]
    NoCourts,

    #[error("at least one round is required")]
    NoRounds,

    #[error("duplicate player id: {0}")]
    DuplicatePlayer(PlayerId),

    #[error("player ids must not be empty")]
    EmptyPlayerId,

    #[error("round {round} names unknown player: {id}")]
    UnknownPlayer { round: u32, id: PlayerId },
}

/// Checks roster size and id uniqueness.
pub fn validate_roster(player_ids: &[PlayerId]) -> Result<(), ConfigError> {
    if player_ids.len() < MIN_PLAYERS {
        return Err(ConfigError::TooFewPlayers(player_ids.len()));
    }
    if player_ids.len() > MAX_PLAYERS {
        return Err(ConfigError::TooManyPlayers(player_ids.len()));
    }

    let mut seen = HashSet::with_capacity(player_ids.len());
    for id in player_ids {
        if id.is_empty() {
            return Err(ConfigError::EmptyPlayerId);
        }
        if !seen.insert(id.as_str()) {
            return Err(ConfigError::DuplicatePlayer(id.clone()));
        }
    }
    Ok(())
}

/// Checks a full generation request.
///
/// # Examples
///
/// ```
/// use u_americano::models::ScheduleConfig;
/// use u_americano::validation::{validate_config, ConfigError};
///
/// assert!(validate_config(&ScheduleConfig::new(["A", "B", "C", "D"], 1, 3)).is_ok());
/// assert_eq!(
///     validate_config(&ScheduleConfig::new(["A", "B", "C"], 1, 3)),
///     Err(ConfigError::TooFewPlayers(3))
/// );
/// ```
pub fn validate_config(config: &ScheduleConfig) -> Result<(), ConfigError> {
    validate_roster(&config.player_ids)?;
    if config.courts == 0 {
        return Err(ConfigError::NoCourts);
    }
    if config.total_rounds == 0 {
        return Err(ConfigError::NoRounds);
    }
    Ok(())
}

/// Checks that every id in `rounds`, playing or paused, is on the roster.
///
/// Extension and metrics index their counters by roster position, so
/// previously generated rounds must come from the same roster.
pub fn validate_rounds(player_ids: &[PlayerId], rounds: &[GeneratedRound]) -> Result<(), ConfigError> {
    let roster: HashSet<&str> = player_ids.iter().map(String::as_str).collect();
    for round in rounds {
        let ids = round
            .matches
            .iter()
            .flat_map(|m| m.players())
            .chain(round.paused_player_ids.iter());
        for id in ids {
            if !roster.contains(id.as_str()) {
                return Err(ConfigError::UnknownPlayer {
                    round: round.round_number,
                    id: id.clone(),
                });
            }
        }
    }
    Ok(())
}
