//! Tournament-wide constants.

/// Players per court (two teams of two).
pub const PLAYERS_PER_COURT: usize = 4;

/// Smallest roster that fills one court.
pub const MIN_PLAYERS: usize = 4;

/// Largest roster the setup layer accepts.
pub const MAX_PLAYERS: usize = 20;

/// Cost per prior time two partners have already partnered.
pub const PARTNER_REPEAT_PENALTY: u32 = 10;

/// Cost per prior time two opponents have already faced each other.
pub const OPPONENT_REPEAT_PENALTY: u32 = 3;

/// Default number of Monte Carlo candidates.
pub const MONTE_CARLO_DEFAULT_ITERATIONS: usize = 200;

/// Backtracking matching is only used at or below this many active players.
///
/// 12 active players (3 courts) is about 10k branches; 16 is about 2M,
/// too slow even with the node budget.
pub const OPTIMAL_ACTIVE_PLAYERS_THRESHOLD: usize = 12;

/// Default node budget for the backtracking partner matcher.
pub const DEFAULT_BACKTRACK_BUDGET: usize = 50_000;

/// Rounds generated per batch for open-ended tournaments.
pub const OPEN_ENDED_BATCH_SIZE: u32 = 30;

/// Remaining-round count at which an open-ended tournament is extended.
pub const OPEN_ENDED_EXTEND_THRESHOLD: u32 = 5;
