//! Per-pass generation options.

use crate::constants::DEFAULT_BACKTRACK_BUDGET;

/// Options for a single generation pass.
///
/// # Examples
///
/// ```
/// use u_americano::generator::GenerationOptions;
///
/// let options = GenerationOptions::default()
///     .with_randomize(true)
///     .with_optimal(true)
///     .with_backtrack_budget(10_000);
/// assert!(options.randomize);
/// assert_eq!(options.backtrack_budget, 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Break ties randomly instead of by roster order.
    pub randomize: bool,

    /// Use the backtracking partner matcher.
    ///
    /// Ignored above
    /// [`OPTIMAL_ACTIVE_PLAYERS_THRESHOLD`](crate::constants::OPTIMAL_ACTIVE_PLAYERS_THRESHOLD)
    /// active players; greedy matching is used there.
    pub use_optimal: bool,

    /// Node budget per backtracking call.
    pub backtrack_budget: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            randomize: false,
            use_optimal: false,
            backtrack_budget: DEFAULT_BACKTRACK_BUDGET,
        }
    }
}

impl GenerationOptions {
    /// Deterministic greedy pass.
    pub fn greedy() -> Self {
        Self::default()
    }

    pub fn with_randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    pub fn with_optimal(mut self, use_optimal: bool) -> Self {
        self.use_optimal = use_optimal;
        self
    }

    pub fn with_backtrack_budget(mut self, budget: usize) -> Self {
        self.backtrack_budget = budget;
        self
    }
}
