//! Monte Carlo search configuration.

use crate::constants::{DEFAULT_BACKTRACK_BUDGET, MONTE_CARLO_DEFAULT_ITERATIONS};

/// Configuration for [`MonteCarloRunner`](super::MonteCarloRunner).
///
/// # Examples
///
/// ```
/// use u_americano::montecarlo::MonteCarloConfig;
///
/// let config = MonteCarloConfig::default()
///     .with_iterations(500)
///     .with_seed(7)
///     .with_time_limit_ms(2_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonteCarloConfig {
    /// Candidate schedules to evaluate, baseline included.
    pub iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Node budget per backtracking call.
    pub backtrack_budget: usize,

    /// Wall-clock limit. Checked before each randomized iteration; the
    /// baseline always runs.
    pub time_limit_ms: Option<u64>,

    /// Whether to evaluate candidates in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: MONTE_CARLO_DEFAULT_ITERATIONS,
            seed: None,
            backtrack_budget: DEFAULT_BACKTRACK_BUDGET,
            time_limit_ms: None,
            parallel: false,
        }
    }
}

impl MonteCarloConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_backtrack_budget(mut self, budget: usize) -> Self {
        self.backtrack_budget = budget;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates configuration parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.iterations == 0 {
            return Err("iterations must be at least 1".into());
        }
        if self.backtrack_budget == 0 {
            return Err("backtrack_budget must be positive".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive when set".into());
        }
        Ok(())
    }
}
