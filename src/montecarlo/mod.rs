//! Monte Carlo schedule search.
//!
//! Repeats full schedule generation with randomized tie-breaking and a
//! shuffled roster, and keeps the candidate with the lowest
//! [`total_schedule_cost`](crate::scoring::total_schedule_cost).
//!
//! # Algorithm
//!
//! 1. Iteration 0 is the deterministic greedy baseline.
//! 2. Iterations 1..N shuffle the roster and generate with random
//!    tie-breaking. Backtracking partner matching is enabled when a round
//!    has at most 12 active players.
//! 3. A candidate replaces the incumbent only if it is strictly cheaper,
//!    so ties keep the earliest iteration.
//!
//! Each iteration draws its own seed from a master RNG, which makes a
//! seeded run identical whether candidates are evaluated sequentially or
//! on the rayon pool (`parallel` feature).
//!
//! # Usage
//!
//! ```
//! use u_americano::models::ScheduleConfig;
//! use u_americano::montecarlo::{MonteCarloConfig, MonteCarloRunner};
//!
//! let ids: Vec<String> = (1..=10).map(|i| format!("P{i}")).collect();
//! let config = ScheduleConfig::new(ids, 2, 8);
//! let mc = MonteCarloConfig::default().with_iterations(50).with_seed(42);
//!
//! let result = MonteCarloRunner::run(&config, &mc);
//! assert_eq!(result.schedule.rounds.len(), 8);
//! assert!(result.best_cost <= result.baseline_cost);
//! ```

mod config;
mod runner;
mod types;

pub use config::MonteCarloConfig;
pub use runner::{
    generate_additional_rounds_monte_carlo, generate_schedule_monte_carlo, MonteCarloRunner,
};
pub use types::{MonteCarloExtension, MonteCarloResult};
