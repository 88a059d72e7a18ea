//! Fair rotation scheduling for doubles tournaments.
//!
//! Schedules "Americano" play: every round, players are split into teams
//! of two and teams meet on courts, with partners and opponents rotating
//! so that everyone plays with and against as many others as possible.
//!
//! - **Pause rotation** ([`pause`]): who sits out when the roster does not
//!   fill the courts.
//! - **Partner matching** ([`pairing`]): greedy, or budgeted branch and
//!   bound for small rounds.
//! - **Opponent assignment** ([`opponents`]): which team faces which.
//! - **Generation** ([`generator`]): the round-by-round loop, including
//!   extension of an existing schedule.
//! - **Monte Carlo search** ([`montecarlo`]): best of many randomized
//!   schedules.
//! - **Fairness analysis** ([`metrics`]): participation balance and
//!   encounter variety of a finished schedule.
//!
//! # Architecture
//!
//! Generation is pure and synchronous. History and pause counters are
//! immutable snapshots threaded from round to round, randomness is an
//! injected [`rand::Rng`], and the only interactive hooks are the Monte
//! Carlo cancellation flag and time limit.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for all model types.
//! - `parallel`: Monte Carlo candidates evaluated on the rayon pool.
//! - `wasm`: browser bindings.
//!
//! # Quick start
//!
//! ```
//! use u_americano::generator::generate_schedule;
//! use u_americano::metrics::FairnessMetrics;
//! use u_americano::models::ScheduleConfig;
//!
//! let ids: Vec<String> = (1..=9).map(|i| format!("P{i}")).collect();
//! let config = ScheduleConfig::new(ids, 2, 9);
//! let schedule = generate_schedule(&config);
//!
//! let metrics = FairnessMetrics::calculate(&schedule.rounds, &config.player_ids);
//! assert_eq!(metrics.max_pause_gap, 0);
//! ```

pub mod constants;
pub mod generator;
pub mod history;
pub mod metrics;
pub mod models;
pub mod montecarlo;
pub mod opponents;
pub mod pairing;
pub mod pause;
pub mod random;
pub mod scoring;
pub mod validation;
pub mod wasm;
