//! Post-hoc fairness analysis of a finished schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Games / pause std dev | Population standard deviation across the roster |
//! | Max games / pause gap | Most minus fewest, across the roster |
//! | Partner variety | Mean of distinct partners / min(games, n-1) |
//! | Opponent variety | Mean of distinct opponents / min(2 * games, n-1) |
//! | Max partner / opponent gap | Most minus fewest encounters over all pairs |
//!
//! Variety means skip players who never played; with nobody playing, the
//! index is 1.0.

mod fairness;
mod matrix;

pub use fairness::FairnessMetrics;
pub use matrix::FrequencyMatrices;
