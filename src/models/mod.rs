//! Tournament domain models.
//!
//! Plain data types exchanged with the outside world: the roster handed in
//! by the setup layer ([`ScheduleConfig`]) and the rounds handed back to the
//! presentation layer ([`GeneratedSchedule`], [`GeneratedRound`],
//! [`MatchAssignment`]).
//!
//! With the `serde` feature, every type serializes with camelCase field
//! names so the JSON shape matches what a browser front end expects.

mod round;
mod schedule;

pub use round::{GeneratedRound, MatchAssignment};
pub use schedule::{GeneratedSchedule, GenerationInfo, GenerationMethod, ScheduleConfig};

/// Opaque player identifier, unique within a roster.
pub type PlayerId = String;

/// Two players sharing one side of a court.
pub type Team = [PlayerId; 2];
