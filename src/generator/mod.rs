//! Round-by-round schedule generation.
//!
//! One generation pass walks rounds `1..=total_rounds`. Each round runs
//! pause rotation, partner matching and opponent assignment, then advances
//! the pause counters and match history:
//!
//! ```text
//! PauseState, MatchHistory
//!   -> select_paused_players -> active players
//!   -> form_partner_pairs[_optimal] -> pairs
//!   -> assign_opponents -> matches
//!   -> GeneratedRound
//!   -> PauseState::update, MatchHistory::update
//! ```
//!
//! [`ScheduleGenerator::extend`] replays existing rounds to rebuild that
//! state, then keeps going. Open-ended tournaments grow this way, one
//! [`extend_open_ended`] batch at a time.

mod config;
mod runner;
mod types;

pub use config::GenerationOptions;
pub use runner::{
    extend_open_ended, generate_additional_rounds, generate_schedule, needs_extension,
    ScheduleGenerator,
};
pub use types::{GenerationStats, RotationState};
