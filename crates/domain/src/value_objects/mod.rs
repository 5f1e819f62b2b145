//! Value Objects - Immutable, identity-less domain primitives

mod fault_rate;
mod player_name;
mod roll_bound;
mod roll_outcome;

pub use fault_rate::FaultRate;
pub use player_name::PlayerName;
pub use roll_bound::RollBound;
pub use roll_outcome::RollOutcome;
