//! Authoritative match state representation.
//!
//! This module owns the data structures that describe both combatants, their
//! cooldowns and status effects, and the turn bookkeeping. Runtime layers
//! clone or query this state but mutate it exclusively through the
//! [`TurnController`](crate::engine::TurnController).
mod combatant;
mod cooldowns;
mod match_state;
mod status;

pub use combatant::Combatant;
pub use cooldowns::{Cooldown, Cooldowns};
pub use match_state::{MatchLog, MatchState, Outcome, Side};
pub use status::{PoisonTick, StatusEffects, StatusKind};
