//! Turn sequencing for a single duel.
//!
//! The [`TurnController`] is the authoritative reducer for [`MatchState`]:
//! it validates declarations, hands cast animations to the caller, resolves
//! the cast once the animation completes, and reports every change as
//! [`DuelEvent`]s. Rejections never mutate state.
//!
//! [`MatchState`]: crate::state::MatchState

mod controller;
mod errors;
mod events;
mod report;

pub use controller::TurnController;
pub use errors::{ExecuteError, IllegalAction};
pub use events::DuelEvent;
pub use report::{CastRequest, Declaration, MatchSnapshot, Phase, TurnReport};
