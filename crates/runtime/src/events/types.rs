//! Event types for the match topic.

use duel_core::{IllegalAction, MatchSnapshot, Outcome, Side, SpellId};
use serde::{Deserialize, Serialize};

/// Match-level notifications (state changes, results, rejections).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Published after every accepted mutation with the resulting state.
    StateChanged(Box<MatchSnapshot>),

    /// The match reached a terminal outcome.
    MatchEnded { outcome: Outcome },

    /// A declaration was refused; nothing changed.
    ActionRejected {
        side: Side,
        spell: Option<SpellId>,
        reason: String,
    },
}

impl MatchEvent {
    pub(crate) fn rejected(side: Side, spell: Option<SpellId>, reason: &IllegalAction) -> Self {
        Self::ActionRejected {
            side,
            spell,
            reason: reason.to_string(),
        }
    }
}
