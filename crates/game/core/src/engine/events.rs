//! Events emitted by the controller for the presentation layer.

use crate::spell::SpellId;
use crate::state::{Outcome, Side, StatusKind};

/// A single observable state change, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuelEvent {
    /// A cast was accepted; the presentation layer should play its animation.
    CastRequested { side: Side, spell: SpellId },
    SpellMissed { side: Side, spell: SpellId },
    DamageDealt {
        target: Side,
        spell: SpellId,
        amount: u32,
        hp: u32,
    },
    HealApplied {
        side: Side,
        amount: u32,
        hp: u32,
        potions_left: u8,
    },
    /// Heal cast with no potions left.
    HealFizzled { side: Side },
    StatusApplied {
        side: Side,
        status: StatusKind,
        /// Duration for counted effects (poison); `None` for stun.
        turns: Option<u8>,
    },
    StatusExpired { side: Side, status: StatusKind },
    PoisonTicked {
        side: Side,
        amount: u32,
        hp: u32,
        turns_remaining: u8,
    },
    /// A stunned side lost its turn.
    TurnSkipped { side: Side },
    TurnChanged { owner: Side, turn_count: u32 },
    MatchEnded { outcome: Outcome },
    MatchReset,
}
