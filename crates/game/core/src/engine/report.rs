use crate::combat::EffectOutcome;
use crate::spell::{SpellId, SpellKind};
use crate::state::{Combatant, MatchState, Outcome, Side};

use super::DuelEvent;

/// Where the turn state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Waiting for `side` to declare a spell.
    AwaitingAction(Side),
    /// A declared cast is being animated; resolution waits for `complete_cast`.
    Animating { side: Side, spell: SpellId },
    MatchOver(Outcome),
}

impl Phase {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::MatchOver(_))
    }

    /// Side expected to act, if any.
    pub const fn awaiting(self) -> Option<Side> {
        match self {
            Self::AwaitingAction(side) => Some(side),
            _ => None,
        }
    }
}

/// Request handed to the presentation layer to play a cast animation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastRequest {
    pub side: Side,
    pub spell: SpellId,
    pub kind: SpellKind,
    pub caster: Combatant,
    pub target: Combatant,
}

impl CastRequest {
    /// Event announcing this cast to subscribers.
    pub fn event(&self) -> DuelEvent {
        DuelEvent::CastRequested {
            side: self.side,
            spell: self.spell,
        }
    }
}

/// Result of an accepted declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Declaration {
    /// The cast is animating; call `complete_cast` once the animation ends.
    Cast(CastRequest),
    /// The caster was stunned and the turn already passed.
    Skipped(TurnReport),
}

/// Everything a resolved (or skipped) turn produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub side: Side,
    /// `None` when the turn was lost to a stun.
    pub effect: Option<EffectOutcome>,
    pub events: Vec<DuelEvent>,
    pub snapshot: MatchSnapshot,
}

impl TurnReport {
    pub fn outcome(&self) -> Outcome {
        self.snapshot.outcome
    }

    pub fn was_skipped(&self) -> bool {
        self.effect.is_none()
    }
}

/// Read-only copy of the match for `onStateChanged` style notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSnapshot {
    pub player: Combatant,
    pub opponent: Combatant,
    pub turn_owner: Side,
    pub turn_count: u32,
    pub outcome: Outcome,
    pub phase: Phase,
    pub log: Vec<String>,
}

impl MatchSnapshot {
    pub(crate) fn capture(state: &MatchState, phase: Phase) -> Self {
        Self {
            player: state.player.clone(),
            opponent: state.opponent.clone(),
            turn_owner: state.turn_owner,
            turn_count: state.turn_count,
            outcome: state.outcome,
            phase,
            log: state.log.iter().map(str::to_owned).collect(),
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}
