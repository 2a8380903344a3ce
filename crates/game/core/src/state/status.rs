//! Status effects carried by a combatant.
//!
//! Poison counts down once per resolved turn in which its bearer is the
//! target; stun is not counted down at all but consumed the next time its
//! bearer would act.

use strum::{Display, IntoStaticStr};

/// Kinds of status effect a combatant can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    Poisoned,
    Stunned,
}

/// Active status effects on a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    poison_turns: u8,
    stunned: bool,
}

/// Result of one poison tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoisonTick {
    pub damage: u32,
    pub turns_remaining: u8,
    /// True when this tick consumed the last poisoned turn.
    pub expired: bool,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn poison_turns(&self) -> u8 {
        self.poison_turns
    }

    pub fn is_poisoned(&self) -> bool {
        self.poison_turns > 0
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned
    }

    /// Sets the remaining poison turns. Reapplying overwrites, it never stacks.
    pub fn set_poison(&mut self, turns: u8) {
        self.poison_turns = turns;
    }

    /// Counts one poisoned turn down. Returns the turns left, or `None` if
    /// the bearer was not poisoned.
    pub fn decrement_poison(&mut self) -> Option<u8> {
        if self.poison_turns == 0 {
            return None;
        }
        self.poison_turns -= 1;
        Some(self.poison_turns)
    }

    pub fn set_stunned(&mut self) {
        self.stunned = true;
    }

    /// Clears the stun flag. Returns whether it was set.
    pub fn take_stun(&mut self) -> bool {
        core::mem::take(&mut self.stunned)
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        match kind {
            StatusKind::Poisoned => self.is_poisoned(),
            StatusKind::Stunned => self.is_stunned(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.is_poisoned() && !self.is_stunned()
    }
}
