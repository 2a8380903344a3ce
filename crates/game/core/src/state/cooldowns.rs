//! Per-spell cooldown table.
//!
//! Entries exist only while a spell is cooling down: an absent entry means
//! the spell is ready, and ticking removes entries as they reach zero.

use arrayvec::ArrayVec;
use strum::EnumCount;

use crate::spell::SpellId;

/// A single active cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldown {
    pub spell: SpellId,
    /// Turns left before the spell is ready again. Always > 0 while stored.
    pub remaining: u8,
}

/// Active cooldowns of one combatant (at most one entry per spell).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldowns {
    entries: ArrayVec<Cooldown, { SpellId::COUNT }>,
}

impl Cooldowns {
    pub fn empty() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }

    /// Turns remaining for `spell`, or `None` when it is ready.
    pub fn remaining(&self, spell: SpellId) -> Option<u8> {
        self.entries
            .iter()
            .find(|entry| entry.spell == spell)
            .map(|entry| entry.remaining)
    }

    pub fn is_ready(&self, spell: SpellId) -> bool {
        self.remaining(spell).is_none()
    }

    /// Overwrites the cooldown of `spell`. A duration of zero clears it.
    pub fn set(&mut self, spell: SpellId, turns: u8) {
        if turns == 0 {
            self.entries.retain(|entry| entry.spell != spell);
            return;
        }

        match self.entries.iter_mut().find(|entry| entry.spell == spell) {
            Some(entry) => entry.remaining = turns,
            None => self.entries.push(Cooldown {
                spell,
                remaining: turns,
            }),
        }
    }

    /// Decrements every entry by one turn and drops the ones that reach zero.
    pub fn tick(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.remaining = entry.remaining.saturating_sub(1);
        }
        self.entries.retain(|entry| entry.remaining > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cooldown> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
