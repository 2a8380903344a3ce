//! Per-fighter mutable state.

use super::{Cooldowns, PoisonTick, StatusEffects};
use crate::config::DuelConfig;
use crate::spell::{Spell, SpellId};

/// One of the two duel participants.
///
/// `hp` is clamped to `[0, max_hp]` after every mutation; a combatant at zero
/// hit points is defeated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    hp: u32,
    max_hp: u32,
    cooldowns: Cooldowns,
    status: StatusEffects,
    potions: u8,
}

impl Combatant {
    /// Creates a combatant with full health, no cooldowns, no status and a
    /// full potion pouch.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hp: DuelConfig::MAX_HP,
            max_hp: DuelConfig::MAX_HP,
            cooldowns: Cooldowns::empty(),
            status: StatusEffects::empty(),
            potions: DuelConfig::STARTING_POTIONS,
        }
    }

    /// Overrides the current hit points (clamped).
    #[must_use]
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    #[must_use]
    pub fn with_potions(mut self, potions: u8) -> Self {
        self.potions = potions;
        self
    }

    #[must_use]
    pub fn with_poison(mut self, turns: u8) -> Self {
        self.status.set_poison(turns);
        self
    }

    #[must_use]
    pub fn with_stun(mut self) -> Self {
        self.status.set_stunned();
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, spell: SpellId, turns: u8) -> Self {
        self.cooldowns.set(spell, turns);
        self
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn potions(&self) -> u8 {
        self.potions
    }

    pub fn cooldowns(&self) -> &Cooldowns {
        &self.cooldowns
    }

    pub fn status(&self) -> &StatusEffects {
        &self.status
    }

    pub fn cooldown(&self, spell: SpellId) -> Option<u8> {
        self.cooldowns.remaining(spell)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    pub fn is_stunned(&self) -> bool {
        self.status.is_stunned()
    }

    pub fn is_ready(&self, spell: SpellId) -> bool {
        self.cooldowns.is_ready(spell)
    }

    /// Ready, not stunned, and (for heals) still holding a potion.
    pub fn can_cast(&self, spell: &Spell) -> bool {
        self.is_ready(spell.id)
            && !self.is_stunned()
            && (!spell.kind.is_heal() || self.potions > 0)
    }

    /// Starts the cooldown of a cast spell, hit or miss.
    pub fn apply_cooldown(&mut self, spell: SpellId, duration: u8) {
        self.cooldowns.set(spell, duration);
    }

    pub fn tick_cooldowns(&mut self) {
        self.cooldowns.tick();
    }

    /// Applies signed damage; negative amounts heal. Returns the hp delta
    /// actually applied after clamping (negative for damage).
    pub fn apply_damage(&mut self, amount: i32) -> i64 {
        let before = i64::from(self.hp);
        let after = (before - i64::from(amount)).clamp(0, i64::from(self.max_hp));
        self.hp = after as u32;
        after - before
    }

    /// Spends one potion. Returns false (and spends nothing) on an empty pouch.
    pub fn consume_potion(&mut self) -> bool {
        if self.potions == 0 {
            return false;
        }
        self.potions -= 1;
        true
    }

    pub fn poison(&mut self, turns: u8) {
        self.status.set_poison(turns);
    }

    pub fn stun(&mut self) {
        self.status.set_stunned();
    }

    /// Clears the stun flag; returns true when the owner's turn is skipped.
    pub fn consume_stun(&mut self) -> bool {
        self.status.take_stun()
    }

    /// Deals one poison tick if poisoned.
    pub fn tick_poison(&mut self, damage: u32) -> Option<PoisonTick> {
        let turns_remaining = self.status.decrement_poison()?;
        let damage = i32::try_from(damage).unwrap_or(i32::MAX);
        let dealt = self.apply_damage(damage).unsigned_abs() as u32;
        Some(PoisonTick {
            damage: dealt,
            turns_remaining,
            expired: turns_remaining == 0,
        })
    }

    /// Re-applies the hp bounds.
    pub fn clamp_hp(&mut self) {
        self.hp = self.hp.min(self.max_hp);
    }
}
