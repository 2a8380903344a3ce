//! Effect resolution for a single cast.

use bitflags::bitflags;

use crate::config::DuelConfig;
use crate::env::RngSource;
use crate::spell::{Spell, SpellId, SpellKind};
use crate::state::Combatant;

bitflags! {
    /// Which combatants a resolution touched, for the presentation layer to animate.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EffectFlags: u8 {
        const CASTER_CHANGED = 0b0000_0001;
        const TARGET_CHANGED = 0b0000_0010;
        /// Target took damage and should play its hit reaction.
        const TARGET_DAMAGED = 0b0000_0100;
    }
}

/// What a cast did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Accuracy roll failed; nothing changed.
    Miss,
    /// Caster restored `amount` hp and spent a potion.
    Healed { amount: u32, potions_left: u8 },
    /// Heal attempted with an empty potion pouch.
    HealFizzled,
    /// Target took `damage` and is poisoned for `turns`.
    Poisoned { damage: u32, turns: u8 },
    /// Direct damage.
    Damaged { damage: u32 },
}

impl EffectKind {
    pub const fn is_miss(self) -> bool {
        matches!(self, Self::Miss)
    }
}

/// Result of resolving one cast against one target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectOutcome {
    pub spell: SpellId,
    /// Accuracy roll drawn for this cast.
    pub roll: f64,
    pub kind: EffectKind,
    pub flags: EffectFlags,
    pub message: String,
}

/// Resolves `spell` cast by `caster` against `target`.
///
/// Draws exactly one accuracy roll; a roll above `spell.accuracy` misses and
/// leaves both combatants untouched. Cooldowns and poison ticks are the
/// controller's job, not the resolver's.
pub fn resolve(
    spell: &Spell,
    caster: &mut Combatant,
    target: &mut Combatant,
    rng: &mut impl RngSource,
) -> EffectOutcome {
    let roll = rng.next_unit();
    if roll > spell.accuracy {
        return EffectOutcome {
            spell: spell.id,
            roll,
            kind: EffectKind::Miss,
            flags: EffectFlags::empty(),
            message: format!("{} missed {}!", caster.name, spell.name),
        };
    }

    let (kind, flags, message) = match spell.kind {
        SpellKind::Heal => resolve_heal(spell, caster),
        SpellKind::Poison => {
            let damage = deal_damage(target, spell.base_damage);
            target.poison(DuelConfig::POISON_DURATION);
            (
                EffectKind::Poisoned {
                    damage,
                    turns: DuelConfig::POISON_DURATION,
                },
                EffectFlags::TARGET_CHANGED | EffectFlags::TARGET_DAMAGED,
                format!("{} poisoned {}!", caster.name, target.name),
            )
        }
        SpellKind::Lightning => {
            let damage = deal_damage(target, spell.base_damage);
            (
                EffectKind::Damaged { damage },
                EffectFlags::TARGET_CHANGED | EffectFlags::TARGET_DAMAGED,
                format!(
                    "{} struck {} with lightning! ({} damage)",
                    caster.name, target.name, damage
                ),
            )
        }
        SpellKind::Fire => {
            let damage = deal_damage(target, spell.base_damage);
            (
                EffectKind::Damaged { damage },
                EffectFlags::TARGET_CHANGED | EffectFlags::TARGET_DAMAGED,
                format!(
                    "{} hit {} with {}! ({} damage)",
                    caster.name, target.name, spell.name, damage
                ),
            )
        }
    };

    EffectOutcome {
        spell: spell.id,
        roll,
        kind,
        flags,
        message,
    }
}

fn resolve_heal(spell: &Spell, caster: &mut Combatant) -> (EffectKind, EffectFlags, String) {
    if !caster.consume_potion() {
        return (
            EffectKind::HealFizzled,
            EffectFlags::empty(),
            format!(
                "{} tried to use {}, but has no potions left!",
                caster.name, spell.name
            ),
        );
    }

    let heal = i32::try_from(spell.heal_amount()).unwrap_or(i32::MAX);
    let amount = caster.apply_damage(-heal).unsigned_abs() as u32;
    let potions_left = caster.potions();
    (
        EffectKind::Healed {
            amount,
            potions_left,
        },
        EffectFlags::CASTER_CHANGED,
        format!(
            "{} healed {} hit points! Potions left: {}",
            caster.name, amount, potions_left
        ),
    )
}

/// Applies damage and returns how much hp was actually lost.
fn deal_damage(target: &mut Combatant, amount: i32) -> u32 {
    target.apply_damage(amount).unsigned_abs() as u32
}
