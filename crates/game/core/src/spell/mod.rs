//! Spell definitions and the immutable catalog that registers them.
//!
//! Spell identifiers form a closed enumeration: the catalog is fixed at match
//! start and every cooldown, policy pick, and legality check is keyed by
//! [`SpellId`] rather than by free-form strings. Presentation layers that
//! hand in strings go through [`SpellCatalog::lookup`], the only place an
//! unknown name can surface.
mod catalog;

pub use catalog::{CatalogError, SpellCatalog};

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Identifier of a catalog entry.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpellId {
    Fireball,
    #[strum(to_string = "zap", serialize = "lightning")]
    Zap,
    Poison,
    Heal,
}

impl SpellId {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Effect family of a spell; decides which resolution branch runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellKind {
    Fire,
    Lightning,
    Poison,
    Heal,
}

impl SpellKind {
    pub const fn is_heal(self) -> bool {
        matches!(self, Self::Heal)
    }
}

/// Immutable catalog entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Spell {
    pub id: SpellId,
    pub name: &'static str,
    /// Signed magnitude; negative values are healing.
    pub base_damage: i32,
    /// Hit probability in (0, 1].
    pub accuracy: f64,
    pub kind: SpellKind,
    /// Turns the caster must wait before recasting.
    pub cooldown: u8,
    pub description: &'static str,
}

impl Spell {
    pub const fn new(
        id: SpellId,
        name: &'static str,
        base_damage: i32,
        accuracy: f64,
        kind: SpellKind,
        cooldown: u8,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            base_damage,
            accuracy,
            kind,
            cooldown,
            description,
        }
    }

    /// Healing restored by a successful heal, regardless of sign convention.
    pub fn heal_amount(&self) -> u32 {
        self.base_damage.unsigned_abs()
    }
}
