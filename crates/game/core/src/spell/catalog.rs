use std::str::FromStr;

use arrayvec::ArrayVec;
use strum::EnumCount;

use super::{Spell, SpellId, SpellKind};
use crate::error::{ErrorSeverity, GameError};

/// Errors raised by catalog lookups.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown spell '{0}'")]
    UnknownSpell(String),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSpell(_) => "CATALOG_UNKNOWN_SPELL",
        }
    }
}

/// Read-only registry of spell definitions.
///
/// Holds at most one entry per [`SpellId`]; iteration follows the order the
/// entries were registered in.
#[derive(Clone, Debug, PartialEq)]
pub struct SpellCatalog {
    spells: ArrayVec<Spell, { SpellId::COUNT }>,
}

impl SpellCatalog {
    /// The four fixed duel spells.
    pub fn standard() -> Self {
        Self::from_spells([
            Spell::new(
                SpellId::Fireball,
                "Fireball",
                30,
                0.75,
                SpellKind::Fire,
                3,
                "A powerful flaming projectile",
            ),
            Spell::new(
                SpellId::Zap,
                "Zap",
                20,
                0.85,
                SpellKind::Lightning,
                2,
                "A fast bolt that deals direct damage",
            ),
            Spell::new(
                SpellId::Poison,
                "Poison",
                12,
                0.80,
                SpellKind::Poison,
                4,
                "Venom that lingers for 3 turns",
            ),
            Spell::new(
                SpellId::Heal,
                "Heal",
                -25,
                1.00,
                SpellKind::Heal,
                5,
                "Restores hit points",
            ),
        ])
    }

    /// Builds a catalog from arbitrary entries. A later entry replaces an
    /// earlier one with the same id.
    pub fn from_spells(spells: impl IntoIterator<Item = Spell>) -> Self {
        let mut registry: ArrayVec<Spell, { SpellId::COUNT }> = ArrayVec::new();
        for spell in spells {
            match registry.iter_mut().find(|existing| existing.id == spell.id) {
                Some(existing) => *existing = spell,
                None => registry.push(spell),
            }
        }
        Self { spells: registry }
    }

    pub fn get(&self, id: SpellId) -> Result<&Spell, CatalogError> {
        self.spells
            .iter()
            .find(|spell| spell.id == id)
            .ok_or_else(|| CatalogError::UnknownSpell(id.to_string()))
    }

    /// Resolves a presentation-supplied identifier such as `"fireball"`.
    pub fn lookup(&self, name: &str) -> Result<&Spell, CatalogError> {
        let id = SpellId::from_str(name.trim())
            .map_err(|_| CatalogError::UnknownSpell(name.to_owned()))?;
        self.get(id)
    }

    pub fn contains(&self, id: SpellId) -> bool {
        self.spells.iter().any(|spell| spell.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.spells.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = SpellId> + '_ {
        self.spells.iter().map(|spell| spell.id)
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

impl Default for SpellCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
