//! Random opponent backed by the core ready-spell policy.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use duel_core::{
    MatchSnapshot, OpponentPolicy, RandomReadyPolicy, RngSource, Side, SpellCatalog, SpellId,
};

use crate::api::{ActionProvider, Result};

/// Adapts a `rand` generator to the core's random source.
#[derive(Debug)]
pub struct EntropySource<R = StdRng>(pub R);

impl<R: RngCore> RngSource for EntropySource<R> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }
}

struct Picker {
    policy: Box<dyn OpponentPolicy + Send>,
    rng: EntropySource,
}

/// Asks an [`OpponentPolicy`] for a spell, drawing from its own generator.
///
/// Defaults to [`RandomReadyPolicy`]: a uniform pick among ready spells,
/// potions ignored.
pub struct RandomOpponentProvider {
    catalog: SpellCatalog,
    picker: Mutex<Picker>,
}

impl RandomOpponentProvider {
    /// Seeds from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible picks for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            catalog: SpellCatalog::standard(),
            picker: Mutex::new(Picker {
                policy: Box::new(RandomReadyPolicy),
                rng: EntropySource(rng),
            }),
        }
    }

    /// Replace the selection policy.
    #[must_use]
    pub fn with_policy(self, policy: impl OpponentPolicy + Send + 'static) -> Self {
        let mut picker = self.picker.into_inner().unwrap_or_else(PoisonError::into_inner);
        picker.policy = Box::new(policy);
        Self {
            catalog: self.catalog,
            picker: Mutex::new(picker),
        }
    }

    /// Restrict picks to `catalog`.
    #[must_use]
    pub fn with_catalog(mut self, catalog: SpellCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}

impl Default for RandomOpponentProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActionProvider for RandomOpponentProvider {
    async fn provide_action(&self, side: Side, snapshot: &MatchSnapshot) -> Result<Option<SpellId>> {
        let combatant = snapshot.combatant(side);
        let mut picker = self.picker.lock().unwrap_or_else(PoisonError::into_inner);
        let Picker { policy, rng } = &mut *picker;
        let choice = policy.choose(combatant, &self.catalog, rng);

        tracing::debug!(
            target: "runtime::opponent",
            side = %side,
            choice = ?choice,
            "Opponent policy picked a spell"
        );
        Ok(choice)
    }
}
