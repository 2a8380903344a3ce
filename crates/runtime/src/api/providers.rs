//! Asynchronous abstraction for sourcing the non-human side's intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the simulation
//! can run with the random policy, scripted fixtures, or anything smarter.
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use duel_core::{MatchSnapshot, Side, SpellId};

use super::errors::Result;

/// Trait for choosing a spell based on the current match snapshot.
///
/// Different implementations can handle:
/// - The random ready-spell policy
/// - Scripted/replayed duels
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide a spell for `side` to declare.
    ///
    /// `Ok(None)` means no action is available this cycle; the side passes
    /// until the runtime asks again.
    async fn provide_action(&self, side: Side, snapshot: &MatchSnapshot) -> Result<Option<SpellId>>;
}

/// Replays a fixed list of spells, then reports "no action".
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<SpellId>>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = SpellId>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_action(&self, _side: Side, _snapshot: &MatchSnapshot) -> Result<Option<SpellId>> {
        Ok(self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front())
    }
}
