//! Cloneable façade for issuing commands to the runtime.
//!
//! [`DuelHandle`] hides channel plumbing and offers async helpers for
//! declaring spells, resetting the match, or streaming events from specific
//! topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use duel_core::{CatalogError, ExecuteError, MatchSnapshot, Side, SpellId};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct DuelHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl DuelHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Declare a spell for `side`.
    ///
    /// Resolves once the controller accepted or rejected the declaration; the
    /// cast itself resolves after the presenter finishes its animation and is
    /// reported on the event bus.
    pub async fn declare_action(&self, side: Side, spell: SpellId) -> Result<()> {
        self.request(|reply| Command::DeclareAction { side, spell, reply })
            .await?
    }

    /// Declare a spell by its presentation identifier (`"fireball"`, `"zap"`, ...).
    pub async fn declare_named(&self, side: Side, name: &str) -> Result<()> {
        let spell = name
            .trim()
            .parse::<SpellId>()
            .map_err(|_| ExecuteError::from(CatalogError::UnknownSpell(name.trim().to_owned())))?;
        self.declare_action(side, spell).await
    }

    /// Discard the match and start a fresh one.
    pub async fn reset(&self) -> Result<MatchSnapshot> {
        self.request(|reply| Command::Reset { reply }).await
    }

    /// Spells `side` may declare right now.
    pub async fn legal_actions(&self, side: Side) -> Result<Vec<SpellId>> {
        self.request(|reply| Command::LegalActions { side, reply })
            .await
    }

    /// Stun `side`; its next action attempt is lost.
    pub async fn stun(&self, side: Side) -> Result<()> {
        self.request(|reply| Command::Stun { side, reply }).await?
    }

    /// Query the current match (read-only snapshot)
    pub async fn query_state(&self) -> Result<MatchSnapshot> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Match` - State snapshots, match results, rejected declarations
    /// - `Topic::Combat` - Casts, damage, heals, status changes, turn changes
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use duel_runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Render combat events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
