//! Runtime orchestration for a turn-based spell duel.
//!
//! This crate wires together the presentation port, the opponent action
//! provider, and the simulation worker into a cohesive runtime API. Consumers
//! embed [`DuelRuntime`] to host a match, subscribe to events, and declare
//! spells through [`DuelHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] holds the built-in opponent providers
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, DuelHandle, InstantPresenter, PresentationPort, Result, RuntimeError,
    ScriptedProvider,
};
pub use events::{Event, EventBus, MatchEvent, Topic};
pub use providers::{EntropySource, RandomOpponentProvider};
pub use runtime::{DuelRuntime, DuelRuntimeBuilder, RuntimeConfig};
