//! Deterministic duel rules shared by the runtime and any frontend.
//!
//! `duel-core` defines the canonical rules (spell catalog, combatants, effect
//! resolution, turn sequencing) and exposes pure APIs with an injectable
//! random source. All state mutation during play flows through
//! [`engine::TurnController`], and supporting crates depend on the types
//! re-exported here.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod policy;
pub mod spell;
pub mod state;

pub use combat::{EffectFlags, EffectKind, EffectOutcome, resolve};
pub use config::DuelConfig;
pub use engine::{
    CastRequest, Declaration, DuelEvent, ExecuteError, IllegalAction, MatchSnapshot, Phase,
    TurnController, TurnReport,
};
pub use env::{PcgRng, RngSource, ScriptedRng};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use policy::{OpponentPolicy, RandomReadyPolicy, choose_action};
pub use spell::{CatalogError, Spell, SpellCatalog, SpellId, SpellKind};
pub use state::{
    Combatant, Cooldown, Cooldowns, MatchLog, MatchState, Outcome, PoisonTick, Side,
    StatusEffects, StatusKind,
};
