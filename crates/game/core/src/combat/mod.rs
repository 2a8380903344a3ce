//! Spell effect resolution.
//!
//! Pure given its random source: [`resolve`] computes and applies the direct
//! consequence of one cast. Post-effects (poison ticks, cooldown decay) and
//! terminal checks belong to the turn controller.
mod resolve;

pub use resolve::{EffectFlags, EffectKind, EffectOutcome, resolve};
