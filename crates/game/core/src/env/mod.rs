//! Collaborators injected into the rules engine.
//!
//! The core owns no ambient resources; anything nondeterministic is handed in
//! from outside so a match can be replayed exactly under test.
mod rng;

pub use rng::{PcgRng, RngSource, ScriptedRng};
