//! Action provider implementations for the non-human side.

pub mod opponent;

pub use opponent::{EntropySource, RandomOpponentProvider};
