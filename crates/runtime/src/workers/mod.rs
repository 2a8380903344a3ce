//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker is the single owner of the turn controller; every
//! command and every animation completion is processed on its task.

mod simulation;

pub use simulation::{Command, DuelController, SimulationWorker};
