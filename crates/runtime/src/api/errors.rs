//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, rule rejections, and action
//! providers so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use duel_core::{ExecuteError, IllegalAction, Side};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("{side} action provider failed: {message}")]
    Provider { side: Side, message: String },
}

impl RuntimeError {
    /// Rule rejection behind this error, if the controller refused the call.
    pub fn illegal_action(&self) -> Option<&IllegalAction> {
        match self {
            Self::Execute(error) => error.reason(),
            _ => None,
        }
    }
}
