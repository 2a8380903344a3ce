//! Error types for action declaration and resolution.

use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::spell::{CatalogError, SpellId};
use crate::state::{Outcome, Side};

/// Reasons a declaration or completion signal is rejected.
///
/// A rejection never mutates state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IllegalAction {
    #[error("the match is over ({outcome})")]
    MatchOver { outcome: Outcome },

    #[error("a cast by {side} is still resolving")]
    ResolutionInProgress { side: Side },

    #[error("it is {owner}'s turn, not {side}'s")]
    NotYourTurn { side: Side, owner: Side },

    #[error("{spell} is on cooldown for {remaining} more turn(s)")]
    OnCooldown { spell: SpellId, remaining: u8 },

    #[error("{side} has no potions left")]
    NoPotionsLeft { side: Side },

    #[error("{side} is not stunned")]
    NotStunned { side: Side },

    #[error("no cast is awaiting completion")]
    NotAnimating,
}

impl IllegalAction {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MatchOver { .. } => "ACTION_MATCH_OVER",
            Self::ResolutionInProgress { .. } => "ACTION_RESOLUTION_IN_PROGRESS",
            Self::NotYourTurn { .. } => "ACTION_NOT_YOUR_TURN",
            Self::OnCooldown { .. } => "ACTION_ON_COOLDOWN",
            Self::NoPotionsLeft { .. } => "ACTION_NO_POTIONS_LEFT",
            Self::NotStunned { .. } => "ACTION_NOT_STUNNED",
            Self::NotAnimating => "ACTION_NOT_ANIMATING",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ResolutionInProgress { .. } | Self::OnCooldown { .. } => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Validation,
        }
    }
}

/// Errors surfaced by the turn controller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("illegal action: {reason}")]
    Illegal {
        reason: IllegalAction,
        context: ErrorContext,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ExecuteError {
    pub(crate) fn illegal(reason: IllegalAction, context: ErrorContext) -> Self {
        Self::Illegal { reason, context }
    }

    /// The rejection reason, if this is an illegal-action error.
    pub fn reason(&self) -> Option<&IllegalAction> {
        match self {
            Self::Illegal { reason, .. } => Some(reason),
            Self::Catalog(_) => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Illegal { reason, .. } => reason.severity(),
            Self::Catalog(error) => error.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Illegal { context, .. } => Some(context),
            Self::Catalog(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Illegal { reason, .. } => reason.error_code(),
            Self::Catalog(error) => error.error_code(),
        }
    }
}
