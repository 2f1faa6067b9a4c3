//! Error types for action construction and lifecycle misuse.
//!
//! These never describe a command that "did not work": that is data, carried
//! by [`StateResult`](crate::StateResult) and [`ReasonBool`](crate::ReasonBool).
//! They describe callers driving the engine in a way it cannot honour.

use crate::action::types::ActionState;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while driving a single action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// `advance` was called on an action that already reached `Processed`.
    #[error("action '{key}' is already processed")]
    AlreadyProcessed { key: String },

    /// Interruption was requested outside the `InProgress` state.
    #[error("action '{key}' cannot be interrupted while {state}")]
    NotInterruptible { key: String, state: ActionState },

    /// Identity fields were mutated after the action left `PreBegin`.
    #[error("identity of action '{key}' is frozen while {state}")]
    IdentityFrozen { key: String, state: ActionState },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::AlreadyProcessed { .. } | ActionError::IdentityFrozen { .. } => {
                ErrorSeverity::Internal
            }
            ActionError::NotInterruptible { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::AlreadyProcessed { .. } => "ACTION_ALREADY_PROCESSED",
            ActionError::NotInterruptible { .. } => "ACTION_NOT_INTERRUPTIBLE",
            ActionError::IdentityFrozen { .. } => "ACTION_IDENTITY_FROZEN",
        }
    }
}

/// Errors raised by the action registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    /// No command type is registered under the key.
    #[error("no action registered under '{0}'")]
    UnknownAction(String),

    /// A command type was registered twice under the same key.
    #[error("action '{0}' is already registered")]
    DuplicateKey(String),
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RegistryError::UnknownAction(_) => ErrorSeverity::Validation,
            RegistryError::DuplicateKey(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RegistryError::UnknownAction(_) => "REGISTRY_UNKNOWN_ACTION",
            RegistryError::DuplicateKey(_) => "REGISTRY_DUPLICATE_KEY",
        }
    }
}
