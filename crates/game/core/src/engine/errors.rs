//! Error types for the scheduler.

use crate::action::{ActionError, RegistryError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Errors surfaced while driving a tick.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchedulerError {
    #[error("actor {0} is already scheduled")]
    DuplicateActor(EntityId),

    #[error("actor {0} is not scheduled")]
    UnknownActor(EntityId),

    #[error("actor {actor} has no action in progress to interrupt")]
    NothingToInterrupt { actor: EntityId },

    #[error("action failed for actor {actor}: {source}")]
    Action {
        actor: EntityId,
        #[source]
        source: ActionError,
    },

    #[error("action provider failed for actor {actor}: {source}")]
    Provider {
        actor: EntityId,
        #[source]
        source: RegistryError,
    },
}

impl SchedulerError {
    pub fn action(actor: EntityId, source: ActionError) -> Self {
        Self::Action { actor, source }
    }

    pub fn provider(actor: EntityId, source: RegistryError) -> Self {
        Self::Provider { actor, source }
    }
}

impl GameError for SchedulerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SchedulerError::DuplicateActor(_) | SchedulerError::UnknownActor(_) => {
                ErrorSeverity::Validation
            }
            SchedulerError::NothingToInterrupt { .. } => ErrorSeverity::Recoverable,
            SchedulerError::Action { source, .. } => source.severity(),
            SchedulerError::Provider { source, .. } => source.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SchedulerError::DuplicateActor(_) => "SCHEDULER_DUPLICATE_ACTOR",
            SchedulerError::UnknownActor(_) => "SCHEDULER_UNKNOWN_ACTOR",
            SchedulerError::NothingToInterrupt { .. } => "SCHEDULER_NOTHING_TO_INTERRUPT",
            SchedulerError::Action { source, .. } => source.error_code(),
            SchedulerError::Provider { source, .. } => source.error_code(),
        }
    }
}
