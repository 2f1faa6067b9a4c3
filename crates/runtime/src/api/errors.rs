//! Unified error types surfaced by the runtime API.
//!
//! Wraps scheduler, registry and repository failures so clients can bubble
//! them up with consistent context.
use std::fmt;

use game_core::{EntityId, ErrorSeverity, GameError, RegistryError, SchedulerError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a world to be configured before building")]
    MissingWorld,

    #[error("entity {0} does not exist in the world")]
    UnknownEntity(EntityId),

    #[error("actor {0} is not registered with the runtime")]
    UnknownActor(EntityId),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::MissingWorld => ErrorSeverity::Fatal,
            RuntimeError::UnknownEntity(_) | RuntimeError::UnknownActor(_) => {
                ErrorSeverity::Validation
            }
            RuntimeError::Scheduler(err) => err.severity(),
            RuntimeError::Registry(err) => err.severity(),
            RuntimeError::Repository(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::MissingWorld => "RUNTIME_MISSING_WORLD",
            RuntimeError::UnknownEntity(_) => "RUNTIME_UNKNOWN_ENTITY",
            RuntimeError::UnknownActor(_) => "RUNTIME_UNKNOWN_ACTOR",
            RuntimeError::Scheduler(err) => err.error_code(),
            RuntimeError::Registry(err) => err.error_code(),
            RuntimeError::Repository(err) => err.error_code(),
        }
    }
}

/// Who is deciding for an actor when its queue runs dry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Player,
    Npc,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Npc => "npc",
        };
        write!(f, "{}", label)
    }
}
