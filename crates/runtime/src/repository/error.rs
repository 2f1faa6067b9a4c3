//! Error types raised by repository implementations.

use game_core::{ErrorSeverity, GameError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("queue repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("invalid slot name '{0}'")]
    InvalidSlot(String),

    #[error("inconsistent queue snapshot: {0}")]
    InvalidSnapshot(String),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RepositoryError::Io(_) => ErrorSeverity::Recoverable,
            RepositoryError::InvalidSlot(_)
            | RepositoryError::Json(_)
            | RepositoryError::InvalidSnapshot(_) => ErrorSeverity::Validation,
            RepositoryError::LockPoisoned => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RepositoryError::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            RepositoryError::Io(_) => "REPOSITORY_IO",
            RepositoryError::Json(_) => "REPOSITORY_JSON",
            RepositoryError::InvalidSlot(_) => "REPOSITORY_INVALID_SLOT",
            RepositoryError::InvalidSnapshot(_) => "REPOSITORY_INVALID_SNAPSHOT",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
