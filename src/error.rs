//! Error types shared across the quiz core and its loaders.

use std::path::PathBuf;

use thiserror::Error;

/// Recoverable validation failures surfaced to the player.
///
/// None of these end a session; the quiz keeps the most recent one as its
/// visible error until the next successful change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("wrong password, try again")]
    WrongPassword,
    #[error("enter a name before giving up on a question")]
    EmptyName,
    #[error("preview duration must be at least one second (got {0})")]
    InvalidDuration(i64),
}

/// Errors loading a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("unknown question bank `{0}`")]
    UnknownBank(String),
    #[error("failed to read question bank {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("question bank is not valid json")]
    Parse(#[from] serde_json::Error),
    #[error("question bank `{0}` has no entries")]
    Empty(String),
}

/// Errors persisting the settings file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}
