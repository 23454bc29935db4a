//! # Dialog Errors
//!
//! Failures raised while a wizard step talks to its collaborators.
//! None of them is fatal: they only ever end the affected user's wizard.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DialogError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// Posting a message or looking up a user failed
    #[error("messaging error: {0}")]
    Messaging(String),

    /// The team repository rejected a read or a mutation
    #[error("repository error: {0}")]
    Repository(String),

    /// The configured report schedule could not be parsed
    #[error("schedule error: {0}")]
    Schedule(String),
}
