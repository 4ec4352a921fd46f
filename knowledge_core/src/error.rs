//! Error types for knowledge base operations.

use thiserror::Error;

/// Errors returned by the knowledge store.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// The question word is not one of who/what/where/when/why/how.
    #[error("I don't understand \"{0}\".")]
    InvalidIntent(String),

    /// No fact is filed under this intent and entity.
    #[error("no answer known for {intent} {entity}")]
    NotFound { intent: String, entity: String },

    /// Reading or writing a knowledge file failed.
    #[error("knowledge file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl KnowledgeError {
    /// Whether this is a lookup miss, the one error the learn flow recovers from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, KnowledgeError::NotFound { .. })
    }
}

/// Result alias for knowledge base operations.
pub type Result<T> = std::result::Result<T, KnowledgeError>;

/// Errors that end an interactive session.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("line editor failed: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),

    #[error("cannot write to the terminal: {0}")]
    Io(#[from] std::io::Error),
}
