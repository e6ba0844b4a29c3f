//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("selection session is closed")]
    SessionClosed,

    #[error("no tree file configured (use --tree or set tree_file)")]
    NoTreeFile,

    #[error("tree file not found: {0}")]
    TreeFileNotFound(PathBuf),

    #[error("invalid session state in {path}: {message}")]
    InvalidState { path: PathBuf, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
