//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree contract.
///
/// The selection engine itself is total; these errors are raised only
/// when building a model from caller-supplied definitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    #[error("invalid node {id:?}: {message}")]
    InvalidNode { id: String, message: String },

    #[error("invalid tree definition: {message}")]
    InvalidDefinition { message: String },
}
