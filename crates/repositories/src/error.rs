use common::EntityId;
use thiserror::Error;

/// Errors that can occur when interacting with a repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An entity with the same id is already stored.
    #[error("{entity} already exists: {id}")]
    Conflict { entity: &'static str, id: EntityId },

    /// Another entity already holds a value that must be unique.
    #[error("{entity} with {field} {value} already exists")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// The entity to save, patch or delete is not stored.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },

    /// The storage backend failed.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
