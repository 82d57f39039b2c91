//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} '{key}'")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    /// A single query parameter could not be interpreted.
    #[error("Invalid query parameter '{field}': {message}")]
    InvalidQuery {
        field: &'static str,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found(slug: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Post",
            key: slug.into(),
        }
    }

    pub fn invalid_query(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            field,
            message: message.into(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => DomainError::Internal(other.to_string()),
        }
    }
}
