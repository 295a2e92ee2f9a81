//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors for business rule violations.
///
/// The `Display` text of each variant is the message clients receive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("{0}")]
    Validation(String),

    /// A path identifier could not be parsed
    #[error("Invalid {0} ID")]
    InvalidId(String),

    /// Entity not found
    #[error("{0} not found")]
    NotFound(String),

    /// Entity already exists (conflict)
    #[error("{0} already exists")]
    Conflict(String),

    /// Student already holds an application for the job
    #[error("Already applied to this job")]
    AlreadyApplied,

    /// An offer already exists for the (job, student) pair
    #[error("An offer already exists for this student and job")]
    DuplicateOffer,

    /// The entity is in a state that forbids the operation
    #[error("{0}")]
    InvalidState(String),

    /// Caller does not own the resource
    #[error("Not authorized to {0}")]
    NotAuthorized(String),

    /// Caller's role may not perform the action
    #[error("Access denied")]
    Forbidden,

    /// Invalid credentials provided
    #[error("Invalid Credentials")]
    InvalidCredentials,

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create a conflict error
    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        DomainError::InvalidState(msg.into())
    }

    /// Create an ownership error
    pub fn not_authorized(action: impl Into<String>) -> Self {
        DomainError::NotAuthorized(action.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Parse a path identifier, naming the entity in the error.
///
/// `parse_id("abc", "job")` fails with "Invalid job ID".
pub fn parse_id(raw: &str, entity: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::InvalidId(entity.to_string()))
}
