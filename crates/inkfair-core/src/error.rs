//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Repository and codec errors are never caught and hidden inside the core;
/// they propagate to the use-case orchestrator and from there to the caller.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A malformed domain identifier was presented to the codec.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// A data-integrity failure on write. `field` carries the violated
    /// column when it can be derived from the constraint name.
    #[error("constraint violation: {message}")]
    ConstraintViolation {
        /// The violated field, when determinable.
        field: Option<String>,
        /// Description of the violated constraint.
        message: String,
    },

    /// A backing service (the relational store or the task queue) could
    /// not be reached or failed mid-operation. Surfaced as-is; retry
    /// policy belongs to the surrounding infrastructure.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A synchronous event handler failed while the publisher was waiting.
    #[error("handler {handler} failed for event {event}: {message}")]
    HandlerFailure {
        /// The failing handler's name.
        handler: String,
        /// The event name being delivered.
        event: String,
        /// The handler's error message.
        message: String,
    },
}
