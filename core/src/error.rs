//! Common error types for model access.

use crate::InstanceId;
use thiserror::Error;

/// Errors that can occur while building or reading a model snapshot.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Instance not found.
    #[error("Instance not found: {0}")]
    InstanceNotFound(InstanceId),

    /// Instance id already taken.
    #[error("Duplicate instance id: {0}")]
    DuplicateInstance(InstanceId),

    /// Entity type not declared in the schema.
    #[error("Unknown entity type: {0}")]
    UnknownType(String),

    /// Entity type declared abstract in the schema.
    #[error("Cannot instantiate abstract type: {0}")]
    AbstractType(String),

    /// Reference to an instance that is not part of the snapshot.
    #[error("Dangling reference from {from} to {to}")]
    DanglingReference { from: InstanceId, to: InstanceId },
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
