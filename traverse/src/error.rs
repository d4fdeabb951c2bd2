//! Traversal error types.

use crate::traversal::Role;
use thiserror::Error;

/// Result type for traversal operations.
pub type TraverseResult<T> = Result<T, TraverseError>;

/// Configuration errors of a traversal or relationship check.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraverseError {
    #[error("Source and target role are both {role:?}")]
    SameRoles { role: Role },

    #[error("Unknown relationship: {name}")]
    UnknownRelationship { name: String },
}

impl TraverseError {
    pub fn same_roles(role: Role) -> Self {
        Self::SameRoles { role }
    }

    pub fn unknown_relationship(name: impl Into<String>) -> Self {
        Self::UnknownRelationship { name: name.into() }
    }
}
