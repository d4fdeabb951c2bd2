//! Rule error types.

use bimv_constraint::ConstraintError;
use bimv_mesh::MeshError;
use bimv_traverse::TraverseError;
use thiserror::Error;

/// Result type for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;

/// Errors that abort the evaluation of a rule.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Mesh error: {0}")]
    Mesh(MeshError),

    #[error("Traversal error: {0}")]
    Traverse(TraverseError),

    #[error("Constraint error: {0}")]
    Constraint(ConstraintError),

    #[error("Invalid rule definition: {message}")]
    InvalidDefinition { message: String },

    #[error("Rendering failed: {message}")]
    RenderFailed { message: String },
}

impl RuleError {
    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            message: message.into(),
        }
    }

    pub fn render_failed(message: impl Into<String>) -> Self {
        Self::RenderFailed {
            message: message.into(),
        }
    }
}

impl From<MeshError> for RuleError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}

impl From<TraverseError> for RuleError {
    fn from(e: TraverseError) -> Self {
        Self::Traverse(e)
    }
}

impl From<ConstraintError> for RuleError {
    fn from(e: ConstraintError) -> Self {
        Self::Constraint(e)
    }
}
