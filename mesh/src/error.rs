//! Mesh decoding error types.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that abort decoding of a face set.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("Unsupported face set encoding {type_name} on {instance}")]
    UnsupportedEncoding { instance: String, type_name: String },

    #[error("Malformed topology on {instance}: {message}")]
    Malformed { instance: String, message: String },
}

impl MeshError {
    pub fn unsupported_encoding(instance: impl ToString, type_name: impl Into<String>) -> Self {
        Self::UnsupportedEncoding {
            instance: instance.to_string(),
            type_name: type_name.into(),
        }
    }

    pub fn malformed(instance: impl ToString, message: impl Into<String>) -> Self {
        Self::Malformed {
            instance: instance.to_string(),
            message: message.into(),
        }
    }
}
