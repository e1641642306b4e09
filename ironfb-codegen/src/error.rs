//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema validation error.
    #[error("schema error: {0}")]
    Schema(#[from] ironfb_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A type shape the emitters have no rendering for.
    #[error("cannot represent field '{field}' of '{declaration}': {reason}")]
    Unrepresentable {
        /// Owning struct or table.
        declaration: String,
        /// Field name.
        field: String,
        /// What makes the field unrepresentable.
        reason: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an unrepresentable field error.
    pub fn unrepresentable(
        declaration: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Unrepresentable {
            declaration: declaration.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}
