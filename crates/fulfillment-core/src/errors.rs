//! Shared error types

use thiserror::Error;

use crate::validation::FieldErrors;

/// Core errors shared between the engine and the surrounding application
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("invalid date or time: {0}")]
    InvalidDateTime(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Field-level messages when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            CoreError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
