//! Form error types.
//!
//! Registration problems are reported as structured errors with a
//! user-facing message and an optional hint. Validation failures are not
//! errors; they are the message lists stored per field.

use thiserror::Error;
use wlf_model::{FieldId, ModelError};

/// Form operation error.
#[derive(Debug, Error)]
pub enum FormError {
    /// A custom prop collides with a key the engine injects itself.
    #[error("'{key}' is a reserved prop and cannot be passed to a field")]
    ReservedProp { key: String },

    /// The accessor or path does not address any slot below the root.
    #[error("field path is empty; a field cannot be bound to the whole form state")]
    EmptyFieldPath,

    /// The handle refers to a field that is no longer registered.
    #[error("field {id} is not registered")]
    UnknownField { id: FieldId },

    /// A regular expression given as a pattern failed to compile.
    #[error("invalid pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A dotted path could not be parsed.
    #[error(transparent)]
    InvalidPath(#[from] ModelError),
}

impl FormError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::ReservedProp { key } => {
                format!("The prop '{key}' is managed by the form and cannot be set on a field.")
            }
            Self::EmptyFieldPath => {
                "The field does not point at any value inside the form state.".to_string()
            }
            Self::UnknownField { id } => {
                format!("The field {id} has been unregistered from the form.")
            }
            Self::InvalidPattern { pattern, source } => {
                format!("The pattern '{pattern}' is not a valid regular expression: {source}")
            }
            Self::InvalidPath(ModelError::InvalidPath { path, reason }) => {
                format!("The path '{path}' is not valid: {reason}")
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ReservedProp { .. } => Some(
                "Rename the prop; value, errors, onChangeValue, onFocus and onBlur are reserved."
                    .into(),
            ),
            Self::EmptyFieldPath => {
                Some("Access at least one property in the accessor, e.g. `s.key(\"name\")`.".into())
            }
            Self::UnknownField { .. } => Some("Register the field again before using it.".into()),
            Self::InvalidPattern { .. } => None,
            Self::InvalidPath(_) => Some("Use dot-separated keys such as `profile.name`.".into()),
        }
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
