use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
