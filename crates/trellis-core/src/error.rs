//! Error types for Trellis Core

use crate::limits::ValidationError;
use thiserror::Error;

/// Result type alias using Trellis's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Trellis error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Item not found: {0}")]
    IdNotExist(String),

    #[error("Item already exists: {0}")]
    IdExists(String),

    #[error("Link type not found: {0}")]
    TypeNotExist(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}
