//! Service-level error taxonomy for the notes API.

use serde::Serialize;
use thiserror::Error;

use crate::repository::RepositoryError;

/// A single failed validation check, reported to the caller by field name.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field is missing or empty at creation (HTTP 400).
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    /// The caller does not own the target note (HTTP 401).
    #[error("caller is not the note's owner")]
    Authorization,
    /// No note with the given id (HTTP 404).
    #[error("note not found")]
    NotFound,
    /// Another note already holds this title.
    #[error("duplicate note title")]
    Conflict,
    /// Unexpected storage failure. Detail is logged server-side only.
    #[error("{0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::DuplicateTitle => ServiceError::Conflict,
            RepositoryError::Storage(detail) => ServiceError::Internal(detail),
        }
    }
}
