//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! This module provides HTTP status code mappings for [`RepositoryError`] variants,
//! following the Functional Core pattern - pure functions with no side effects.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `MissingKey` -> 400 (Bad Request)
/// - `InvalidData` -> 400 (Bad Request)
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `TypeMismatch` / `MalformedValue` / `PaginationStalled` -> 500 (Internal Server Error)
/// - `Transport` -> 502 (Bad Gateway)
/// - `ConnectionFailed` / `Cancelled` -> 503 (Service Unavailable)
///
/// # Examples
///
/// ```
/// use inventory_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::AlreadyExists {
///     entity_type: "Product",
///     id: "9900000001/P001".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 409);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::MissingKey(_) => 400,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::TypeMismatch { .. } => 500,
        RepositoryError::MalformedValue { .. } => 500,
        RepositoryError::PaginationStalled => 500,
        RepositoryError::Transport(_) => 502,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::Cancelled => 503,
    }
}
