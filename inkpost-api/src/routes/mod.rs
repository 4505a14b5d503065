/// API route handlers
///
/// Organized by resource:
///
/// - `health`: health check endpoint
/// - `auth`: the login endpoint (`POST /token`)
/// - `users`: user CRUD handlers
/// - `articles`: protected article handlers

pub mod articles;
pub mod auth;
pub mod health;
pub mod users;

use crate::error::{ApiError, ValidationErrorDetail};

/// Flattens validator output into the API error shape
pub(crate) fn validation_error(e: validator::ValidationErrors) -> ApiError {
    let errors: Vec<ValidationErrorDetail> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    ApiError::ValidationError(errors)
}
