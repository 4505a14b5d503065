/// Error handling for the API server
///
/// A unified error type that maps to HTTP responses. Handlers return
/// `Result<T, ApiError>` which converts to the appropriate status code
/// via `IntoResponse`.
///
/// Two variants deliberately hide their cause from the client:
///
/// - [`ApiError::InvalidCredentials`] covers both "unknown username" and
///   "wrong password" at login, with a single status and message, so the
///   endpoint cannot be used to enumerate valid usernames. It surfaces as
///   `404`, matching the behavior of the system this replaces.
/// - [`ApiError::Unauthenticated`] covers every failure of the bearer
///   guard (missing, malformed, badly signed, expired, or unresolvable
///   token) uniformly as `401` with a `WWW-Authenticate: Bearer` header.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use inkpost_shared::auth::password::PasswordError;
use inkpost_shared::auth::token::TokenError;
use inkpost_shared::store::StoreError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Bearer guard rejection (401 + WWW-Authenticate header)
    Unauthenticated,

    /// Login rejection (404, single message for either failure)
    InvalidCredentials,

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - duplicate username
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "unauthenticated")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthenticated => write!(f, "Unauthenticated"),
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The guard's rejection carries the challenge header required for
        // bearer authentication.
        if let ApiError::Unauthenticated = self {
            let body = Json(ErrorResponse {
                error: "unauthenticated".to_string(),
                message: "not authenticated".to_string(),
                details: None,
            });

            let mut response = (StatusCode::UNAUTHORIZED, body).into_response();
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer"),
            );
            return response;
        }

        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthenticated => unreachable!("handled above"),
            ApiError::InvalidCredentials => (
                StatusCode::NOT_FOUND,
                "invalid_credentials",
                "invalid credentials".to_string(),
                None,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            StoreError::Conflict => ApiError::Conflict("Username already taken".to_string()),
            StoreError::Database(e) => ApiError::InternalError(format!("Database error: {}", e)),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert token issuance errors to API errors
///
/// Token *verification* failures never take this path; the guard collapses
/// them into `Unauthenticated` itself.
impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::InternalError(format!("Token operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidCredentials.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("dup".to_string()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::InternalError("boom".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthenticated_carries_challenge_header() {
        let response = ApiError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            ApiError::from(StoreError::NotFound),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(StoreError::Conflict),
            ApiError::Conflict(_)
        ));
    }
}
