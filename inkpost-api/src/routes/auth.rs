/// The login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /token
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice&password=secret123
/// ```
///
/// # Response
///
/// ```json
/// {
///   "access_token": "eyJ...",
///   "token_expires": "2026-01-01T12:30:00Z",
///   "token_type": "bearer",
///   "user_id": "uuid",
///   "username": "alice"
/// }
/// ```
///
/// # Errors
///
/// A miss on the username lookup and a failed password check both return
/// the identical `404 invalid credentials` response, so the endpoint
/// cannot be probed for which usernames exist.

use axum::{extract::State, Form, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inkpost_shared::auth::password;
use inkpost_shared::store::StoreError;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Login form body
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Username
    pub username: String,

    /// Plaintext password (verified, never stored)
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed bearer token
    pub access_token: String,

    /// When the token expires
    pub token_expires: DateTime<Utc>,

    /// Always "bearer"
    pub token_type: String,

    /// The authenticated user's id
    pub user_id: Uuid,

    /// The authenticated user's name
    pub username: String,
}

/// Login handler
///
/// Single synchronous attempt per call: look the user up, verify the
/// password, mint a token. No retries.
pub async fn get_token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state
        .users
        .get_by_username(&form.username)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::InvalidCredentials,
            other => other.into(),
        })?;

    if !password::verify_password(&form.password, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let (access_token, token_expires) = state.issuer.issue(&user.username, Utc::now())?;

    tracing::debug!(user_id = %user.id, "issued access token");

    Ok(Json(TokenResponse {
        access_token,
        token_expires,
        token_type: "bearer".to_string(),
        user_id: user.id,
        username: user.username,
    }))
}
