/// User CRUD endpoints
///
/// # Endpoints
///
/// - `POST /user` - register a new user
/// - `GET /user` - list users
/// - `GET /user/me` - the authenticated identity (protected)
/// - `GET /user/:id` - a user's profile including their articles
/// - `PUT /user/:id` - update username/email/password
/// - `DELETE /user/:id` - delete a user

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use inkpost_shared::auth::password;
use inkpost_shared::models::article::Article;
use inkpost_shared::models::user::{CreateUser, UpdateUser, User};

use crate::{
    app::{AppState, CurrentUser},
    error::ApiResult,
    routes::validation_error,
};

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (hashed before storage)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Update request; omitted fields keep their current value
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRequest {
    /// New username
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// New password (hashed before storage)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// Public view of a user
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// User id
    pub id: Uuid,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// A user's profile with their articles embedded
#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfileResponse {
    /// User id
    pub id: Uuid,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// Articles created by this user
    pub articles: Vec<ArticleSummary>,
}

/// Article fields shown inside a user profile
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleSummary {
    /// Article id
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Whether the article is published
    pub published: bool,
}

impl From<Article> for ArticleSummary {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            published: article.published,
        }
    }
}

/// Deletion acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Always true on success
    pub deleted: bool,
}

/// Register a new user
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `409 Conflict`: username already exists
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate().map_err(validation_error)?;

    let password_hash = password::hash_password(&req.password)?;

    let user = state
        .users
        .create(CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "registered user");

    Ok(Json(user.into()))
}

/// List all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// The authenticated identity, as resolved by the bearer guard
pub async fn get_me(Extension(current): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(current.0.into())
}

/// A user's profile including their articles
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserProfileResponse>> {
    let user = state.users.get_by_id(id).await?;
    let articles = state.articles.list_by_author(user.id).await?;

    Ok(Json(UserProfileResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        articles: articles.into_iter().map(ArticleSummary::from).collect(),
    }))
}

/// Update a user in place
///
/// A supplied password is hashed before it reaches the store.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate().map_err(validation_error)?;

    let password_hash = match req.password {
        Some(ref plaintext) => Some(password::hash_password(plaintext)?),
        None => None,
    };

    let user = state
        .users
        .update(
            id,
            UpdateUser {
                username: req.username,
                email: req.email,
                password_hash,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    state.users.delete(id).await?;

    tracing::info!(user_id = %id, "deleted user");

    Ok(Json(DeleteResponse { deleted: true }))
}
