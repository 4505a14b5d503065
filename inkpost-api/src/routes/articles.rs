/// Article endpoints
///
/// Both routes sit behind the bearer guard: callers must present a valid
/// token, and the guard injects the resolved user. The creator of a new
/// article is always the authenticated user; clients cannot create
/// articles on someone else's behalf.
///
/// # Endpoints
///
/// - `POST /articles` - create an article (creator = authenticated user)
/// - `GET /articles/:id` - an article with its author embedded

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use inkpost_shared::models::article::{Article, CreateArticle};

use crate::{
    app::{AppState, CurrentUser},
    error::ApiResult,
    routes::validation_error,
};

/// Article creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateArticleRequest {
    /// Title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Body text
    pub content: String,

    /// Whether the article is published
    pub published: bool,
}

/// Author fields embedded in an article response
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthorResponse {
    /// User id
    pub id: Uuid,

    /// Username
    pub username: String,
}

/// An article with its author
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleResponse {
    /// Article id
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Body text
    pub content: String,

    /// Whether the article is published
    pub published: bool,

    /// The creating user
    pub author: AuthorResponse,
}

impl ArticleResponse {
    fn new(article: Article, author: AuthorResponse) -> Self {
        Self {
            id: article.id,
            title: article.title,
            content: article.content,
            published: article.published,
            author,
        }
    }
}

/// Create an article
///
/// The authenticated user becomes the creator.
pub async fn create_article(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateArticleRequest>,
) -> ApiResult<Json<ArticleResponse>> {
    req.validate().map_err(validation_error)?;

    let article = state
        .articles
        .create(CreateArticle {
            title: req.title,
            content: req.content,
            published: req.published,
            user_id: current.0.id,
        })
        .await?;

    tracing::info!(article_id = %article.id, user_id = %current.0.id, "created article");

    let author = AuthorResponse {
        id: current.0.id,
        username: current.0.username,
    };

    Ok(Json(ArticleResponse::new(article, author)))
}

/// Fetch an article by id, with its author embedded
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ArticleResponse>> {
    let article = state.articles.get_by_id(id).await?;
    let user = state.users.get_by_id(article.user_id).await?;

    let author = AuthorResponse {
        id: user.id,
        username: user.username,
    };

    Ok(Json(ArticleResponse::new(article, author)))
}
