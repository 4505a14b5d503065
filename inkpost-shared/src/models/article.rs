/// Article record
///
/// Articles are simple demo records with a foreign reference to the user
/// who created them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE articles (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     content TEXT NOT NULL,
///     published BOOLEAN NOT NULL DEFAULT FALSE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An article authored by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    /// Unique article ID (UUID v4), assigned by the store on creation
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Body text
    pub content: String,

    /// Whether the article is published
    pub published: bool,

    /// The user who created the article
    pub user_id: Uuid,

    /// When the article was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new article
#[derive(Debug, Clone)]
pub struct CreateArticle {
    /// Title
    pub title: String,

    /// Body text
    pub content: String,

    /// Whether the article is published
    pub published: bool,

    /// The creating user
    pub user_id: Uuid,
}
