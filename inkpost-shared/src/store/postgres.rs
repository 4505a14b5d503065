/// Postgres-backed stores
///
/// sqlx implementations of the repository traits. Unique-constraint
/// violations on the username column surface as [`StoreError::Conflict`];
/// missing rows surface as [`StoreError::NotFound`].

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ArticleStore, CredentialStore, StoreError};
use crate::models::article::{Article, CreateArticle};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Maps a sqlx error, turning username unique violations into `Conflict`
fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(constraint) = db_err.constraint() {
            if constraint.contains("username") {
                return StoreError::Conflict;
            }
        }
    }
    StoreError::Database(err)
}

/// Credential store backed by the `users` table
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Creates a store over an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, data: CreateUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn get_by_username(&self, username: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update(&self, id: Uuid, data: UpdateUser) -> Result<User, StoreError> {
        if data.is_empty() {
            return self.get_by_id(id).await;
        }

        // COALESCE keeps the current value for fields the caller left unset.
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        user.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

/// Article store backed by the `articles` table
#[derive(Clone)]
pub struct PgArticleStore {
    pool: PgPool,
}

impl PgArticleStore {
    /// Creates a store over an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn create(&self, data: CreateArticle) -> Result<Article, StoreError> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (title, content, published, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, published, user_id, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.content)
        .bind(data.published)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(article)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Article, StoreError> {
        sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, content, published, user_id, created_at
            FROM articles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn list_by_author(&self, user_id: Uuid) -> Result<Vec<Article>, StoreError> {
        let articles = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, content, published, user_id, created_at
            FROM articles
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(articles)
    }
}
