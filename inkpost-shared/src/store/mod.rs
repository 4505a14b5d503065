/// Repository traits and backends
///
/// The orchestration layer (login endpoint, bearer guard, CRUD handlers)
/// talks to storage only through these traits, constructed once at startup
/// and injected into the application state. Two backends exist:
///
/// - [`postgres`]: sqlx-backed Postgres stores for production
/// - [`memory`]: in-memory stores for tests and local demos
///
/// All operations are atomic at single-record granularity. Conflicting
/// writes to the same record serialize at the backend's native granularity
/// (row-level in Postgres, a write lock in memory); no additional
/// application-level locking exists above this layer.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::article::{Article, CreateArticle};
use crate::models::user::{CreateUser, UpdateUser, User};

pub mod memory;
pub mod postgres;

pub use memory::{MemoryArticleStore, MemoryCredentialStore};
pub use postgres::{PgArticleStore, PgCredentialStore};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with the given id/username
    #[error("record not found")]
    NotFound,

    /// Unique constraint violated (duplicate username)
    #[error("username already taken")]
    Conflict,

    /// Backend failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence of user credential records
///
/// Owns the `User` records exclusively; callers hold at most a
/// request-scoped snapshot of a record.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// [`StoreError::Conflict`] if the username already exists.
    async fn create(&self, data: CreateUser) -> Result<User, StoreError>;

    /// Looks a user up by id
    async fn get_by_id(&self, id: Uuid) -> Result<User, StoreError>;

    /// Looks a user up by username
    async fn get_by_username(&self, username: &str) -> Result<User, StoreError>;

    /// Lists all users
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Updates a user in place
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the id is unknown;
    /// [`StoreError::Conflict`] if a username change collides.
    async fn update(&self, id: Uuid, data: UpdateUser) -> Result<User, StoreError>;

    /// Deletes a user
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the id is unknown.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Persistence of article records
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Creates a new article
    async fn create(&self, data: CreateArticle) -> Result<Article, StoreError>;

    /// Looks an article up by id
    async fn get_by_id(&self, id: Uuid) -> Result<Article, StoreError>;

    /// Lists the articles created by a user
    async fn list_by_author(&self, user_id: Uuid) -> Result<Vec<Article>, StoreError>;
}
