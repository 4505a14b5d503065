/// User account record
///
/// Users are the credential records behind the login flow. The store
/// guarantees that usernames are unique; passwords are kept only as
/// Argon2id digests, never in plaintext.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(64) NOT NULL UNIQUE,
///     email VARCHAR(255) NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4), assigned by the store on creation
    pub id: Uuid,

    /// Username, unique across all users
    pub username: String,

    /// Email address
    pub email: String,

    /// Argon2id password digest
    ///
    /// Never serialized outward; response types in the API layer expose
    /// only the public fields.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
///
/// The password arrives here already hashed; hashing happens in the API
/// layer so the store never sees a plaintext password.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Username (must be unique)
    pub username: String,

    /// Email address
    pub email: String,

    /// Argon2id password digest (NOT the plaintext password)
    pub password_hash: String,
}

/// Input for updating an existing user
///
/// Only `Some` fields are written; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    /// New username (must stay unique)
    pub username: Option<String>,

    /// New email address
    pub email: Option<String>,

    /// New password digest
    pub password_hash: Option<String>,
}

impl UpdateUser {
    /// True when the update carries no changes at all
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}
