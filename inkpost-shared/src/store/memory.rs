/// In-memory stores
///
/// HashMap-backed implementations of the repository traits. Used by the
/// integration tests (no database required) and handy for local demos.
/// A tokio `RwLock` around each map gives the same single-record
/// atomicity the Postgres backend gets from row locking.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ArticleStore, CredentialStore, StoreError};
use crate::models::article::{Article, CreateArticle};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Credential store kept entirely in memory
#[derive(Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create(&self, data: CreateUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == data.username) {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_by_username(&self, username: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn update(&self, id: Uuid, data: UpdateUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if let Some(ref username) = data.username {
            if users.values().any(|u| u.id != id && &u.username == username) {
                return Err(StoreError::Conflict);
            }
        }

        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(username) = data.username {
            user.username = username;
        }
        if let Some(email) = data.email {
            user.email = email;
        }
        if let Some(password_hash) = data.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

/// Article store kept entirely in memory
#[derive(Default)]
pub struct MemoryArticleStore {
    articles: RwLock<HashMap<Uuid, Article>>,
}

impl MemoryArticleStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn create(&self, data: CreateArticle) -> Result<Article, StoreError> {
        let article = Article {
            id: Uuid::new_v4(),
            title: data.title,
            content: data.content,
            published: data.published,
            user_id: data.user_id,
            created_at: Utc::now(),
        };

        self.articles
            .write()
            .await
            .insert(article.id, article.clone());

        Ok(article)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Article, StoreError> {
        self.articles
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_by_author(&self, user_id: Uuid) -> Result<Vec<Article>, StoreError> {
        let mut articles: Vec<Article> = self
            .articles
            .read()
            .await
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        articles.sort_by_key(|a| a.created_at);
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_alice() -> CreateUser {
        CreateUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let store = MemoryCredentialStore::new();
        let user = store.create(create_alice()).await.unwrap();

        let by_id = store.get_by_id(user.id).await.unwrap();
        assert_eq!(by_id.username, "alice");

        let by_username = store.get_by_username("alice").await.unwrap();
        assert_eq!(by_username.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryCredentialStore::new();
        store.create(create_alice()).await.unwrap();

        let result = store
            .create(CreateUser {
                username: "alice".to_string(),
                email: "other@example.com".to_string(),
                password_hash: "$argon2id$other".to_string(),
            })
            .await;

        assert!(matches!(result, Err(StoreError::Conflict)));
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let store = MemoryCredentialStore::new();

        assert!(matches!(
            store.get_by_id(Uuid::new_v4()).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.get_by_username("nobody").await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_user() {
        let store = MemoryCredentialStore::new();
        let user = store.create(create_alice()).await.unwrap();

        let updated = store
            .update(
                user.id,
                UpdateUser {
                    email: Some("alice@new.example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "alice@new.example.com");
        assert_eq!(updated.username, "alice");
    }

    #[tokio::test]
    async fn test_update_username_collision_conflicts() {
        let store = MemoryCredentialStore::new();
        store.create(create_alice()).await.unwrap();
        let bob = store
            .create(CreateUser {
                username: "bob".to_string(),
                email: "bob@example.com".to_string(),
                password_hash: "$argon2id$fake".to_string(),
            })
            .await
            .unwrap();

        let result = store
            .update(
                bob.id,
                UpdateUser {
                    username: Some("alice".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(StoreError::Conflict)));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let store = MemoryCredentialStore::new();
        let user = store.create(create_alice()).await.unwrap();

        store.delete(user.id).await.unwrap();
        assert!(matches!(
            store.get_by_id(user.id).await,
            Err(StoreError::NotFound)
        ));

        // Second delete misses
        assert!(matches!(
            store.delete(user.id).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_users() {
        let store = MemoryCredentialStore::new();
        assert!(store.list().await.unwrap().is_empty());

        store.create(create_alice()).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_articles_by_author() {
        let users = MemoryCredentialStore::new();
        let articles = MemoryArticleStore::new();
        let alice = users.create(create_alice()).await.unwrap();

        let article = articles
            .create(CreateArticle {
                title: "first post".to_string(),
                content: "hello".to_string(),
                published: true,
                user_id: alice.id,
            })
            .await
            .unwrap();

        let fetched = articles.get_by_id(article.id).await.unwrap();
        assert_eq!(fetched.title, "first post");

        let by_alice = articles.list_by_author(alice.id).await.unwrap();
        assert_eq!(by_alice.len(), 1);

        let by_other = articles.list_by_author(Uuid::new_v4()).await.unwrap();
        assert!(by_other.is_empty());
    }
}
