//! User Store
//!
//! Persistence seam for user records. The core only needs lookup-by-email,
//! lookup-by-id, and create; everything else about storage lives behind this
//! trait. The store must enforce email uniqueness atomically at write time -
//! the orchestrator's pre-check alone cannot close the concurrent
//! register-register race.

use crate::models::User;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Errors surfaced by a store backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Unique constraint violation")]
    UniqueViolation,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// User record storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Persist a new user. Fails with [`StoreError::UniqueViolation`] if the
    /// email is already taken, even when a concurrent writer won the race
    /// after the caller's own existence check.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;
}

// ============================================
// PostgreSQL Backend
// ============================================

/// PostgreSQL-backed store. Relies on a UNIQUE index on `users.email`.
#[derive(Clone)]
pub struct PgUserStore {
    pool: sqlx::PgPool,
}

impl PgUserStore {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE for unique_violation.
const PG_UNIQUE_VIOLATION: &str = "23505";

fn map_pg_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
            return StoreError::UniqueViolation;
        }
    }
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_pg_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_pg_error)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        sqlx::query_as(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_pg_error)
    }
}

// ============================================
// In-Memory Backend
// ============================================

/// In-memory store keyed by email. Enforces the same uniqueness invariant as
/// the database backend; used by tests and lightweight embeddings.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        // Check and insert under one write lock, the in-memory equivalent of
        // the database's atomic constraint.
        if users.contains_key(email) {
            return Err(StoreError::UniqueViolation);
        }

        let user = User::new(email, password_hash);
        users.insert(email.to_string(), user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_create_and_find() {
        let store = MemoryUserStore::new();

        let created = store.create("a@x.com", "hash").await.unwrap();
        assert_eq!(created.email, "a@x.com");

        let by_email = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_memory_store_missing_user() {
        let store = MemoryUserStore::new();
        assert!(store.find_by_email("a@x.com").await.unwrap().is_none());
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_rejects_duplicate_email() {
        let store = MemoryUserStore::new();
        store.create("a@x.com", "hash1").await.unwrap();

        let err = store.create("a@x.com", "hash2").await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_email_is_case_sensitive() {
        let store = MemoryUserStore::new();
        store.create("a@x.com", "hash").await.unwrap();

        // Emails are stored and matched verbatim
        assert!(store.find_by_email("A@X.COM").await.unwrap().is_none());
    }
}
