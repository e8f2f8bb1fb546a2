//! Authentication Models
//!
//! Data structures for authentication requests, responses, and the persisted
//! user entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Database Entities
// ============================================

/// User entity from the store.
///
/// The password hash is opaque and never leaves the crate: it is skipped on
/// serialization and only ever read by the credential hasher.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a user with a freshly generated id, for store backends that do
    /// not generate ids themselves.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

// ============================================
// Request DTOs
// ============================================

/// Email and plaintext password for register and login.
///
/// Request-scoped only; the plaintext never outlives the handling of a single
/// call.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// ============================================
// Response DTOs
// ============================================

/// Public user representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Successful login response: bearer token plus the public user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn bearer(access_token: String, user: UserResponse) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User::new("a@x.com", "$2b$12$abcdefghijklmnopqrstuv");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_user_response_from_user() {
        let user = User::new("a@x.com", "hash");
        let response = UserResponse::from(&user);

        assert_eq!(response.id, user.id);
        assert_eq!(response.email, "a@x.com");
    }

    #[test]
    fn test_bearer_response_token_type() {
        let user = User::new("a@x.com", "hash");
        let response = AuthResponse::bearer("token".into(), user.into());
        assert_eq!(response.token_type, "bearer");
    }
}
