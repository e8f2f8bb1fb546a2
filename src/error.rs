//! Authentication Error Types
//!
//! Centralized error handling for all authentication operations. Every
//! per-request failure surfaces as a typed variant; the embedding layer maps
//! them to transport outcomes.

use crate::store::StoreError;

/// Authentication errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// Login failed. Deliberately covers both "no such email" and "wrong
    /// password" so responses carry no enumeration signal.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error")]
    Internal,
}

impl AuthError {
    /// True for errors that describe a client outcome rather than a
    /// server-side fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::DuplicateEmail
                | AuthError::InvalidToken
                | AuthError::TokenExpired
        )
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!("JWT error: {:?}", err);
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            // The racy check-then-create window closes here: a constraint
            // violation at write time is the same duplicate outcome as a
            // pre-check hit.
            StoreError::UniqueViolation => AuthError::DuplicateEmail,
            StoreError::Unavailable(msg) => {
                tracing::error!("User store error: {}", msg);
                AuthError::Store(msg)
            }
        }
    }
}
