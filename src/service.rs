//! Authentication Service
//!
//! Orchestrates the credential hasher, token issuer, and user store to
//! implement the three use cases: register, login, and current-identity
//! lookup. Each call is request-scoped; the service holds no mutable state
//! of its own.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::models::{AuthResponse, Credentials, User, UserResponse};
use crate::password::PasswordHasher;
use crate::store::UserStore;
use crate::token::{Claims, TokenIssuer};
use std::sync::Arc;

/// Authentication service
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    /// Create a new auth service instance.
    ///
    /// Fails only on configuration problems (bad secret or algorithm), which
    /// are fatal at startup.
    pub fn new(store: Arc<dyn UserStore>, config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self {
            store,
            hasher: PasswordHasher::from_config(config),
            tokens: TokenIssuer::new(config)?,
        })
    }

    // ============================================
    // User Registration
    // ============================================

    /// Register a new user.
    ///
    /// The existence pre-check keeps the common duplicate case cheap, but the
    /// store's own uniqueness constraint is what closes the concurrent
    /// register-register window; its violation signal maps to the same
    /// [`AuthError::DuplicateEmail`].
    pub async fn register(&self, credentials: &Credentials) -> Result<UserResponse, AuthError> {
        if self
            .store
            .find_by_email(&credentials.email)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self.hash_blocking(credentials.password.clone()).await?;

        let user = self.store.create(&credentials.email, &password_hash).await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(user.into())
    }

    // ============================================
    // User Login
    // ============================================

    /// Authenticate credentials and mint a bearer token.
    ///
    /// Unknown email and wrong password collapse into the same
    /// [`AuthError::InvalidCredentials`]; nothing here, including log output,
    /// distinguishes the two cases.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, AuthError> {
        let user = self
            .store
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .verify_blocking(credentials.password.clone(), user.password_hash.clone())
            .await?
        {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.tokens.issue(user.id, &user.email)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse::bearer(access_token, user.into()))
    }

    // ============================================
    // Identity Lookup
    // ============================================

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// This is the verification path the request-authentication layer calls
    /// before handing an identity to [`AuthService::current_user`].
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.verify_token(token)?;
        let user_id = claims.user_id()?;

        self.store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    /// Public representation of an already-authenticated user. Pure read.
    pub fn current_user(&self, user: &User) -> UserResponse {
        user.into()
    }

    /// Verify a token's signature and expiry without touching the store.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }

    // ============================================
    // Helper Methods
    // ============================================

    // bcrypt runs tens to hundreds of milliseconds at production cost;
    // keep it off the async executor threads.

    async fn hash_blocking(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|_| AuthError::Internal)?
    }

    async fn verify_blocking(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|_| AuthError::Internal)
    }
}
