//! Authentication Configuration
//!
//! All configuration values are loaded from environment variables once at
//! startup and injected into the services that need them. No hardcoded
//! secrets, no ambient globals.

use crate::error::AuthError;
use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;

/// Default token lifetime: 7 days.
pub const DEFAULT_TOKEN_EXPIRATION: i64 = 604_800;

/// Default bcrypt work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Authentication configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT secret key for signing tokens (from JWT_SECRET env var)
    pub jwt_secret: String,

    /// JWT signing algorithm, HMAC family only (from JWT_ALGORITHM env var)
    pub jwt_algorithm: Algorithm,

    /// Token expiration in seconds (from TOKEN_EXPIRATION env var)
    pub token_expiration: i64,

    /// bcrypt cost factor for password hashing (from BCRYPT_COST env var)
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// A missing secret is a fatal startup error, not something to retry
    /// per request.
    pub fn from_env() -> Result<Self, AuthError> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AuthError::Config("JWT_SECRET environment variable must be set".into()))?;

        let jwt_algorithm = match env::var("JWT_ALGORITHM") {
            Ok(name) => Algorithm::from_str(&name)
                .map_err(|_| AuthError::Config(format!("Unknown JWT algorithm: {name}")))?,
            Err(_) => Algorithm::HS256,
        };

        let config = Self {
            jwt_secret,
            jwt_algorithm,
            token_expiration: env::var("TOKEN_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_EXPIRATION),
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_BCRYPT_COST),
        };

        config.validate()?;
        Ok(config)
    }

    /// Build a config programmatically with the defaults, for embedding and
    /// tests.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            jwt_algorithm: Algorithm::HS256,
            token_expiration: DEFAULT_TOKEN_EXPIRATION,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.jwt_secret.len() < 32 {
            return Err(AuthError::Config(
                "JWT_SECRET must be at least 32 characters".into(),
            ));
        }

        // Shared-secret keys only; asymmetric algorithms would need key
        // material this config does not carry.
        if !matches!(
            self.jwt_algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AuthError::Config(
                "JWT_ALGORITHM must be one of HS256, HS384, HS512".into(),
            ));
        }

        if self.token_expiration <= 0 {
            return Err(AuthError::Config(
                "TOKEN_EXPIRATION must be positive".into(),
            ));
        }

        // bcrypt's accepted cost range
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(AuthError::Config(
                "BCRYPT_COST must be between 4 and 31".into(),
            ));
        }

        Ok(())
    }
}
