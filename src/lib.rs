//! User Authentication Core
//!
//! Registration, credential verification, and stateless session tokens:
//! - SHA-256 pre-hash + bcrypt password hashing (salted, configurable cost)
//! - JWT bearer tokens with a 7-day default lifetime
//! - Enumeration-resistant login failures
//! - Pluggable user storage (PostgreSQL or in-memory)
//!
//! # Configuration
//!
//! All configuration is loaded from environment variables:
//! - `JWT_SECRET` - Secret key for signing JWTs (required, min 32 chars)
//! - `JWT_ALGORITHM` - HMAC signing algorithm (default: HS256)
//! - `TOKEN_EXPIRATION` - Token lifetime in seconds (default: 604800)
//! - `BCRYPT_COST` - bcrypt work factor (default: 12)
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use userauth::{AuthConfig, AuthService, Credentials, PgUserStore};
//!
//! let config = AuthConfig::from_env()?;
//! let store = Arc::new(PgUserStore::new(pool));
//! let auth = AuthService::new(store, &config)?;
//!
//! let credentials = Credentials { email: "a@x.com".into(), password: "secret123".into() };
//! let user = auth.register(&credentials).await?;
//! let response = auth.login(&credentials).await?;
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod service;
pub mod store;
pub mod token;

// Re-export commonly used types
pub use config::AuthConfig;
pub use error::AuthError;
pub use models::{AuthResponse, Credentials, User, UserResponse};
pub use password::PasswordHasher;
pub use service::AuthService;
pub use store::{MemoryUserStore, PgUserStore, StoreError, UserStore};
pub use token::{Claims, TokenIssuer};
