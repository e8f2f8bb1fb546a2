//! Session Tokens
//!
//! JWT issuance and verification. Tokens are stateless bearer credentials:
//! validity is derived entirely from the HMAC signature and the expiration
//! claim, with no server-side session state and no revocation.

use crate::config::AuthConfig;
use crate::error::AuthError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id in string form.
    pub sub: String,
    pub email: String,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiration (unix timestamp), always strictly after `iat`
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Issues and verifies session tokens with a process-wide secret.
///
/// Keys are derived from the configured secret once at construction; a bad
/// secret or algorithm is rejected there as a configuration error rather
/// than surfacing per request.
#[derive(Clone)]
pub struct TokenIssuer {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        config.validate()?;

        let mut validation = Validation::new(config.jwt_algorithm);
        // Expiry is exact; the default 60s leeway would keep just-expired
        // tokens alive.
        validation.leeway = 0;

        Ok(Self {
            header: Header::new(config.jwt_algorithm),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            default_ttl: Duration::seconds(config.token_expiration),
        })
    }

    /// Issue a token for a user with the default lifetime.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AuthError> {
        self.issue_with_ttl(user_id, email, self.default_ttl)
    }

    /// Issue a token with an explicit lifetime.
    pub fn issue_with_ttl(
        &self,
        user_id: Uuid,
        email: &str,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&self.header, &claims, &self.encoding_key).map_err(|err| {
            tracing::error!("Token signing failed: {:?}", err);
            AuthError::Internal
        })
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
