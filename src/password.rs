//! Password Hashing
//!
//! Credential hashing and verification: SHA-256 pre-hash followed by bcrypt
//! with a per-call random salt.
//!
//! The pre-hash normalizes every password, whatever its length or encoding,
//! to a fixed 32-byte payload before bcrypt sees it, so bcrypt's 72-byte
//! input ceiling never silently truncates long passwords. The digest
//! algorithm, byte order, and 72-byte cap are load-bearing: stored hashes
//! are only verifiable as long as this pipeline stays byte-for-byte
//! identical.

use crate::config::AuthConfig;
use crate::error::AuthError;
use sha2::{Digest, Sha256};

/// bcrypt's native input ceiling in bytes.
const BCRYPT_MAX_INPUT: usize = 72;

/// Password hasher with a configurable bcrypt work factor.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }

    /// Hash a plaintext password for storage.
    ///
    /// Deterministic pipeline: UTF-8 bytes -> SHA-256 -> cap at 72 bytes ->
    /// bcrypt with a fresh random salt. Two calls on the same input produce
    /// different stored hashes; both verify.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let digest = normalize(password);

        bcrypt::hash(digest, self.cost).map_err(|err| {
            tracing::error!("Password hashing failed: {:?}", err);
            AuthError::Internal
        })
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// A malformed stored hash is treated as a verification failure rather
    /// than an error: callers get `false`, never a panic or a distinct
    /// failure signal.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let digest = normalize(password);
        bcrypt::verify(digest, stored_hash).unwrap_or(false)
    }
}

/// Normalize a password to the fixed-size payload fed to bcrypt.
///
/// The cap is a no-op for a 32-byte SHA-256 digest but states the bcrypt
/// invariant explicitly.
fn normalize(password: &str) -> Vec<u8> {
    let digest = Sha256::digest(password.as_bytes());
    let mut bytes = digest.to_vec();
    bytes.truncate(BCRYPT_MAX_INPUT);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the adaptive work factor out of the test runtime.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hasher = hasher();
        let hash = hasher.hash("secret123").unwrap();

        assert!(hasher.verify("secret123", &hash));
        assert!(!hasher.verify("wrong-password", &hash));
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hasher = hasher();
        let hash1 = hasher.hash("same_password").unwrap();
        let hash2 = hasher.hash("same_password").unwrap();

        // Different salts produce different stored representations
        assert_ne!(hash1, hash2);

        assert!(hasher.verify("same_password", &hash1));
        assert!(hasher.verify("same_password", &hash2));
    }

    #[test]
    fn test_password_longer_than_bcrypt_limit() {
        let hasher = hasher();
        let long = "x".repeat(200);
        let hash = hasher.hash(&long).unwrap();

        assert!(hasher.verify(&long, &hash));
        // Without the pre-hash, bcrypt would truncate at 72 bytes and these
        // would collide.
        assert!(!hasher.verify(&"x".repeat(73), &hash));
    }

    #[test]
    fn test_multibyte_password() {
        let hasher = hasher();
        let password = "пароль-密码-🔐";
        let hash = hasher.hash(password).unwrap();

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("пароль-密码", &hash));
    }

    #[test]
    fn test_malformed_stored_hash_verifies_false() {
        let hasher = hasher();

        assert!(!hasher.verify("secret123", "not-a-bcrypt-hash"));
        assert!(!hasher.verify("secret123", ""));
        assert!(!hasher.verify("secret123", "$2b$12$truncated"));
    }

    #[test]
    fn test_normalize_is_fixed_size() {
        assert_eq!(normalize("").len(), 32);
        assert_eq!(normalize(&"x".repeat(1000)).len(), 32);
    }
}
