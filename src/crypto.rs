//! Password hashing and secret handling.

use argon2::{Algorithm, Argon2, Params, PasswordVerifier, Version};
use password_hash::{PasswordHash, PasswordHasher as ArgonPasswordHasher, SaltString};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::IntakeError;

/// A wrapper for sensitive string data that prevents accidental logging.
///
/// `SecretString` implements `Debug` and `Display` as `[REDACTED]` so
/// passwords and session tokens never leak through log output.
///
/// ```rust
/// use intake::crypto::SecretString;
///
/// let password = SecretString::new("my_secret_password");
/// assert_eq!(format!("{:?}", password), "SecretString([REDACTED])");
/// assert_eq!(password.expose_secret(), "my_secret_password");
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exposes the secret value. Call only at the point of use, such as
    /// handing the plaintext to a hashing function.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialization exposes the value: session tokens go out in responses.
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString(s))
    }
}

/// Trait for password hashing and verification.
///
/// Allows pluggable implementations; the default is [`Argon2Hasher`].
pub trait PasswordHasher: Send + Sync {
    /// Hash a password.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::PasswordHashError` if hashing fails.
    fn hash(&self, password: &str) -> Result<String, IntakeError>;

    /// Verify a password against a hash.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::PasswordHashError` if the hash is malformed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, IntakeError>;
}

/// Argon2id password hasher with configurable parameters.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    /// Memory cost in KiB
    memory_cost: u32,
    /// Number of iterations
    time_cost: u32,
    /// Degree of parallelism
    parallelism: u32,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            memory_cost: 19456, // 19 MiB - argon2 default
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl Argon2Hasher {
    #[must_use]
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    /// Production-recommended settings based on OWASP 2024 guidelines.
    ///
    /// Parameters: 64 MiB memory, 3 iterations, 4 threads.
    #[must_use]
    pub fn production() -> Self {
        Self {
            memory_cost: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, IntakeError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|_| IntakeError::PasswordHashError)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| IntakeError::PasswordHashError)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, IntakeError> {
        let parsed = PasswordHash::new(hash).map_err(|_| IntakeError::PasswordHashError)?;

        // Verification uses params from the hash, not from config
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Generates a random alphanumeric token (a-z, A-Z, 0-9), roughly 5.95 bits
/// of entropy per character. Used for provider identity ids and opaque
/// session tokens.
pub fn generate_token(length: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::default();
        let hash = hasher.hash("mypassword").unwrap();

        assert!(hasher.verify("mypassword", &hash).unwrap());
        assert!(!hasher.verify("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = Argon2Hasher::default();
        let hash1 = hasher.hash("mypassword").unwrap();
        let hash2 = hasher.hash("mypassword").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = Argon2Hasher::default();
        let result = hasher.verify("mypassword", "not-a-phc-string");
        assert_eq!(result.unwrap_err(), IntakeError::PasswordHashError);
    }

    #[test]
    fn test_generate_token_length() {
        assert_eq!(generate_token(32).len(), 32);
        assert_eq!(generate_token(48).len(), 48);
    }

    #[test]
    fn test_generate_token_unique() {
        assert_ne!(generate_token(32), generate_token(32));
    }

    #[test]
    fn test_generate_token_alphanumeric() {
        let token = generate_token(100);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_secret_string_redacted() {
        let secret = SecretString::new("my_password");
        assert_eq!(format!("{secret:?}"), "SecretString([REDACTED])");
        assert_eq!(format!("{secret}"), "[REDACTED]");
        assert_eq!(secret.expose_secret(), "my_password");
    }

    #[test]
    fn test_secret_string_from_str() {
        let secret: SecretString = "password".into();
        assert_eq!(secret.expose_secret(), "password");
    }
}
