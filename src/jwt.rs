//! HS256 session tokens for authenticated identities.
//!
//! Login issues a single short-lived session token; there is no refresh or
//! server-side revocation.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::IntakeError;
use crate::crypto::generate_token;

/// Length of the JWT ID (jti) in characters.
const JTI_LENGTH: usize = 16;

/// Minimum HMAC secret length in bytes.
const MIN_SECRET_LENGTH: usize = 32;

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject - the provider-assigned identity id.
    pub sub: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at time (Unix timestamp).
    pub iat: i64,
    /// Unique token id.
    pub jti: String,
}

/// Service for encoding and decoding session tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Creates a new JWT service.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::ConfigurationError` if the secret is shorter
    /// than 32 bytes.
    pub fn new(secret: &str, expiry: Duration) -> Result<Self, IntakeError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(IntakeError::ConfigurationError(
                "JWT secret must be at least 32 bytes".to_owned(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry,
        })
    }

    /// Encodes a subject into a session token.
    pub fn encode(&self, subject: &str) -> Result<String, IntakeError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_owned(),
            exp: (now + self.expiry).timestamp(),
            iat: now.timestamp(),
            jti: generate_token(JTI_LENGTH),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| IntakeError::TokenInvalid)
    }

    /// Decodes and validates a session token, returning the claims.
    pub fn decode(&self, token: &str) -> Result<JwtClaims, IntakeError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => IntakeError::TokenExpired,
                _ => IntakeError::TokenInvalid,
            })?;

        Ok(token_data.claims)
    }

    /// Returns the configured token expiry duration.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Header;

    use super::*;

    #[test]
    fn test_encode_decode() {
        let service = JwtService::new("test-secret-32-bytes-long-key-01", Duration::hours(1))
            .unwrap();

        let token = service.encode("ident-42").unwrap();
        let claims = service.decode(&token).unwrap();

        assert_eq!(claims.sub, "ident-42");
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_invalid_token() {
        let service = JwtService::new("test-secret-32-bytes-long-key-02", Duration::hours(1))
            .unwrap();

        let result = service.decode("invalid-token");
        assert_eq!(result.unwrap_err(), IntakeError::TokenInvalid);
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new("test-secret-32-bytes-long-key-03", Duration::hours(1))
            .unwrap();
        let service2 = JwtService::new("test-secret-32-bytes-long-key-04", Duration::hours(1))
            .unwrap();

        let token = service1.encode("ident-42").unwrap();
        assert_eq!(service2.decode(&token).unwrap_err(), IntakeError::TokenInvalid);
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new("test-secret-32-bytes-long-key-05", Duration::hours(1))
            .unwrap();

        let claims = JwtClaims {
            sub: "ident-42".to_owned(),
            exp: Utc::now().timestamp() - 3600,
            iat: Utc::now().timestamp() - 7200,
            jti: "test-jti".to_owned(),
        };

        let encoding_key = EncodingKey::from_secret(b"test-secret-32-bytes-long-key-05");
        let token = jsonwebtoken::encode(&Header::default(), &claims, &encoding_key).unwrap();

        assert_eq!(service.decode(&token).unwrap_err(), IntakeError::TokenExpired);
    }

    #[test]
    fn test_secret_too_short() {
        let result = JwtService::new("short", Duration::hours(1));
        let err = result.unwrap_err();
        assert!(
            matches!(err, IntakeError::ConfigurationError(ref msg) if msg.contains("32 bytes")),
            "Expected ConfigurationError with '32 bytes' message"
        );
    }

    #[test]
    fn test_jti_unique() {
        let service = JwtService::new("test-secret-32-bytes-long-key-06", Duration::hours(1))
            .unwrap();

        let claims1 = service.decode(&service.encode("ident-42").unwrap()).unwrap();
        let claims2 = service.decode(&service.encode("ident-42").unwrap()).unwrap();
        assert_ne!(claims1.jti, claims2.jti);
    }
}
