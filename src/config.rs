//! Configuration for the intake service.
//!
//! # Example
//!
//! ```rust
//! use intake::config::IntakeConfig;
//! use chrono::Duration;
//!
//! // Use defaults
//! let config = IntakeConfig::default();
//!
//! // Or customize
//! let config = IntakeConfig {
//!     session_expiry: Duration::hours(1),
//!     ..Default::default()
//! };
//! ```

use chrono::Duration;

use crate::IntakeError;
use crate::crypto::SecretString;

/// Main configuration struct for the intake service.
///
/// Use `IntakeConfig::default()` for local development and
/// `IntakeConfig::from_env()` in deployments.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Address the HTTP server binds to.
    ///
    /// Default: `127.0.0.1:8080`, env: `INTAKE_BIND_ADDR`
    pub bind_addr: String,

    /// Postgres connection string for the record store.
    ///
    /// Default: `postgres://localhost/intake`, env: `DATABASE_URL`
    pub database_url: String,

    /// HMAC secret for session tokens. Must be at least 32 bytes.
    ///
    /// Env: `INTAKE_JWT_SECRET`
    pub jwt_secret: SecretString,

    /// How long issued session tokens remain valid.
    ///
    /// Default: 24 hours
    pub session_expiry: Duration,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_owned(),
            database_url: "postgres://localhost/intake".to_owned(),
            jwt_secret: SecretString::new("insecure-development-secret-32-bytes"),
            session_expiry: Duration::hours(24),
        }
    }
}

impl IntakeConfig {
    /// Creates a configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: std::env::var("INTAKE_BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            jwt_secret: std::env::var("INTAKE_JWT_SECRET")
                .map(SecretString::new)
                .unwrap_or(defaults.jwt_secret),
            session_expiry: defaults.session_expiry,
        }
    }

    /// Checks that the configuration is usable at startup.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::ConfigurationError` if the JWT secret is
    /// shorter than 32 bytes.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.jwt_secret.expose_secret().len() < 32 {
            return Err(IntakeError::ConfigurationError(
                "INTAKE_JWT_SECRET must be at least 32 bytes".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IntakeConfig::default();

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.session_expiry, Duration::hours(24));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = IntakeConfig {
            jwt_secret: SecretString::new("short"),
            ..Default::default()
        };

        assert!(matches!(
            config.validate().unwrap_err(),
            IntakeError::ConfigurationError(_)
        ));
    }
}
