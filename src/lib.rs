//! # intake
//!
//! Tenant onboarding with compensating rollback.
//!
//! Onboarding a client provisions an auth identity, a client record, an
//! internal user mirror and, depending on the client type, contact and
//! company records. Every step is gated on the previous one; when a step
//! fails, everything already committed is undone in reverse order on a
//! best-effort basis so no orphaned state survives the request.
//!
//! The external collaborators (identity provider, record store) are injected
//! as traits. In-memory mocks live behind the `mocks` feature, sqlx Postgres
//! implementations behind `sqlx_postgres`, and the axum HTTP surface behind
//! `axum_api`.

use std::fmt;

pub mod actions;
#[cfg(feature = "axum_api")]
pub mod api;
pub mod config;
pub mod crypto;
pub mod identity;
pub mod jwt;
#[cfg(feature = "sqlx_postgres")]
pub mod postgres;
pub mod records;
pub mod validators;

pub use crypto::{Argon2Hasher, PasswordHasher, SecretString};
pub use identity::{AuthSession, Identity, IdentityProvider};
pub use records::{
    Client, ClientRepository, ClientType, Company, CompanyRepository, Contact, ContactCompany,
    ContactCompanyRepository, ContactRepository, User, UserRepository,
};

#[cfg(any(test, feature = "mocks"))]
pub use identity::MockIdentityProvider;
#[cfg(any(test, feature = "mocks"))]
pub use records::{
    MockClientRepository, MockCompanyRepository, MockContactCompanyRepository,
    MockContactRepository, MockUserRepository,
};

/// Errors surfaced by onboarding and login.
///
/// The first three variants follow the failure taxonomy of the service:
/// validation failures are rejected before any external call, conflicts are
/// uniqueness violations at a collaborator, and dependency errors are any
/// other collaborator failure. Both of the latter trigger compensation.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeError {
    Validation(String),
    Conflict(String),
    Dependency(String),
    InvalidCredentials,
    PasswordHashError,
    TokenInvalid,
    TokenExpired,
    ConfigurationError(String),
    Internal(String),
}

impl std::error::Error for IntakeError {}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeError::Validation(msg) => write!(f, "{}", msg),
            IntakeError::Conflict(msg) => write!(f, "{}", msg),
            IntakeError::Dependency(msg) => write!(f, "{}", msg),
            IntakeError::InvalidCredentials => write!(f, "Invalid email or password"),
            IntakeError::PasswordHashError => write!(f, "Failed to hash password"),
            IntakeError::TokenInvalid => write!(f, "Invalid token"),
            IntakeError::TokenExpired => write!(f, "Token has expired"),
            IntakeError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            IntakeError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}
