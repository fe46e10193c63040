//! Identity provider abstraction.
//!
//! The system of record for login credentials and session issuance. The
//! orchestrator creates one identity per onboarding and deletes it again if
//! any later step fails, so no identity survives without a client.
//!
//! Creation strategy: administrative creation with the email address treated
//! as confirmed immediately. No confirmation email is modelled; an
//! implementation backed by a hosted provider that requires sign-up
//! confirmation can substitute that flow without changing the orchestrator.

#[cfg(any(test, feature = "mocks"))]
mod mock;

#[cfg(any(test, feature = "mocks"))]
pub use mock::MockIdentityProvider;

use async_trait::async_trait;

use crate::IntakeError;
use crate::crypto::SecretString;

/// A credential record held by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Provider-assigned opaque id.
    pub id: String,
    pub email: String,
}

/// The result of a successful authentication.
#[derive(Clone)]
pub struct AuthSession {
    pub identity_id: String,
    /// Session token issued by the provider.
    pub token: SecretString,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("identity_id", &self.identity_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
pub trait IdentityProvider {
    /// Creates a credential record keyed by email.
    ///
    /// At most one identity may exist per email; a duplicate must surface as
    /// `IntakeError::Conflict`.
    async fn create_identity(
        &self,
        email: &str,
        password: &SecretString,
        full_name: &str,
    ) -> Result<Identity, IntakeError>;

    /// Removes a credential record. Used only by compensating rollback.
    async fn delete_identity(&self, id: &str) -> Result<(), IntakeError>;

    /// Verifies email/password and issues a session.
    ///
    /// Must return `IntakeError::InvalidCredentials` for a wrong password
    /// and for an unknown email alike, so callers cannot distinguish them.
    async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthSession, IntakeError>;
}
