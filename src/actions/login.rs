use crate::crypto::SecretString;
use crate::identity::{AuthSession, IdentityProvider};
use crate::records::{User, UserRepository};
use crate::IntakeError;

/// Authenticates against the identity provider, then loads the internal
/// user mirror for the response.
pub struct LoginAction<I, U> {
    identity: I,
    users: U,
}

impl<I: IdentityProvider, U: UserRepository> LoginAction<I, U> {
    pub fn new(identity: I, users: U) -> Self {
        LoginAction { identity, users }
    }

    /// # Errors
    ///
    /// A wrong password, an unknown email and a missing mirror row all
    /// surface as `IntakeError::InvalidCredentials`; nothing discloses
    /// which one occurred.
    pub async fn execute(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<(User, AuthSession), IntakeError> {
        let session = self.identity.authenticate(email, password).await?;

        let user = self
            .users
            .find_user_by_email(email)
            .await?
            .ok_or(IntakeError::InvalidCredentials)?;

        Ok((user, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MockIdentityProvider;
    use crate::records::{MockUserRepository, NewUser};

    async fn seed(provider: &MockIdentityProvider, users: &MockUserRepository) -> User {
        let password = SecretString::new("securepassword");
        let identity = provider
            .create_identity("user@example.com", &password, "Test User")
            .await
            .unwrap();

        users
            .insert_user(NewUser {
                client_id: 1,
                identity_id: identity.id,
                email: "user@example.com".to_owned(),
                full_name: "Test User".to_owned(),
                hashed_password: "unused-mirror-hash".to_owned(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_success_returns_mirror_user() {
        let provider = MockIdentityProvider::new();
        let users = MockUserRepository::new();
        let seeded = seed(&provider, &users).await;

        let login = LoginAction::new(provider, users);
        let (user, session) = login
            .execute("user@example.com", &SecretString::new("securepassword"))
            .await
            .unwrap();

        assert_eq!(user.id, seeded.id);
        assert_eq!(session.identity_id, seeded.identity_id);
        assert!(!session.token.expose_secret().is_empty());
    }

    #[tokio::test]
    async fn test_login_failures_are_undifferentiated() {
        let provider = MockIdentityProvider::new();
        let users = MockUserRepository::new();
        seed(&provider, &users).await;

        let login = LoginAction::new(provider, users);

        let wrong_password = login
            .execute("user@example.com", &SecretString::new("wrongpassword"))
            .await
            .unwrap_err();
        let unknown_email = login
            .execute("nobody@example.com", &SecretString::new("securepassword"))
            .await
            .unwrap_err();

        assert_eq!(wrong_password, IntakeError::InvalidCredentials);
        assert_eq!(unknown_email, IntakeError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_missing_mirror_row_is_invalid_credentials() {
        let provider = MockIdentityProvider::new();
        let users = MockUserRepository::new();

        // identity exists at the provider but the mirror row does not
        provider
            .create_identity(
                "user@example.com",
                &SecretString::new("securepassword"),
                "Test User",
            )
            .await
            .unwrap();

        let login = LoginAction::new(provider, users);
        let err = login
            .execute("user@example.com", &SecretString::new("securepassword"))
            .await
            .unwrap_err();

        assert_eq!(err, IntakeError::InvalidCredentials);
    }
}
