use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::crypto::{Argon2Hasher, PasswordHasher, SecretString, generate_token};
use crate::identity::{AuthSession, Identity, IdentityProvider};
use crate::jwt::JwtService;
use crate::IntakeError;

/// Length of provider-assigned identity ids.
const IDENTITY_ID_LENGTH: usize = 24;

/// Self-hosted identity provider: credentials in an `identities` table,
/// sessions as HS256 JWTs with the identity id as subject.
#[derive(Clone)]
pub struct PostgresIdentityProvider {
    pool: PgPool,
    hasher: Argon2Hasher,
    jwt: JwtService,
}

impl PostgresIdentityProvider {
    pub fn new(pool: PgPool, hasher: Argon2Hasher, jwt: JwtService) -> Self {
        Self { pool, hasher, jwt }
    }
}

#[derive(FromRow)]
struct IdentityRecord {
    id: String,
    hashed_password: String,
}

#[async_trait]
impl IdentityProvider for PostgresIdentityProvider {
    async fn create_identity(
        &self,
        email: &str,
        password: &SecretString,
        full_name: &str,
    ) -> Result<Identity, IntakeError> {
        let hashed = self.hasher.hash(password.expose_secret())?;
        let id = generate_token(IDENTITY_ID_LENGTH);

        sqlx::query(
            "INSERT INTO identities (id, email, hashed_password, full_name) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&id)
        .bind(email)
        .bind(&hashed)
        .bind(full_name)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Identity {
            id,
            email: email.to_owned(),
        })
    }

    async fn delete_identity(&self, id: &str) -> Result<(), IntakeError> {
        let result = sqlx::query("DELETE FROM identities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(IntakeError::Dependency(format!("identity {} not found", id)));
        }

        Ok(())
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthSession, IntakeError> {
        let row: Option<IdentityRecord> =
            sqlx::query_as("SELECT id, hashed_password FROM identities WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        // Unknown email and wrong password take the same exit
        if let Some(identity) = row {
            if self
                .hasher
                .verify(password.expose_secret(), &identity.hashed_password)?
            {
                let token = self.jwt.encode(&identity.id)?;
                return Ok(AuthSession {
                    identity_id: identity.id,
                    token: SecretString::new(token),
                });
            }
        }

        Err(IntakeError::InvalidCredentials)
    }
}
