//! sqlx Postgres implementations of the record store and identity provider.
//!
//! Enabled by the `sqlx_postgres` feature. The identity provider here is
//! the self-hosted realization of the external interface: identities live
//! in an `identities` table and sessions are HS256 JWTs.

mod client;
mod company;
mod contact;
mod contact_company;
mod identity;
pub mod migrations;
mod user;

pub use client::PostgresClientRepository;
pub use company::PostgresCompanyRepository;
pub use contact::PostgresContactRepository;
pub use contact_company::PostgresContactCompanyRepository;
pub use identity::PostgresIdentityProvider;
pub use user::PostgresUserRepository;

use sqlx::PgPool;

use crate::IntakeError;

/// Creates all Postgres repository instances from a connection pool.
pub fn create_repositories(
    pool: PgPool,
) -> (
    PostgresClientRepository,
    PostgresUserRepository,
    PostgresContactRepository,
    PostgresCompanyRepository,
    PostgresContactCompanyRepository,
) {
    (
        PostgresClientRepository::new(pool.clone()),
        PostgresUserRepository::new(pool.clone()),
        PostgresContactRepository::new(pool.clone()),
        PostgresCompanyRepository::new(pool.clone()),
        PostgresContactCompanyRepository::new(pool),
    )
}

/// SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Maps driver errors onto the failure taxonomy: uniqueness conflicts are
/// client-facing, everything else is a dependency failure.
pub(crate) fn map_db_error(err: sqlx::Error) -> IntakeError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return IntakeError::Conflict("A record with this email already exists".to_owned());
        }
    }
    IntakeError::Dependency(err.to_string())
}
