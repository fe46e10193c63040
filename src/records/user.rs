use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::IntakeError;

/// Internal mirror of an auth identity, foreign-keyed to its client.
///
/// The row duplicates the credential hash the identity provider already
/// holds. That duplication is intentional: it exists for internal joins and
/// lookups, not as a security mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub client_id: i32,
    /// Provider-assigned identity id.
    pub identity_id: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a user insert. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub client_id: i32,
    pub identity_id: String,
    pub email: String,
    pub full_name: String,
    pub hashed_password: String,
}

#[async_trait]
pub trait UserRepository {
    async fn insert_user(&self, user: NewUser) -> Result<User, IntakeError>;

    /// Looks up the mirror row for login.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, IntakeError>;

    /// Removes a user row. Used only by compensating rollback.
    async fn delete_user(&self, id: i32) -> Result<(), IntakeError>;
}
