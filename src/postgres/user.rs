use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::records::{NewUser, User, UserRepository};
use crate::IntakeError;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: i32,
    client_id: i32,
    identity_id: String,
    email: String,
    full_name: String,
    hashed_password: String,
    created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(row: UserRecord) -> Self {
        User {
            id: row.id,
            client_id: row.client_id,
            identity_id: row.identity_id,
            email: row.email,
            full_name: row.full_name,
            hashed_password: row.hashed_password,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert_user(&self, user: NewUser) -> Result<User, IntakeError> {
        let row: UserRecord = sqlx::query_as(
            "INSERT INTO users (client_id, identity_id, email, full_name, hashed_password) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, client_id, identity_id, email, full_name, hashed_password, created_at",
        )
        .bind(user.client_id)
        .bind(&user.identity_id)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, IntakeError> {
        let row: Option<UserRecord> = sqlx::query_as(
            "SELECT id, client_id, identity_id, email, full_name, hashed_password, created_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete_user(&self, id: i32) -> Result<(), IntakeError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(IntakeError::Dependency(format!("user {} not found", id)));
        }

        Ok(())
    }
}
