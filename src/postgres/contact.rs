use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::records::{Contact, ContactRepository, NewContact};
use crate::IntakeError;

#[derive(Clone)]
pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ContactRecord {
    id: i32,
    client_id: i32,
    user_id: i32,
    full_name: String,
    email: String,
    phone: String,
    created_at: DateTime<Utc>,
}

impl From<ContactRecord> for Contact {
    fn from(row: ContactRecord) -> Self {
        Contact {
            id: row.id,
            client_id: row.client_id,
            user_id: row.user_id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn insert_contact(&self, contact: NewContact) -> Result<Contact, IntakeError> {
        let row: ContactRecord = sqlx::query_as(
            "INSERT INTO contacts (client_id, user_id, full_name, email, phone) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, client_id, user_id, full_name, email, phone, created_at",
        )
        .bind(contact.client_id)
        .bind(contact.user_id)
        .bind(&contact.full_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn delete_contact(&self, id: i32) -> Result<(), IntakeError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(IntakeError::Dependency(format!("contact {} not found", id)));
        }

        Ok(())
    }
}
