use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::records::{Client, ClientRepository, ClientType, NewClient};
use crate::IntakeError;

#[derive(Clone)]
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ClientRecord {
    id: i32,
    display_name: String,
    company_name: Option<String>,
    document: String,
    email: String,
    phone: String,
    client_type: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ClientRecord> for Client {
    type Error = IntakeError;

    fn try_from(row: ClientRecord) -> Result<Self, IntakeError> {
        let client_type = ClientType::parse(&row.client_type).ok_or_else(|| {
            IntakeError::Dependency(format!("unexpected client_type in store: {}", row.client_type))
        })?;

        Ok(Client {
            id: row.id,
            display_name: row.display_name,
            company_name: row.company_name,
            document: row.document,
            email: row.email,
            phone: row.phone,
            client_type,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn insert_client(&self, client: NewClient) -> Result<Client, IntakeError> {
        let row: ClientRecord = sqlx::query_as(
            "INSERT INTO clients (display_name, company_name, document, email, phone, client_type) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, display_name, company_name, document, email, phone, client_type, created_at",
        )
        .bind(&client.display_name)
        .bind(&client.company_name)
        .bind(&client.document)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(client.client_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.try_into()
    }

    async fn delete_client(&self, id: i32) -> Result<(), IntakeError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(IntakeError::Dependency(format!("client {} not found", id)));
        }

        Ok(())
    }
}
