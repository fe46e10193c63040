use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::records::{Company, CompanyRepository, NewCompany};
use crate::IntakeError;

#[derive(Clone)]
pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CompanyRecord {
    id: i32,
    client_id: i32,
    user_id: i32,
    legal_name: String,
    document: String,
    created_at: DateTime<Utc>,
}

impl From<CompanyRecord> for Company {
    fn from(row: CompanyRecord) -> Self {
        Company {
            id: row.id,
            client_id: row.client_id,
            user_id: row.user_id,
            legal_name: row.legal_name,
            document: row.document,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn insert_company(&self, company: NewCompany) -> Result<Company, IntakeError> {
        let row: CompanyRecord = sqlx::query_as(
            "INSERT INTO companies (client_id, user_id, legal_name, document) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, client_id, user_id, legal_name, document, created_at",
        )
        .bind(company.client_id)
        .bind(company.user_id)
        .bind(&company.legal_name)
        .bind(&company.document)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn delete_company(&self, id: i32) -> Result<(), IntakeError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(IntakeError::Dependency(format!("company {} not found", id)));
        }

        Ok(())
    }
}
