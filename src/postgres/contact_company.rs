use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::records::{ContactCompany, ContactCompanyRepository};
use crate::IntakeError;

#[derive(Clone)]
pub struct PostgresContactCompanyRepository {
    pool: PgPool,
}

impl PostgresContactCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct LinkRecord {
    id: i32,
    contact_id: i32,
    company_id: i32,
}

impl From<LinkRecord> for ContactCompany {
    fn from(row: LinkRecord) -> Self {
        ContactCompany {
            id: row.id,
            contact_id: row.contact_id,
            company_id: row.company_id,
        }
    }
}

#[async_trait]
impl ContactCompanyRepository for PostgresContactCompanyRepository {
    async fn insert_contact_company(
        &self,
        contact_id: i32,
        company_id: i32,
    ) -> Result<ContactCompany, IntakeError> {
        let row: LinkRecord = sqlx::query_as(
            "INSERT INTO contact_companies (contact_id, company_id) \
             VALUES ($1, $2) \
             RETURNING id, contact_id, company_id",
        )
        .bind(contact_id)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn delete_contact_company(&self, id: i32) -> Result<(), IntakeError> {
        let result = sqlx::query("DELETE FROM contact_companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(IntakeError::Dependency(format!("link {} not found", id)));
        }

        Ok(())
    }
}
