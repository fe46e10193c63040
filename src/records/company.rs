use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::IntakeError;

/// An organization record, created only for company clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i32,
    pub client_id: i32,
    /// The user responsible for this company.
    pub user_id: i32,
    pub legal_name: String,
    /// Normalized tax document (digits only).
    pub document: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a company insert. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub client_id: i32,
    pub user_id: i32,
    pub legal_name: String,
    pub document: String,
}

#[async_trait]
pub trait CompanyRepository {
    async fn insert_company(&self, company: NewCompany) -> Result<Company, IntakeError>;

    /// Removes a company row. Used only by compensating rollback.
    async fn delete_company(&self, id: i32) -> Result<(), IntakeError>;
}
