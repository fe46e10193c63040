use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::IntakeError;

/// Link row joining one contact to one company. Created last in the company
/// flow, after both sides exist, and therefore deleted first on rollback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCompany {
    pub id: i32,
    pub contact_id: i32,
    pub company_id: i32,
}

#[async_trait]
pub trait ContactCompanyRepository {
    async fn insert_contact_company(
        &self,
        contact_id: i32,
        company_id: i32,
    ) -> Result<ContactCompany, IntakeError>;

    /// Removes a link row. Used only by compensating rollback.
    async fn delete_contact_company(&self, id: i32) -> Result<(), IntakeError>;
}
