use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::IntakeError;

/// A person record. The sole business record for individual clients, the
/// responsible-person record for company clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i32,
    pub client_id: i32,
    /// The user responsible for this contact.
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a contact insert. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub client_id: i32,
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

#[async_trait]
pub trait ContactRepository {
    async fn insert_contact(&self, contact: NewContact) -> Result<Contact, IntakeError>;

    /// Removes a contact row. Used only by compensating rollback.
    async fn delete_contact(&self, id: i32) -> Result<(), IntakeError>;
}
