use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::IntakeError;

/// The two supported kinds of client, each with its own required-field set
/// and dependent records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    Individual,
    Company,
}

impl ClientType {
    /// Parses the wire tag. Anything other than `individual`/`company` is
    /// rejected by the caller as a validation failure.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "individual" => Some(ClientType::Individual),
            "company" => Some(ClientType::Company),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Individual => "individual",
            ClientType::Company => "company",
        }
    }
}

/// The tenant/account entity created during onboarding.
///
/// Invariant: `company_name` is non-null iff `client_type` is `Company`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i32,
    pub display_name: String,
    pub company_name: Option<String>,
    /// Normalized tax document (digits only).
    pub document: String,
    pub email: String,
    /// Normalized phone (grouping punctuation stripped).
    pub phone: String,
    pub client_type: ClientType,
    pub created_at: DateTime<Utc>,
}

/// Fields for a client insert. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub display_name: String,
    pub company_name: Option<String>,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub client_type: ClientType,
}

#[async_trait]
pub trait ClientRepository {
    /// Inserts a client row.
    ///
    /// A duplicate email must surface as `IntakeError::Conflict`.
    async fn insert_client(&self, client: NewClient) -> Result<Client, IntakeError>;

    /// Removes a client row. Used only by compensating rollback.
    async fn delete_client(&self, id: i32) -> Result<(), IntakeError>;
}
