use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actions::OnboardInput;
use crate::crypto::SecretString;
use crate::records::User;

// Request DTOs

/// Onboarding payload. Every field is optional at the wire level so missing
/// fields produce this service's own validation error instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct OnboardRequest {
    pub client_type: Option<String>,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub document: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

impl From<OnboardRequest> for OnboardInput {
    fn from(body: OnboardRequest) -> Self {
        OnboardInput {
            client_type: body.client_type,
            full_name: body.full_name,
            company_name: body.company_name,
            document: body.document,
            email: body.email,
            password: body.password,
            phone: body.phone,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Response DTOs

#[derive(Debug, Serialize)]
pub struct OnboardResponse {
    pub message: String,
    pub client_id: i32,
    pub user_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub client_id: i32,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            client_id: user.client_id,
            email: user.email,
            full_name: user.full_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: SecretString,
    pub user: UserResponse,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
