//! HTTP handlers for the intake endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::error::AppError;
use super::routes::AppState;
use super::types::{LoginRequest, LoginResponse, OnboardRequest, OnboardResponse, UserResponse};
use crate::actions::{LoginAction, OnboardAction};
use crate::crypto::SecretString;
use crate::identity::IdentityProvider;
use crate::records::{
    ClientRepository, CompanyRepository, ContactCompanyRepository, ContactRepository,
    UserRepository,
};

/// Liveness probe.
///
/// GET /
pub async fn health() -> &'static str {
    "intake is running"
}

/// Onboard a new client.
///
/// POST /onboarding
pub async fn onboard<I, C, U, P, M, L>(
    State(state): State<AppState<I, C, U, P, M, L>>,
    Json(body): Json<OnboardRequest>,
) -> impl IntoResponse
where
    I: IdentityProvider + Clone + Send + Sync + 'static,
    C: ClientRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
    P: ContactRepository + Clone + Send + Sync + 'static,
    M: CompanyRepository + Clone + Send + Sync + 'static,
    L: ContactCompanyRepository + Clone + Send + Sync + 'static,
{
    let action = OnboardAction::new(
        state.identity,
        state.clients,
        state.users,
        state.contacts,
        state.companies,
        state.links,
    );

    match action.execute(body.into()).await {
        Ok(outcome) => (
            StatusCode::CREATED,
            Json(OnboardResponse {
                message: "Client onboarded successfully".to_owned(),
                client_id: outcome.client_id,
                user_id: outcome.user_id,
                company_id: outcome.company_id,
                contact_id: outcome.contact_id,
            }),
        )
            .into_response(),
        Err(err) => AppError(err).into_response(),
    }
}

/// Authenticate and return a session token plus the user record.
///
/// POST /login
pub async fn login<I, C, U, P, M, L>(
    State(state): State<AppState<I, C, U, P, M, L>>,
    Json(body): Json<LoginRequest>,
) -> impl IntoResponse
where
    I: IdentityProvider + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    M: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let action = LoginAction::new(state.identity, state.users);
    let password = SecretString::new(body.password);

    match action.execute(&body.email, &password).await {
        Ok((user, session)) => (
            StatusCode::OK,
            Json(LoginResponse {
                token: session.token,
                user: UserResponse::from(user),
            }),
        )
            .into_response(),
        Err(err) => AppError(err).into_response(),
    }
}
