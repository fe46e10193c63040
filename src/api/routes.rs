use axum::Router;
use axum::routing::{get, post};

use super::handlers;
use crate::identity::IdentityProvider;
use crate::records::{
    ClientRepository, CompanyRepository, ContactCompanyRepository, ContactRepository,
    UserRepository,
};

/// Injected collaborators, shared across requests.
#[derive(Clone)]
pub struct AppState<I, C, U, P, M, L> {
    pub identity: I,
    pub clients: C,
    pub users: U,
    pub contacts: P,
    pub companies: M,
    pub links: L,
}

/// Builds the intake router: liveness probe, onboarding and login.
pub fn intake_routes<I, C, U, P, M, L>() -> Router<AppState<I, C, U, P, M, L>>
where
    I: IdentityProvider + Clone + Send + Sync + 'static,
    C: ClientRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
    P: ContactRepository + Clone + Send + Sync + 'static,
    M: CompanyRepository + Clone + Send + Sync + 'static,
    L: ContactCompanyRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::health))
        .route("/onboarding", post(handlers::onboard::<I, C, U, P, M, L>))
        .route("/login", post(handlers::login::<I, C, U, P, M, L>))
}
