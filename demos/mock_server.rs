#![allow(
    clippy::print_stdout,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items
)]

//! In-memory intake server example.
//!
//! Everything lives in process memory; restart and it is gone. Useful for
//! poking at the API without Postgres.
//!
//! Run with: `cargo run --example mock_server --features "axum_api mocks"`
//!
//! Try it:
//!   curl -X POST http://localhost:8080/onboarding \
//!     -H "Content-Type: application/json" \
//!     -d '{"client_type": "company", "full_name": "Maria Souza", "company_name": "XPTO LTDA", "document": "12.345.678/0001-99", "email": "maria@xpto.com", "password": "secret123", "phone": "(11) 99999-9999"}'

use axum::Router;
use intake::api::{AppState, intake_routes, permissive_cors};
use intake::config::IntakeConfig;
use intake::{
    MockClientRepository, MockCompanyRepository, MockContactCompanyRepository,
    MockContactRepository, MockIdentityProvider, MockUserRepository,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = IntakeConfig::from_env();

    let state = AppState {
        identity: MockIdentityProvider::new(),
        clients: MockClientRepository::new(),
        users: MockUserRepository::new(),
        contacts: MockContactRepository::new(),
        companies: MockCompanyRepository::new(),
        links: MockContactCompanyRepository::new(),
    };

    let app = Router::new()
        .merge(intake_routes::<
            MockIdentityProvider,
            MockClientRepository,
            MockUserRepository,
            MockContactRepository,
            MockCompanyRepository,
            MockContactCompanyRepository,
        >())
        .layer(permissive_cors())
        .with_state(state);

    println!("Starting in-memory intake server on http://{}", config.bind_addr);
    println!("Endpoints:");
    println!("  GET  /           - Liveness probe");
    println!("  POST /onboarding - Onboard a client");
    println!("  POST /login      - Login");

    let listener = TcpListener::bind(&config.bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
