#![allow(
    clippy::print_stdout,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items
)]

//! Postgres-backed intake server example.
//!
//! Run with: `cargo run --example postgres_server --features "axum_api sqlx_postgres"`
//!
//! Environment variables:
//!   DATABASE_URL=postgres://localhost/intake
//!   INTAKE_JWT_SECRET=<at least 32 bytes>
//!   INTAKE_BIND_ADDR=127.0.0.1:8080 (optional)

use axum::Router;
use intake::Argon2Hasher;
use intake::api::{AppState, intake_routes};
use intake::config::IntakeConfig;
use intake::jwt::JwtService;
use intake::postgres::{
    PostgresClientRepository, PostgresCompanyRepository, PostgresContactCompanyRepository,
    PostgresContactRepository, PostgresIdentityProvider, PostgresUserRepository,
    create_repositories, migrations,
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = IntakeConfig::from_env();
    config.validate().expect("Invalid configuration");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to create pool");

    migrations::run_core(&pool)
        .await
        .expect("Failed to run migrations");

    let jwt = JwtService::new(config.jwt_secret.expose_secret(), config.session_expiry)
        .expect("Failed to configure JWT service");
    let identity = PostgresIdentityProvider::new(pool.clone(), Argon2Hasher::production(), jwt);

    let (clients, users, contacts, companies, links) = create_repositories(pool);

    let state = AppState {
        identity,
        clients,
        users,
        contacts,
        companies,
        links,
    };

    let app = Router::new()
        .merge(intake_routes::<
            PostgresIdentityProvider,
            PostgresClientRepository,
            PostgresUserRepository,
            PostgresContactRepository,
            PostgresCompanyRepository,
            PostgresContactCompanyRepository,
        >())
        .with_state(state);

    println!("Starting intake server on http://{}", config.bind_addr);
    println!("Database: {}", config.database_url);
    println!("Endpoints:");
    println!("  GET  /           - Liveness probe");
    println!("  POST /onboarding - Onboard a client");
    println!("  POST /login      - Login");

    let listener = TcpListener::bind(&config.bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
