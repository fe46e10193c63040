//! Axum HTTP surface.
//!
//! Enabled by the `axum_api` feature. [`intake_routes`] builds the router;
//! [`AppState`] carries the injected provider and repositories.

mod cors;
mod error;
mod handlers;
mod routes;
mod types;

pub use cors::{default as default_cors, permissive as permissive_cors};
pub use error::AppError;
pub use routes::{AppState, intake_routes};
pub use types::{ErrorResponse, LoginRequest, LoginResponse, OnboardRequest, OnboardResponse, UserResponse};
