//! Database migrations.
//!
//! ```rust,ignore
//! use intake::postgres::migrations;
//! use sqlx::PgPool;
//!
//! async fn setup(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//!     migrations::run_core(pool).await
//! }
//! ```

use sqlx::PgPool;

/// Runs the core migrations: `identities`, `clients`, `users`, `contacts`,
/// `companies` and `contact_companies`.
pub async fn run_core(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations/core").run(pool).await
}
