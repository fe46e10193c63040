//! Record store traits and data types.
//!
//! One trait per entity, mirroring the tables the orchestrator writes.
//! Implement these traits to use your own database; the crate ships sqlx
//! Postgres implementations behind the `sqlx_postgres` feature.
//!
//! # Traits
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`ClientRepository`] | Tenant/client rows |
//! | [`UserRepository`] | Internal mirror of the auth identity |
//! | [`ContactRepository`] | Person records |
//! | [`CompanyRepository`] | Organization records |
//! | [`ContactCompanyRepository`] | Contact-to-company link rows |
//!
//! Every trait exposes a delete-by-id used only by compensating rollback;
//! no entity is updated after creation.
//!
//! # Mock Implementations
//!
//! Enable the `mocks` feature for in-memory implementations useful for
//! testing. The mocks carry insert/delete failure toggles so rollback paths
//! can be exercised without a real backend.

mod client;
mod company;
mod contact;
mod contact_company;
mod user;

#[cfg(any(test, feature = "mocks"))]
mod client_mock;
#[cfg(any(test, feature = "mocks"))]
mod company_mock;
#[cfg(any(test, feature = "mocks"))]
mod contact_company_mock;
#[cfg(any(test, feature = "mocks"))]
mod contact_mock;
#[cfg(any(test, feature = "mocks"))]
mod user_mock;

pub use client::{Client, ClientRepository, ClientType, NewClient};
pub use company::{Company, CompanyRepository, NewCompany};
pub use contact::{Contact, ContactRepository, NewContact};
pub use contact_company::{ContactCompany, ContactCompanyRepository};
pub use user::{NewUser, User, UserRepository};

#[cfg(any(test, feature = "mocks"))]
pub use client_mock::MockClientRepository;
#[cfg(any(test, feature = "mocks"))]
pub use company_mock::MockCompanyRepository;
#[cfg(any(test, feature = "mocks"))]
pub use contact_company_mock::MockContactCompanyRepository;
#[cfg(any(test, feature = "mocks"))]
pub use contact_mock::MockContactRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;
