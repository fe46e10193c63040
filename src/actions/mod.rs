//! Business actions.
//!
//! Each action is a struct holding its injected collaborators with a single
//! `execute` method. [`OnboardAction`] is the onboarding orchestrator;
//! [`LoginAction`] authenticates against the identity provider and loads the
//! internal user mirror.

mod login;
mod onboard;

pub use login::LoginAction;
pub use onboard::{OnboardAction, OnboardInput, OnboardOutcome, OnboardProfile, ProfileKind};
