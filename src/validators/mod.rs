//! Field validation and normalization.
//!
//! Everything here is pure: no I/O, no clock. The orchestrator runs these
//! before its first external call so invalid payloads never cause side
//! effects.

pub mod document;
pub mod email;
pub mod password;
pub mod phone;

pub use document::normalize_document;
pub use email::validate_email;
pub use password::validate_password;
pub use phone::normalize_phone;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmailEmpty,
    EmailTooLong,
    EmailInvalidFormat,
    PasswordEmpty,
    PasswordTooShort,
    PasswordTooLong,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailEmpty => write!(f, "Email cannot be empty"),
            Self::EmailTooLong => write!(f, "Email is too long (max 254 characters)"),
            Self::EmailInvalidFormat => write!(f, "Invalid email format"),
            Self::PasswordEmpty => write!(f, "Password cannot be empty"),
            Self::PasswordTooShort => write!(f, "Password must be at least 8 characters"),
            Self::PasswordTooLong => write!(f, "Password is too long (max 128 characters)"),
        }
    }
}

impl std::error::Error for ValidationError {}
