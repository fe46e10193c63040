#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::IntakeError;
use crate::crypto::{Argon2Hasher, PasswordHasher, SecretString, generate_token};

use super::{AuthSession, Identity, IdentityProvider};

/// Length of provider-assigned identity ids.
const IDENTITY_ID_LENGTH: usize = 24;

struct StoredIdentity {
    id: String,
    email: String,
    hashed_password: String,
}

/// In-memory identity provider backed by argon2 hashes.
///
/// Session tokens are opaque random strings; nothing validates them, which
/// is all the login flow needs in tests.
#[derive(Clone)]
pub struct MockIdentityProvider {
    identities: Arc<Mutex<Vec<StoredIdentity>>>,
    hasher: Argon2Hasher,
    fail_creates: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            identities: Arc::new(Mutex::new(vec![])),
            // Low-cost parameters; these hashes only live for one test
            hasher: Argon2Hasher::new(1024, 1, 1),
            fail_creates: Arc::new(AtomicBool::new(false)),
            fail_deletes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes every subsequent create fail with a dependency error.
    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent delete fail with a dependency error.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.identities.lock().unwrap().len()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_identity(
        &self,
        email: &str,
        password: &SecretString,
        _full_name: &str,
    ) -> Result<Identity, IntakeError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("identity creation failed".to_owned()));
        }

        let hashed = self.hasher.hash(password.expose_secret())?;

        let mut identities = self.identities.lock().unwrap();
        if identities.iter().any(|i| i.email == email) {
            return Err(IntakeError::Conflict(
                "An identity with this email already exists".to_owned(),
            ));
        }

        let stored = StoredIdentity {
            id: generate_token(IDENTITY_ID_LENGTH),
            email: email.to_owned(),
            hashed_password: hashed,
        };
        let identity = Identity {
            id: stored.id.clone(),
            email: stored.email.clone(),
        };
        identities.push(stored);

        Ok(identity)
    }

    async fn delete_identity(&self, id: &str) -> Result<(), IntakeError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("identity delete failed".to_owned()));
        }

        let mut identities = self.identities.lock().unwrap();
        let len_before = identities.len();
        identities.retain(|i| i.id != id);
        if identities.len() < len_before {
            Ok(())
        } else {
            Err(IntakeError::Dependency(format!("identity {} not found", id)))
        }
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthSession, IntakeError> {
        let identities = self.identities.lock().unwrap();
        let identity = identities.iter().find(|i| i.email == email);

        if let Some(identity) = identity {
            if self
                .hasher
                .verify(password.expose_secret(), &identity.hashed_password)?
            {
                return Ok(AuthSession {
                    identity_id: identity.id.clone(),
                    token: SecretString::new(generate_token(32)),
                });
            }
        }

        Err(IntakeError::InvalidCredentials)
    }
}
