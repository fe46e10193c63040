#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use crate::IntakeError;

use super::user::{NewUser, User, UserRepository};

/// In-memory user store with failure toggles for exercising rollback.
#[derive(Clone)]
pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<User>>>,
    next_id: Arc<AtomicI32>,
    fail_inserts: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(vec![])),
            next_id: Arc::new(AtomicI32::new(1)),
            fail_inserts: Arc::new(AtomicBool::new(false)),
            fail_deletes: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn insert_user(&self, user: NewUser) -> Result<User, IntakeError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("user insert failed".to_owned()));
        }

        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(IntakeError::Conflict(
                "A user with this email already exists".to_owned(),
            ));
        }

        let stored = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            client_id: user.client_id,
            identity_id: user.identity_id,
            email: user.email,
            full_name: user.full_name,
            hashed_password: user.hashed_password,
            created_at: Utc::now(),
        };
        users.push(stored.clone());

        Ok(stored)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, IntakeError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn delete_user(&self, id: i32) -> Result<(), IntakeError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("user delete failed".to_owned()));
        }

        let mut users = self.users.lock().unwrap();
        let len_before = users.len();
        users.retain(|u| u.id != id);
        if users.len() < len_before {
            Ok(())
        } else {
            Err(IntakeError::Dependency(format!("user {} not found", id)))
        }
    }
}
