#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use crate::IntakeError;

use super::contact::{Contact, ContactRepository, NewContact};

/// In-memory contact store with failure toggles for exercising rollback.
#[derive(Clone)]
pub struct MockContactRepository {
    pub contacts: Arc<Mutex<Vec<Contact>>>,
    next_id: Arc<AtomicI32>,
    fail_inserts: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl MockContactRepository {
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(vec![])),
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
        self.contacts.lock().unwrap().len()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn insert_contact(&self, contact: NewContact) -> Result<Contact, IntakeError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("contact insert failed".to_owned()));
        }

        let stored = Contact {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            client_id: contact.client_id,
            user_id: contact.user_id,
            full_name: contact.full_name,
            email: contact.email,
            phone: contact.phone,
            created_at: Utc::now(),
        };
        self.contacts.lock().unwrap().push(stored.clone());

        Ok(stored)
    }

    async fn delete_contact(&self, id: i32) -> Result<(), IntakeError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("contact delete failed".to_owned()));
        }

        let mut contacts = self.contacts.lock().unwrap();
        let len_before = contacts.len();
        contacts.retain(|c| c.id != id);
        if contacts.len() < len_before {
            Ok(())
        } else {
            Err(IntakeError::Dependency(format!("contact {} not found", id)))
        }
    }
}
