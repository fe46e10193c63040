#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use crate::IntakeError;

use super::contact_company::{ContactCompany, ContactCompanyRepository};

/// In-memory link store with failure toggles for exercising rollback.
#[derive(Clone)]
pub struct MockContactCompanyRepository {
    pub links: Arc<Mutex<Vec<ContactCompany>>>,
    next_id: Arc<AtomicI32>,
    fail_inserts: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl MockContactCompanyRepository {
    pub fn new() -> Self {
        Self {
            links: Arc::new(Mutex::new(vec![])),
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
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl ContactCompanyRepository for MockContactCompanyRepository {
    async fn insert_contact_company(
        &self,
        contact_id: i32,
        company_id: i32,
    ) -> Result<ContactCompany, IntakeError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("link insert failed".to_owned()));
        }

        let stored = ContactCompany {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            contact_id,
            company_id,
        };
        self.links.lock().unwrap().push(stored.clone());

        Ok(stored)
    }

    async fn delete_contact_company(&self, id: i32) -> Result<(), IntakeError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("link delete failed".to_owned()));
        }

        let mut links = self.links.lock().unwrap();
        let len_before = links.len();
        links.retain(|l| l.id != id);
        if links.len() < len_before {
            Ok(())
        } else {
            Err(IntakeError::Dependency(format!("link {} not found", id)))
        }
    }
}
