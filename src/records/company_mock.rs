#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use crate::IntakeError;

use super::company::{Company, CompanyRepository, NewCompany};

/// In-memory company store with failure toggles for exercising rollback.
#[derive(Clone)]
pub struct MockCompanyRepository {
    pub companies: Arc<Mutex<Vec<Company>>>,
    next_id: Arc<AtomicI32>,
    fail_inserts: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl MockCompanyRepository {
    pub fn new() -> Self {
        Self {
            companies: Arc::new(Mutex::new(vec![])),
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
        self.companies.lock().unwrap().len()
    }
}

#[async_trait]
impl CompanyRepository for MockCompanyRepository {
    async fn insert_company(&self, company: NewCompany) -> Result<Company, IntakeError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("company insert failed".to_owned()));
        }

        let stored = Company {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            client_id: company.client_id,
            user_id: company.user_id,
            legal_name: company.legal_name,
            document: company.document,
            created_at: Utc::now(),
        };
        self.companies.lock().unwrap().push(stored.clone());

        Ok(stored)
    }

    async fn delete_company(&self, id: i32) -> Result<(), IntakeError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("company delete failed".to_owned()));
        }

        let mut companies = self.companies.lock().unwrap();
        let len_before = companies.len();
        companies.retain(|c| c.id != id);
        if companies.len() < len_before {
            Ok(())
        } else {
            Err(IntakeError::Dependency(format!("company {} not found", id)))
        }
    }
}
