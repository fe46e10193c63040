#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use crate::IntakeError;

use super::client::{Client, ClientRepository, NewClient};

/// In-memory client store with failure toggles for exercising rollback.
#[derive(Clone)]
pub struct MockClientRepository {
    pub clients: Arc<Mutex<Vec<Client>>>,
    next_id: Arc<AtomicI32>,
    fail_inserts: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl MockClientRepository {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(Mutex::new(vec![])),
            next_id: Arc::new(AtomicI32::new(1)),
            fail_inserts: Arc::new(AtomicBool::new(false)),
            fail_deletes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes every subsequent insert fail with a dependency error.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent delete fail with a dependency error.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.clients.lock().unwrap().len()
    }
}

#[async_trait]
impl ClientRepository for MockClientRepository {
    async fn insert_client(&self, client: NewClient) -> Result<Client, IntakeError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("client insert failed".to_owned()));
        }

        let mut clients = self.clients.lock().unwrap();
        if clients.iter().any(|c| c.email == client.email) {
            return Err(IntakeError::Conflict(
                "A client with this email already exists".to_owned(),
            ));
        }

        let stored = Client {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            display_name: client.display_name,
            company_name: client.company_name,
            document: client.document,
            email: client.email,
            phone: client.phone,
            client_type: client.client_type,
            created_at: Utc::now(),
        };
        clients.push(stored.clone());

        Ok(stored)
    }

    async fn delete_client(&self, id: i32) -> Result<(), IntakeError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(IntakeError::Dependency("client delete failed".to_owned()));
        }

        let mut clients = self.clients.lock().unwrap();
        let len_before = clients.len();
        clients.retain(|c| c.id != id);
        if clients.len() < len_before {
            Ok(())
        } else {
            Err(IntakeError::Dependency(format!("client {} not found", id)))
        }
    }
}
