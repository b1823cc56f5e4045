//! Keyed lead persistence.
//!
//! The store owns identifier assignment and the case-insensitive email
//! uniqueness constraint. The pipeline's own duplicate lookup is only a fast
//! path; `insert` is the authoritative guard.

use crate::models::{email_key, Lead, NewLead};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage-layer failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The email uniqueness constraint rejected the insert.
    DuplicateKey(String),
    /// Connectivity loss or any other storage fault. Not retried.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateKey(email) => write!(f, "duplicate email: {}", email),
            StoreError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Port for lead persistence adapters.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Assign an identifier and persist the lead.
    async fn insert(&self, lead: NewLead) -> Result<Lead, StoreError>;

    /// Case-insensitive lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Lead>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, StoreError>;

    /// All leads in insertion order.
    async fn list_all(&self) -> Result<Vec<Lead>, StoreError>;

    /// Reachability probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Default)]
struct Inner {
    by_id: HashMap<Uuid, Lead>,
    by_email: HashMap<String, Uuid>,
    order: Vec<Uuid>,
}

/// Process-local store backed by a single `RwLock`.
///
/// The uniqueness check and the insert happen under one write guard, so
/// concurrent inserts of the same email cannot both succeed.
pub struct InMemoryLeadStore {
    inner: RwLock<Inner>,
    available: AtomicBool,
}

impl Default for InMemoryLeadStore {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            available: AtomicBool::new(true),
        }
    }
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate connectivity loss (`false`) or recovery (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store offline".to_string()))
        }
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn insert(&self, lead: NewLead) -> Result<Lead, StoreError> {
        self.check_available()?;
        let key = email_key(&lead.email);

        let mut inner = self.inner.write().await;
        if inner.by_email.contains_key(&key) {
            return Err(StoreError::DuplicateKey(lead.email));
        }

        let id = Uuid::new_v4();
        let stored = lead.into_lead(id);
        inner.by_email.insert(key, id);
        inner.by_id.insert(id, stored.clone());
        inner.order.push(id);

        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Lead>, StoreError> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner
            .by_email
            .get(&email_key(email))
            .and_then(|id| inner.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, StoreError> {
        self.check_available()?;
        Ok(self.inner.read().await.by_id.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Lead>, StoreError> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.by_id.get(id))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
