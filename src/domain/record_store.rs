//! Storage seam between the HTTP surface and the database.
//!
//! Handlers only see [`RecordStore`]. Production wires in
//! [`PostgresStore`](crate::persistence::postgres::PostgresStore); tests and
//! local experiments use [`MemoryStore`].

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Record;
use crate::error::GatewayError;

/// Request-scoped access to stored records.
///
/// Every call borrows whatever underlying resource it needs (a pooled
/// connection for PostgreSQL) and releases it before returning, on both the
/// success and the error path.
#[async_trait]
pub trait RecordStore: std::fmt::Debug + Send + Sync {
    /// Runs a trivial round trip to prove the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the store cannot be
    /// reached.
    async fn ping(&self) -> Result<(), GatewayError>;

    /// Stores a new record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the write fails; nothing
    /// is committed in that case.
    async fn insert(&self, value: &str) -> Result<Record, GatewayError>;

    /// Returns every stored record, in whatever order the store yields them.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on read failure.
    async fn list_all(&self) -> Result<Vec<Record>, GatewayError>;
}

/// In-process record store.
///
/// Keeps records in insertion order and hands out ids starting at 1. The
/// availability switch makes every operation fail the way an unreachable
/// database would, so readiness and error paths can be exercised without
/// PostgreSQL.
#[derive(Debug)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
    available: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty, available store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Marks the store reachable or unreachable.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), GatewayError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(GatewayError::PersistenceError(
                "memory store is marked unavailable".to_string(),
            ))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ping(&self) -> Result<(), GatewayError> {
        self.check_available()
    }

    async fn insert(&self, value: &str) -> Result<Record, GatewayError> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let next_id = records.last().map_or(1, |r| r.id.saturating_add(1));
        let record = Record::new(next_id, value);
        records.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<Record>, GatewayError> {
        self.check_available()?;
        Ok(self.records.read().await.clone())
    }
}
