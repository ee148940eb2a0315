//! In-memory [`ItemStore`] for tests.

use crate::models::{Item, SEED_ITEMS};
use crate::services::{ItemStore, SeedOutcome, StoreError, StoreErrorKind};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Mimics the PostgreSQL store: seeding only when empty, and scripted
/// connection or query failures.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<Item>>,
    failing_connects: AtomicU32,
    failure: Option<StoreErrorKind>,
    initialize_calls: AtomicU32,
}

impl MemoryStore {
    /// Empty table, reachable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already holding the seed rows.
    pub fn seeded() -> Self {
        let store = Self::new();
        store.insert_seed_rows();
        store
    }

    /// The next `n` connection attempts fail.
    pub fn unavailable_for(self, n: u32) -> Self {
        self.failing_connects.store(n, Ordering::SeqCst);
        self
    }

    /// Every connection attempt fails.
    pub fn unreachable() -> Self {
        Self::new().unavailable_for(u32::MAX)
    }

    /// Connections succeed but reads fail with the given kind.
    pub fn failing_reads(self, kind: StoreErrorKind) -> Self {
        Self {
            failure: Some(kind),
            ..self
        }
    }

    /// Number of `initialize` calls seen so far.
    pub fn initialize_calls(&self) -> u32 {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    fn connect(&self) -> Result<(), StoreError> {
        let refused = self
            .failing_connects
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                if n == u32::MAX {
                    Some(n)
                } else {
                    n.checked_sub(1)
                }
            })
            .is_ok();
        if refused {
            Err(error_of_kind(StoreErrorKind::Connection))
        } else {
            Ok(())
        }
    }

    fn read(&self) -> Result<(), StoreError> {
        self.connect()?;
        match self.failure {
            Some(kind) => Err(error_of_kind(kind)),
            None => Ok(()),
        }
    }

    fn insert_seed_rows(&self) -> u64 {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        let now = chrono::Utc::now().naive_utc();
        for (name, description) in SEED_ITEMS {
            let id = items.len() as i32 + 1;
            items.push(Item {
                id,
                name: (*name).to_string(),
                description: Some((*description).to_string()),
                created_at: now,
            });
        }
        SEED_ITEMS.len() as u64
    }
}

/// A representative driver error for each failure kind.
pub fn error_of_kind(kind: StoreErrorKind) -> StoreError {
    match kind {
        StoreErrorKind::Connection => StoreError::Connection(sqlx::Error::Io(
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
        )),
        StoreErrorKind::Query => StoreError::Query(sqlx::Error::Protocol(
            "relation \"items\" does not exist".to_string(),
        )),
        StoreErrorKind::Serialization => {
            StoreError::Serialization(sqlx::Error::ColumnNotFound("name".to_string()))
        }
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.connect()
    }

    async fn list_items(&self) -> Result<Vec<Item>, StoreError> {
        self.read()?;
        Ok(self.items.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn count_items(&self) -> Result<i64, StoreError> {
        self.read()?;
        Ok(self.items.lock().unwrap_or_else(|e| e.into_inner()).len() as i64)
    }

    async fn initialize(&self) -> Result<SeedOutcome, StoreError> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        self.connect()?;

        let rows = self.items.lock().unwrap_or_else(|e| e.into_inner()).len() as i64;
        if rows == 0 {
            Ok(SeedOutcome::Seeded {
                inserted: self.insert_seed_rows(),
            })
        } else {
            Ok(SeedOutcome::AlreadyPopulated { rows })
        }
    }
}
