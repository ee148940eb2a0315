//! Store abstraction used by the initializer and the request handlers.

use crate::models::Item;
use async_trait::async_trait;
use thiserror::Error;

/// Failure talking to the item store.
///
/// Every variant maps to the same HTTP failure shape; the split exists so
/// logs and tests can tell the kinds apart.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening or closing the connection failed.
    #[error("connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement (or the commit) failed.
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// A row could not be decoded into an [`Item`].
    #[error("could not decode row: {0}")]
    Serialization(#[source] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Connection,
    Query,
    Serialization,
}

impl StoreErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::Query => "query",
            Self::Serialization => "serialization",
        }
    }
}

impl std::fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            Self::Connection(_) => StoreErrorKind::Connection,
            Self::Query(_) => StoreErrorKind::Query,
            Self::Serialization(_) => StoreErrorKind::Serialization,
        }
    }

    /// Classify an error raised while executing a statement.
    pub fn from_query(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => Self::Serialization(err),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::Connection(err),
            _ => Self::Query(err),
        }
    }
}

/// What a successful initialization attempt did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table was empty and the seed rows were inserted.
    Seeded { inserted: u64 },
    /// The table already held rows; nothing was inserted.
    AlreadyPopulated { rows: i64 },
}

/// Operations the service needs from the relational backend.
///
/// Implementations acquire a fresh connection per call and release it on
/// every exit path.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Connect and immediately close.
    async fn ping(&self) -> Result<(), StoreError>;

    /// All rows of the `items` table, ordered by id.
    async fn list_items(&self) -> Result<Vec<Item>, StoreError>;

    /// `SELECT COUNT(*) FROM items`.
    async fn count_items(&self) -> Result<i64, StoreError>;

    /// One initialization attempt: create the table if missing and seed it
    /// when empty, atomically.
    async fn initialize(&self) -> Result<SeedOutcome, StoreError>;
}
