//! PostgreSQL-backed [`ItemStore`].
//!
//! No pool: every operation opens its own `PgConnection` and closes it
//! before returning.

use crate::models::{Item, SEED_ITEMS};
use crate::services::store::{ItemStore, SeedOutcome, StoreError};
use async_trait::async_trait;
use metrics::histogram;
use secrecy::{ExposeSecret, Secret};
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};
use std::time::Instant;
use tracing::{debug, info, instrument};

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100),
        description TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Store speaking to PostgreSQL through one short-lived connection per call.
#[derive(Clone)]
pub struct PgStore {
    database_url: Secret<String>,
}

impl PgStore {
    pub fn new(database_url: Secret<String>) -> Self {
        Self { database_url }
    }

    async fn connect(&self) -> Result<PgConnection, StoreError> {
        PgConnection::connect(self.database_url.expose_secret())
            .await
            .map_err(StoreError::Connection)
    }
}

/// Close `conn` and hand back `result`.
///
/// The connection is closed on both paths. After a failed query a failing
/// close is only logged and the query error is returned.
async fn release<T>(conn: PgConnection, result: Result<T, StoreError>) -> Result<T, StoreError> {
    match result {
        Ok(value) => {
            conn.close().await.map_err(StoreError::Connection)?;
            Ok(value)
        }
        Err(e) => {
            if let Err(close_err) = conn.close().await {
                debug!(error = %close_err, "Failed to close connection after error");
            }
            Err(e)
        }
    }
}

fn record_query<T>(operation: &'static str, started: Instant, result: &Result<T, StoreError>) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    histogram!(
        "items_db_query_duration_seconds",
        "operation" => operation,
        "outcome" => outcome
    )
    .record(started.elapsed().as_secs_f64());
}

async fn create_and_seed(conn: &mut PgConnection) -> Result<SeedOutcome, StoreError> {
    let mut tx = conn.begin().await.map_err(StoreError::from_query)?;

    sqlx::query(CREATE_TABLE_SQL)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::from_query)?;

    // Serializes concurrent initializers so only one of them sees an empty table.
    sqlx::query("LOCK TABLE items IN SHARE ROW EXCLUSIVE MODE")
        .execute(&mut *tx)
        .await
        .map_err(StoreError::from_query)?;

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
        .fetch_one(&mut *tx)
        .await
        .map_err(StoreError::from_query)?;

    let outcome = if rows == 0 {
        let mut insert = QueryBuilder::<Postgres>::new("INSERT INTO items (name, description) ");
        insert.push_values(SEED_ITEMS, |mut row, (name, description)| {
            row.push_bind(*name).push_bind(*description);
        });
        let result = insert
            .build()
            .execute(&mut *tx)
            .await
            .map_err(StoreError::from_query)?;
        SeedOutcome::Seeded {
            inserted: result.rows_affected(),
        }
    } else {
        SeedOutcome::AlreadyPopulated { rows }
    };

    tx.commit().await.map_err(StoreError::Query)?;

    Ok(outcome)
}

#[async_trait]
impl ItemStore for PgStore {
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<(), StoreError> {
        let conn = self.connect().await?;
        release(conn, Ok(())).await
    }

    #[instrument(skip(self))]
    async fn list_items(&self) -> Result<Vec<Item>, StoreError> {
        let started = Instant::now();
        let mut conn = self.connect().await?;

        let result = sqlx::query_as::<_, Item>(
            "SELECT id, name, description, created_at FROM items ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await
        .map_err(StoreError::from_query);

        let result = release(conn, result).await;
        record_query("list_items", started, &result);
        result
    }

    #[instrument(skip(self))]
    async fn count_items(&self) -> Result<i64, StoreError> {
        let started = Instant::now();
        let mut conn = self.connect().await?;

        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM items")
            .fetch_one(&mut conn)
            .await
            .map_err(StoreError::from_query);

        let result = release(conn, result).await;
        record_query("count_items", started, &result);
        result
    }

    #[instrument(skip(self))]
    async fn initialize(&self) -> Result<SeedOutcome, StoreError> {
        let started = Instant::now();
        let mut conn = self.connect().await?;

        let result = create_and_seed(&mut conn).await;
        let result = release(conn, result).await;
        record_query("initialize", started, &result);
        let outcome = result?;

        match outcome {
            SeedOutcome::Seeded { inserted } => info!(inserted, "Seeded items table"),
            SeedOutcome::AlreadyPopulated { rows } => {
                info!(rows, "Items table already populated, skipping seed")
            }
        }

        Ok(outcome)
    }
}
