//! PostgreSQL implementation of the record store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::schema;
use crate::config::{ConnectionParams, PoolSettings};
use crate::domain::{Record, RecordStore};
use crate::error::GatewayError;

/// PostgreSQL-backed record store using `sqlx::PgPool`.
///
/// Each operation borrows one pooled connection for its duration. The
/// connection guard returns it to the pool when dropped, so early returns
/// and errors never leak a connection.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store around an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens the connection pool.
    ///
    /// Connections are validated before every checkout; a dead one is
    /// discarded and replaced transparently. The first connection is opened
    /// eagerly, so an unreachable database fails here.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the database cannot be
    /// reached.
    pub async fn connect(
        params: &ConnectionParams,
        settings: &PoolSettings,
    ) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .test_before_acquire(true)
            .connect_with(params.connect_options())
            .await
            .map_err(|e| {
                GatewayError::PersistenceError(format!(
                    "cannot connect to {}:{}/{}: {e}",
                    params.host, params.port, params.dbname
                ))
            })?;

        tracing::info!(
            host = %params.host,
            port = params.port,
            dbname = %params.dbname,
            max_connections = settings.max_connections,
            "database pool ready"
        );
        Ok(Self { pool })
    }

    /// Creates the records table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), GatewayError> {
        sqlx::query(schema::CREATE_INPUTS_TABLE)
            .execute(&self.pool)
            .await?;
        tracing::debug!(table = schema::INPUTS_TABLE, "schema ensured");
        Ok(())
    }

    /// Closes every pooled connection. Used on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn ping(&self) -> Result<(), GatewayError> {
        sqlx::query(schema::PING).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, value: &str) -> Result<Record, GatewayError> {
        // Dropping the transaction without commit rolls it back.
        let mut tx = self.pool.begin().await?;
        let id = sqlx::query_scalar::<_, i32>(schema::INSERT_INPUT)
            .bind(value)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Record::new(id, value))
    }

    async fn list_all(&self) -> Result<Vec<Record>, GatewayError> {
        let rows = sqlx::query_as::<_, (i32, String)>(schema::SELECT_ALL_INPUTS)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Record::from).collect())
    }
}
