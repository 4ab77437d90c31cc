use crate::{DbError, Result, run_migrations};

use ids_core::ErrorLocation;

use std::collections::HashMap;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tokio::sync::RwLock;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Opens one SQLite file per database name under a base directory and caches
/// the resulting pools.
pub struct ConnectionManager {
    pools: Arc<RwLock<HashMap<String, SqlitePool>>>,
    base_path: PathBuf,
    max_connections: u32,
    durable_writes: bool,
}

impl ConnectionManager {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            pools: Arc::new(RwLock::new(HashMap::new())),
            base_path: base_path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            durable_writes: true,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// `false` trades the fsync on every commit for throughput.
    pub fn with_durable_writes(mut self, durable_writes: bool) -> Self {
        self.durable_writes = durable_writes;
        self
    }

    pub async fn get_pool(&self, database: &str) -> Result<SqlitePool> {
        {
            let pools = self.pools.read().await;
            if let Some(pool) = pools.get(database) {
                return Ok(pool.clone());
            }
        }

        let mut pools = self.pools.write().await;

        // Another task may have opened it while we waited for the write lock
        if let Some(pool) = pools.get(database) {
            return Ok(pool.clone());
        }

        let pool = self.create_pool(database).await?;
        pools.insert(database.to_string(), pool.clone());

        Ok(pool)
    }

    /// Closes every cached pool.
    pub async fn close(&self) {
        let mut pools = self.pools.write().await;
        for (name, pool) in pools.drain() {
            debug!("Closing database pool '{name}'");
            pool.close().await;
        }
    }

    async fn create_pool(&self, database: &str) -> Result<SqlitePool> {
        if database.trim().is_empty() {
            return Err(DbError::InvalidArgument {
                argument: "database",
                message: "database name must not be blank".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let db_path = self.get_database_path(database);

        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DbError::Initialization {
                    message: format!("Failed to create database directory: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        let synchronous = if self.durable_writes {
            SqliteSynchronous::Full
        } else {
            SqliteSynchronous::Normal
        };

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(synchronous);

        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect_with(options)
            .await?;

        run_migrations(&pool).await?;

        info!("Opened database '{}' at {}", database, db_path.display());

        Ok(pool)
    }

    fn get_database_path(&self, database: &str) -> PathBuf {
        self.base_path.join(format!("{database}.db"))
    }
}
