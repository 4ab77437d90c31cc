use crate::{DbError, Result};

use ids_core::ErrorLocation;

use std::panic::Location;

use sqlx::SqlitePool;

/// Applies the bundled schema migrations to `pool`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::Migration {
            message: format!("Migration failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(())
}
