
use crate::Admin;

use ids_core::CancellationToken;
use ids_db::{DEFAULT_ROLES_COLLECTION, DEFAULT_USERS_COLLECTION, run_migrations};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Admin over a fresh in-memory database
pub(crate) async fn create_test_admin() -> Admin {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    Admin::new(
        pool,
        DEFAULT_USERS_COLLECTION,
        DEFAULT_ROLES_COLLECTION,
        CancellationToken::new(),
    )
}
