mod common;

use common::create_test_role;

use ids_core::{CancellationToken, RoleStore};
use ids_db::{ConnectionManager, DbError, DocumentRoleStore};

use googletest::prelude::*;
use tempfile::TempDir;

#[tokio::test]
async fn given_new_database_when_getting_pool_then_creates_file_and_runs_migrations() {
    // Given
    let temp_dir = TempDir::new().unwrap();
    let manager = ConnectionManager::new(temp_dir.path());

    // When
    let pool = manager.get_pool("identity").await.unwrap();

    // Then
    assert_that!(temp_dir.path().join("identity.db").exists(), eq(true));
    let store = DocumentRoleStore::new(pool);
    let result = store
        .create(&create_test_role("Admin"), &CancellationToken::new())
        .await
        .unwrap();
    assert_that!(result.succeeded(), eq(true));
}

#[tokio::test]
async fn given_existing_database_when_getting_pool_again_then_sees_same_data() {
    // Given
    let temp_dir = TempDir::new().unwrap();
    let manager = ConnectionManager::new(temp_dir.path()).with_max_connections(2);
    let cancel = CancellationToken::new();
    let role = create_test_role("Admin");

    let first = DocumentRoleStore::new(manager.get_pool("identity").await.unwrap());
    first.create(&role, &cancel).await.unwrap();

    // When
    let second = DocumentRoleStore::<String>::new(manager.get_pool("identity").await.unwrap());

    // Then
    let found = second.find_by_id(&role.id, &cancel).await.unwrap();
    assert_that!(found, some(eq(&role)));
}

#[tokio::test]
async fn given_two_databases_when_writing_then_data_is_isolated() {
    // Given
    let temp_dir = TempDir::new().unwrap();
    let manager = ConnectionManager::new(temp_dir.path()).with_durable_writes(false);
    let cancel = CancellationToken::new();
    let role = create_test_role("Admin");

    let first = DocumentRoleStore::new(manager.get_pool("first").await.unwrap());
    let second = DocumentRoleStore::<String>::new(manager.get_pool("second").await.unwrap());

    // When
    first.create(&role, &cancel).await.unwrap();

    // Then
    assert_that!(second.find_by_id(&role.id, &cancel).await.unwrap(), none());
}

#[tokio::test]
async fn given_blank_database_name_when_getting_pool_then_returns_invalid_argument() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConnectionManager::new(temp_dir.path());

    let result = manager.get_pool(" ").await;

    assert!(matches!(result, Err(DbError::InvalidArgument { .. })));
}

#[tokio::test]
async fn given_open_pools_when_closed_then_pools_are_released() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConnectionManager::new(temp_dir.path());
    let pool = manager.get_pool("identity").await.unwrap();

    manager.close().await;

    assert_that!(pool.is_closed(), eq(true));
}
