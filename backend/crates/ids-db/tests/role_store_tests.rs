mod common;

use common::{claim, create_test_pool, create_test_role, raw_body};

use ids_core::{
    CancellationToken, ErrorDescriber, IdentityError, IdentityRole, QueryableRoleStore,
    RoleClaimStore, RoleStore,
};
use ids_db::{DEFAULT_ROLES_COLLECTION, DbError, DocumentRoleStore};

use std::sync::Arc;

use googletest::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn given_new_role_when_created_then_can_be_found_by_id_and_name() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let role = create_test_role("Admin");

    // When
    let result = store.create(&role, &cancel).await.unwrap();

    // Then
    assert_that!(result.succeeded(), eq(true));

    let by_id = store.find_by_id(&role.id, &cancel).await.unwrap();
    assert_that!(by_id, some(eq(&role)));

    let by_name = store.find_by_name("ADMIN", &cancel).await.unwrap();
    assert_that!(by_name, some(eq(&role)));
}

#[tokio::test]
async fn given_existing_name_when_creating_another_role_then_fails_with_duplicate_role_name() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    store.create(&create_test_role("Admin"), &cancel).await.unwrap();

    // When
    let result = store.create(&create_test_role("Admin"), &cancel).await.unwrap();

    // Then
    assert_that!(result.succeeded(), eq(false));
    assert_that!(result.errors(), len(eq(1)));
    assert_that!(result.errors()[0].code, eq("DuplicateRoleName"));
    assert_that!(
        result.errors()[0].description,
        eq("Role name 'Admin' is already taken.")
    );
    assert_that!(store.roles(&cancel).await.unwrap(), len(eq(1)));
}

#[tokio::test]
async fn given_two_roles_when_renaming_one_to_the_other_then_update_fails() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let admin = create_test_role("Admin");
    let mut editor = create_test_role("Editor");
    store.create(&admin, &cancel).await.unwrap();
    store.create(&editor, &cancel).await.unwrap();

    // When
    editor.name = Some("Admin".to_string());
    let result = store.update(&editor, &cancel).await.unwrap();

    // Then
    assert_that!(result.succeeded(), eq(false));
    assert_that!(result.errors()[0].code, eq("DuplicateRoleName"));

    let stored = store.find_by_id(&editor.id, &cancel).await.unwrap().unwrap();
    assert_that!(stored.name.as_deref(), some(eq("Editor")));
}

#[tokio::test]
async fn given_stored_role_when_updated_with_own_name_then_succeeds() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let mut role = create_test_role("Admin");
    store.create(&role, &cancel).await.unwrap();

    // When
    role.normalized_name = Some("ADMINISTRATOR".to_string());
    let result = store.update(&role, &cancel).await.unwrap();

    // Then
    assert_that!(result.succeeded(), eq(true));
    let found = store.find_by_name("ADMINISTRATOR", &cancel).await.unwrap();
    assert_that!(found, some(anything()));
}

#[tokio::test]
async fn given_role_never_stored_when_updated_then_is_inserted() {
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let role = create_test_role("Ghost");

    let result = store.update(&role, &cancel).await.unwrap();

    assert_that!(result.succeeded(), eq(true));
    assert_that!(store.find_by_id(&role.id, &cancel).await.unwrap(), some(anything()));
}

#[tokio::test]
async fn given_stored_role_when_deleted_then_is_gone_and_second_delete_succeeds() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let role = create_test_role("Admin");
    store.create(&role, &cancel).await.unwrap();

    // When
    let first = store.delete(&role, &cancel).await.unwrap();
    let second = store.delete(&role, &cancel).await.unwrap();

    // Then
    assert_that!(first.succeeded(), eq(true));
    assert_that!(second.succeeded(), eq(true));
    assert_that!(store.find_by_id(&role.id, &cancel).await.unwrap(), none());
}

#[tokio::test]
async fn given_blank_lookup_keys_when_finding_then_returns_none() {
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::<String>::new(pool);
    let cancel = CancellationToken::new();

    assert_that!(store.find_by_id("", &cancel).await.unwrap(), none());
    assert_that!(store.find_by_name("  ", &cancel).await.unwrap(), none());
}

#[tokio::test]
async fn given_uuid_keyed_store_when_finding_malformed_id_then_returns_invalid_key() {
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::<Uuid>::new(pool);
    let cancel = CancellationToken::new();

    let result = store.find_by_id("not-a-uuid", &cancel).await;

    assert!(matches!(result, Err(DbError::InvalidKey { .. })));
}

#[tokio::test]
async fn given_uuid_keyed_role_when_created_then_round_trips() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::<Uuid>::new(pool);
    let cancel = CancellationToken::new();
    let mut role = IdentityRole::named(Uuid::new_v4(), "Admin");
    role.normalized_name = Some("ADMIN".to_string());

    // When
    store.create(&role, &cancel).await.unwrap();

    // Then
    let found = store
        .find_by_id(&role.id.to_string(), &cancel)
        .await
        .unwrap();
    assert_that!(found, some(eq(&role)));
}

#[tokio::test]
async fn given_role_without_id_when_created_then_returns_invalid_argument() {
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let role = IdentityRole::<String>::default();

    let result = store.create(&role, &cancel).await;

    assert!(matches!(result, Err(DbError::InvalidArgument { .. })));
}

#[tokio::test]
async fn given_stored_role_when_created_again_then_fails_with_duplicate_role_name() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let role = create_test_role("Admin");
    store.create(&role, &cancel).await.unwrap();

    // When
    let result = store.create(&role, &cancel).await.unwrap();

    // Then
    assert_that!(result.succeeded(), eq(false));
    assert_that!(result.errors().len(), eq(1));
    assert_that!(result.errors()[0].code, eq("DuplicateRoleName"));
}

#[tokio::test]
async fn given_role_without_id_when_claim_added_then_errors_and_leaves_role_unchanged() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let mut role = IdentityRole::<String>::with_id(String::new());

    // When
    let result = store.add_claim(&mut role, claim("scope", "read"), &cancel).await;

    // Then
    assert!(matches!(result, Err(DbError::InvalidArgument { .. })));
    assert_that!(role.claims().len(), eq(0));
}

#[tokio::test]
async fn given_role_without_id_when_claim_removed_then_errors_and_keeps_claim() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let mut role = IdentityRole::<String>::with_id(String::new());
    role.claims_mut().push(claim("scope", "read"));

    // When
    let result = store.remove_claim(&mut role, &claim("scope", "read"), &cancel).await;

    // Then
    assert!(matches!(result, Err(DbError::InvalidArgument { .. })));
    assert_that!(role.claims(), elements_are![eq(&claim("scope", "read"))]);
}

#[tokio::test]
async fn given_stored_role_when_claim_added_then_claim_is_persisted() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let mut role = create_test_role("Admin");
    store.create(&role, &cancel).await.unwrap();

    // When
    store
        .add_claim(&mut role, claim("permission", "users.read"), &cancel)
        .await
        .unwrap();
    store
        .add_claim(&mut role, claim("permission", "users.write"), &cancel)
        .await
        .unwrap();

    // Then
    let stored = store.find_by_id(&role.id, &cancel).await.unwrap().unwrap();
    assert_that!(
        stored.claims(),
        elements_are![
            eq(&claim("permission", "users.read")),
            eq(&claim("permission", "users.write"))
        ]
    );
    assert_that!(store.get_claims(&stored, &cancel).await.unwrap(), len(eq(2)));
}

#[tokio::test]
async fn given_role_with_claims_when_unknown_claim_removed_then_nothing_changes() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let mut role = create_test_role("Admin");
    role.set_claims(Some(vec![claim("permission", "all")]));
    store.create(&role, &cancel).await.unwrap();

    // When
    store
        .remove_claim(&mut role, &claim("permission", "none"), &cancel)
        .await
        .unwrap();

    // Then
    assert_that!(role.claims(), len(eq(1)));
    let stored = store.find_by_id(&role.id, &cancel).await.unwrap().unwrap();
    assert_that!(stored.claims(), elements_are![eq(&claim("permission", "all"))]);
}

#[tokio::test]
async fn given_role_with_claim_when_removed_then_removal_is_persisted() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let mut role = create_test_role("Admin");
    role.set_claims(Some(vec![claim("permission", "all"), claim("scope", "api")]));
    store.create(&role, &cancel).await.unwrap();

    // When
    store
        .remove_claim(&mut role, &claim("permission", "all"), &cancel)
        .await
        .unwrap();

    // Then
    let stored = store.find_by_id(&role.id, &cancel).await.unwrap().unwrap();
    assert_that!(stored.claims(), elements_are![eq(&claim("scope", "api"))]);
}

#[tokio::test]
async fn given_role_when_names_set_through_store_then_record_is_updated() {
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let mut role = IdentityRole::new("old");

    store.set_role_name(&mut role, Some("new".to_string())).unwrap();
    store
        .set_normalized_role_name(&mut role, Some("NEW".to_string()))
        .unwrap();

    assert_that!(store.get_role_name(&role).unwrap(), some(eq("new")));
    assert_that!(store.get_normalized_role_name(&role).unwrap(), some(eq("NEW")));
    assert_that!(store.get_role_id(&role).unwrap(), some(eq(&role.id)));
}

#[tokio::test]
async fn given_disposed_store_when_called_then_every_operation_fails() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    let role = create_test_role("Admin");

    // When
    store.dispose();

    // Then
    assert!(matches!(
        store.create(&role, &cancel).await,
        Err(DbError::Disposed { .. })
    ));
    assert!(matches!(
        store.find_by_name("ADMIN", &cancel).await,
        Err(DbError::Disposed { .. })
    ));
    assert!(matches!(
        store.get_role_name(&role),
        Err(DbError::Disposed { .. })
    ));
}

#[tokio::test]
async fn given_cancelled_token_when_creating_then_nothing_is_written() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool);
    let cancel = CancellationToken::new();
    cancel.cancel();

    // When
    let result = store.create(&create_test_role("Admin"), &cancel).await;

    // Then
    assert!(matches!(result, Err(DbError::Cancelled { .. })));
    let live = CancellationToken::new();
    assert_that!(store.roles(&live).await.unwrap(), len(eq(0)));
}

#[tokio::test]
async fn given_blank_collection_name_when_constructed_then_uses_default_collection() {
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::<String>::with_collection_name(pool.clone(), " ");
    let cancel = CancellationToken::new();
    let role = create_test_role("Admin");

    store.create(&role, &cancel).await.unwrap();

    assert_that!(store.collection().name(), eq(DEFAULT_ROLES_COLLECTION));
    assert_that!(
        raw_body(&pool, DEFAULT_ROLES_COLLECTION, &role.id).await,
        some(anything())
    );
}

struct TerseDescriber;

impl ErrorDescriber for TerseDescriber {
    fn duplicate_role_name(&self, role_name: &str) -> IdentityError {
        IdentityError::new("DuplicateRoleName", format!("{role_name} taken"))
    }
}

#[tokio::test]
async fn given_custom_describer_when_name_taken_then_uses_custom_message() {
    // Given
    let pool = create_test_pool().await;
    let store = DocumentRoleStore::new(pool).with_describer(Arc::new(TerseDescriber));
    let cancel = CancellationToken::new();
    store.create(&create_test_role("Admin"), &cancel).await.unwrap();

    // When
    let result = store.create(&create_test_role("Admin"), &cancel).await.unwrap();

    // Then
    assert_that!(result.errors()[0].description, eq("Admin taken"));
}
