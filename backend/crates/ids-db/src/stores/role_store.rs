use crate::document::collection::DocumentCollection;
use crate::document::fields;
use crate::document::filter::Filter;
use crate::stores::store_guard::{DisposeGuard, ensure_not_cancelled, name_taken, require_key};
use crate::stores::{DEFAULT_ROLES_COLLECTION, collection_name_or};
use crate::{DbError, Result};

use ids_core::claims;
use ids_core::{
    CancellationToken, DefaultErrorDescriber, ErrorDescriber, IdentityClaim, IdentityKey,
    IdentityResult, IdentityRole, QueryableRoleStore, RoleClaimStore, RoleStore,
};

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use sqlx::SqlitePool;

const STORE_NAME: &str = "DocumentRoleStore";

/// Role store over a document collection.
///
/// Role names are kept unique by checking for another role with the same
/// name before each write. The check is not atomic with the write.
pub struct DocumentRoleStore<K: IdentityKey = String> {
    roles: DocumentCollection<IdentityRole<K>>,
    describer: Arc<dyn ErrorDescriber>,
    guard: DisposeGuard,
}

impl<K: IdentityKey> DocumentRoleStore<K> {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_collection_name(pool, DEFAULT_ROLES_COLLECTION)
    }

    pub fn with_collection_name(pool: SqlitePool, collection: &str) -> Self {
        let name = collection_name_or(collection, DEFAULT_ROLES_COLLECTION);
        Self::from_collection(DocumentCollection::new(pool, name))
    }

    pub fn from_collection(roles: DocumentCollection<IdentityRole<K>>) -> Self {
        Self {
            roles,
            describer: Arc::new(DefaultErrorDescriber),
            guard: DisposeGuard::default(),
        }
    }

    pub fn with_describer(mut self, describer: Arc<dyn ErrorDescriber>) -> Self {
        self.describer = describer;
        self
    }

    pub fn collection(&self) -> &DocumentCollection<IdentityRole<K>> {
        &self.roles
    }

    /// Every later call on this store fails with [`DbError::Disposed`].
    pub fn dispose(&self) {
        self.guard.dispose();
    }

    fn duplicate_name(&self, role: &IdentityRole<K>) -> IdentityResult {
        let name = role.name.as_deref().unwrap_or_default();
        warn!("Rejected role {}: name '{}' is already taken", role.id, name);
        IdentityResult::failed(self.describer.duplicate_role_name(name))
    }

    async fn persist_claims(&self, id: &str, role: &IdentityRole<K>) -> Result<()> {
        self.roles
            .set_field(id, fields::CLAIMS, role.claims())
            .await?;
        debug!("Saved {} claims for role {}", role.claims().len(), id);
        Ok(())
    }
}

#[async_trait]
impl<K: IdentityKey> RoleStore<K> for DocumentRoleStore<K> {
    type Error = DbError;

    async fn create(
        &self,
        role: &IdentityRole<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult> {
        self.guard.check(STORE_NAME)?;
        ensure_not_cancelled(cancel)?;
        let id = require_key(&role.id)?;

        if name_taken(&self.roles, &id, fields::NAME, role.name.as_deref()).await? {
            return Ok(self.duplicate_name(role));
        }

        match self.roles.insert_one(role).await {
            Ok(()) => {
                debug!("Created role {} ({})", id, role);
                Ok(IdentityResult::Success)
            }
            Err(e) if e.is_unique_violation() => Ok(self.duplicate_name(role)),
            Err(e) => Err(e),
        }
    }

    async fn update(
        &self,
        role: &IdentityRole<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult> {
        self.guard.check(STORE_NAME)?;
        ensure_not_cancelled(cancel)?;
        let id = require_key(&role.id)?;

        if name_taken(&self.roles, &id, fields::NAME, role.name.as_deref()).await? {
            return Ok(self.duplicate_name(role));
        }

        self.roles.replace_one(role).await?;
        debug!("Updated role {} ({})", id, role);

        Ok(IdentityResult::Success)
    }

    async fn delete(
        &self,
        role: &IdentityRole<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult> {
        self.guard.check(STORE_NAME)?;
        ensure_not_cancelled(cancel)?;
        let id = require_key(&role.id)?;

        let deleted = self.roles.delete_one(&id).await?;
        debug!("Deleted role {} ({} removed)", id, deleted);

        Ok(IdentityResult::Success)
    }

    fn get_role_id(&self, role: &IdentityRole<K>) -> Result<Option<String>> {
        self.guard.check(STORE_NAME)?;
        Ok(role.id.to_key_string())
    }

    fn get_role_name(&self, role: &IdentityRole<K>) -> Result<Option<String>> {
        self.guard.check(STORE_NAME)?;
        Ok(role.name.clone())
    }

    fn set_role_name(&self, role: &mut IdentityRole<K>, role_name: Option<String>) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        role.name = role_name;
        Ok(())
    }

    fn get_normalized_role_name(&self, role: &IdentityRole<K>) -> Result<Option<String>> {
        self.guard.check(STORE_NAME)?;
        Ok(role.normalized_name.clone())
    }

    fn set_normalized_role_name(
        &self,
        role: &mut IdentityRole<K>,
        normalized_name: Option<String>,
    ) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        role.normalized_name = normalized_name;
        Ok(())
    }

    async fn find_by_id(
        &self,
        role_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityRole<K>>> {
        self.guard.check(STORE_NAME)?;
        ensure_not_cancelled(cancel)?;

        let Some(id) = K::parse_key(role_id)?.and_then(|key| key.to_key_string()) else {
            return Ok(None);
        };

        self.roles.find_single(&Filter::id_eq(id)).await
    }

    async fn find_by_name(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityRole<K>>> {
        self.guard.check(STORE_NAME)?;
        ensure_not_cancelled(cancel)?;

        if normalized_role_name.trim().is_empty() {
            return Ok(None);
        }

        self.roles
            .find_single(&Filter::eq(fields::NORMALIZED_NAME, normalized_role_name))
            .await
    }
}

#[async_trait]
impl<K: IdentityKey> RoleClaimStore<K> for DocumentRoleStore<K> {
    async fn get_claims(
        &self,
        role: &IdentityRole<K>,
        cancel: &CancellationToken,
    ) -> Result<Vec<IdentityClaim>> {
        self.guard.check(STORE_NAME)?;
        ensure_not_cancelled(cancel)?;
        Ok(role.claims().to_vec())
    }

    async fn add_claim(
        &self,
        role: &mut IdentityRole<K>,
        claim: IdentityClaim,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        ensure_not_cancelled(cancel)?;
        let id = require_key(&role.id)?;

        if claims::add_claim(role.claims_mut(), claim) {
            self.persist_claims(&id, role).await?;
        }
        Ok(())
    }

    async fn remove_claim(
        &self,
        role: &mut IdentityRole<K>,
        claim: &IdentityClaim,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        ensure_not_cancelled(cancel)?;
        let id = require_key(&role.id)?;

        if claims::remove_claim(role.claims_mut(), claim) {
            self.persist_claims(&id, role).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<K: IdentityKey> QueryableRoleStore<K> for DocumentRoleStore<K> {
    async fn roles(&self, cancel: &CancellationToken) -> Result<Vec<IdentityRole<K>>> {
        self.guard.check(STORE_NAME)?;
        ensure_not_cancelled(cancel)?;
        self.roles.find(&Filter::All).await
    }
}
