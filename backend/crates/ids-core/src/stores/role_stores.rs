use crate::{IdentityClaim, IdentityKey, IdentityResult, IdentityRole};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Basic persistence for roles.
#[async_trait]
pub trait RoleStore<K: IdentityKey = String>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Inserts a new role. A name already used by another role is reported
    /// as a failed result, not an error.
    async fn create(
        &self,
        role: &IdentityRole<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult, Self::Error>;

    /// Replaces the stored role, inserting it when absent.
    async fn update(
        &self,
        role: &IdentityRole<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult, Self::Error>;

    async fn delete(
        &self,
        role: &IdentityRole<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult, Self::Error>;

    fn get_role_id(&self, role: &IdentityRole<K>) -> Result<Option<String>, Self::Error>;

    fn get_role_name(&self, role: &IdentityRole<K>) -> Result<Option<String>, Self::Error>;

    fn set_role_name(
        &self,
        role: &mut IdentityRole<K>,
        role_name: Option<String>,
    ) -> Result<(), Self::Error>;

    fn get_normalized_role_name(
        &self,
        role: &IdentityRole<K>,
    ) -> Result<Option<String>, Self::Error>;

    fn set_normalized_role_name(
        &self,
        role: &mut IdentityRole<K>,
        normalized_name: Option<String>,
    ) -> Result<(), Self::Error>;

    /// Blank ids find nothing.
    async fn find_by_id(
        &self,
        role_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityRole<K>>, Self::Error>;

    async fn find_by_name(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityRole<K>>, Self::Error>;
}

/// Claims attached to roles.
#[async_trait]
pub trait RoleClaimStore<K: IdentityKey = String>: RoleStore<K> {
    async fn get_claims(
        &self,
        role: &IdentityRole<K>,
        cancel: &CancellationToken,
    ) -> Result<Vec<IdentityClaim>, Self::Error>;

    /// Adds the claim and persists the role's claim list when it changed.
    async fn add_claim(
        &self,
        role: &mut IdentityRole<K>,
        claim: IdentityClaim,
        cancel: &CancellationToken,
    ) -> Result<(), Self::Error>;

    /// Removing a claim the role doesn't have is a no-op.
    async fn remove_claim(
        &self,
        role: &mut IdentityRole<K>,
        claim: &IdentityClaim,
        cancel: &CancellationToken,
    ) -> Result<(), Self::Error>;
}

#[async_trait]
pub trait QueryableRoleStore<K: IdentityKey = String>: RoleStore<K> {
    async fn roles(&self, cancel: &CancellationToken) -> Result<Vec<IdentityRole<K>>, Self::Error>;
}
