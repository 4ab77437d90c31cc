use crate::error::{CliError, CliResult};

use ids_core::{
    CancellationToken, IdentityClaim, IdentityResult, IdentityRole, IdentityUser,
    LookupNormalizer, QueryableRoleStore, QueryableUserStore, RoleClaimStore, RoleStore,
    UpperInvariantNormalizer, UserClaimStore, UserEmailStore, UserLoginInfo, UserLoginStore,
    UserRoleStore, UserStore,
};
use ids_db::{DocumentRoleStore, DocumentUserStore};

use log::info;
use serde::Serialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;

/// Runs admin commands against the role and user stores.
///
/// Every method returns the JSON printed by the `ids` binary.
pub struct Admin {
    roles: DocumentRoleStore,
    users: DocumentUserStore,
    normalizer: UpperInvariantNormalizer,
    cancel: CancellationToken,
}

impl Admin {
    pub fn new(
        pool: SqlitePool,
        users_collection: &str,
        roles_collection: &str,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            roles: DocumentRoleStore::with_collection_name(pool.clone(), roles_collection),
            users: DocumentUserStore::with_collection_names(pool, users_collection, roles_collection),
            normalizer: UpperInvariantNormalizer,
            cancel,
        }
    }

    // ---- roles ----

    pub async fn create_role(&self, name: &str) -> CliResult<Value> {
        let mut role = IdentityRole::new(name);
        role.normalized_name = Some(self.normalizer.normalize_name(name));

        let result = self.roles.create(&role, &self.cancel).await?;
        accept(result)?;

        info!("Created role {} ({})", role.id, name);
        to_json(&role)
    }

    pub async fn delete_role(&self, id: &str) -> CliResult<Value> {
        let role = self.require_role(id).await?;
        let result = self.roles.delete(&role, &self.cancel).await?;
        accept(result)?;

        info!("Deleted role {}", id);
        Ok(json!({ "deleted": role.id }))
    }

    pub async fn get_role(&self, key: &str, by_name: bool) -> CliResult<Value> {
        let role = if by_name {
            let normalized = self.normalizer.normalize_name(key);
            self.roles
                .find_by_name(&normalized, &self.cancel)
                .await?
                .ok_or_else(|| CliError::not_found("Role", key))?
        } else {
            self.require_role(key).await?
        };
        to_json(&role)
    }

    pub async fn list_roles(&self) -> CliResult<Value> {
        to_json(&self.roles.roles(&self.cancel).await?)
    }

    pub async fn add_role_claim(&self, id: &str, claim: IdentityClaim) -> CliResult<Value> {
        let mut role = self.require_role(id).await?;
        self.roles.add_claim(&mut role, claim, &self.cancel).await?;
        to_json(&role)
    }

    pub async fn remove_role_claim(&self, id: &str, claim: IdentityClaim) -> CliResult<Value> {
        let mut role = self.require_role(id).await?;
        self.roles
            .remove_claim(&mut role, &claim, &self.cancel)
            .await?;
        to_json(&role)
    }

    // ---- users ----

    pub async fn create_user(&self, user_name: &str, email: Option<&str>) -> CliResult<Value> {
        let mut user = IdentityUser::new(user_name);
        user.normalized_user_name = Some(self.normalizer.normalize_name(user_name));
        if let Some(email) = email {
            user.email = Some(email.to_string());
            user.normalized_email = Some(self.normalizer.normalize_email(email));
        }

        let result = self.users.create(&user, &self.cancel).await?;
        accept(result)?;

        info!("Created user {} ({})", user.id, user_name);
        to_json(&user)
    }

    pub async fn delete_user(&self, id: &str) -> CliResult<Value> {
        let user = self.require_user(id).await?;
        let result = self.users.delete(&user, &self.cancel).await?;
        accept(result)?;

        info!("Deleted user {}", id);
        Ok(json!({ "deleted": user.id }))
    }

    pub async fn get_user(&self, key: &str, by_name: bool, by_email: bool) -> CliResult<Value> {
        let found = if by_name {
            let normalized = self.normalizer.normalize_name(key);
            self.users.find_by_name(&normalized, &self.cancel).await?
        } else if by_email {
            let normalized = self.normalizer.normalize_email(key);
            self.users.find_by_email(&normalized, &self.cancel).await?
        } else {
            self.users.find_by_id(key, &self.cancel).await?
        };

        let user = found.ok_or_else(|| CliError::not_found("User", key))?;
        to_json(&user)
    }

    pub async fn list_users(&self) -> CliResult<Value> {
        to_json(&self.users.users(&self.cancel).await?)
    }

    pub async fn add_to_role(&self, id: &str, role_name: &str) -> CliResult<Value> {
        let mut user = self.require_user(id).await?;
        let normalized = self.normalizer.normalize_name(role_name);
        self.users
            .add_to_role(&mut user, &normalized, &self.cancel)
            .await?;
        to_json(&user)
    }

    pub async fn remove_from_role(&self, id: &str, role_name: &str) -> CliResult<Value> {
        let mut user = self.require_user(id).await?;
        let normalized = self.normalizer.normalize_name(role_name);
        self.users
            .remove_from_role(&mut user, &normalized, &self.cancel)
            .await?;
        to_json(&user)
    }

    pub async fn add_user_claim(&self, id: &str, claim: IdentityClaim) -> CliResult<Value> {
        let mut user = self.require_user(id).await?;
        self.users
            .add_claims(&mut user, vec![claim], &self.cancel)
            .await?;
        to_json(&user)
    }

    pub async fn remove_user_claim(&self, id: &str, claim: IdentityClaim) -> CliResult<Value> {
        let mut user = self.require_user(id).await?;
        self.users
            .remove_claims(&mut user, &[claim], &self.cancel)
            .await?;
        to_json(&user)
    }

    pub async fn user_claims(&self, id: &str, all: bool) -> CliResult<Value> {
        let user = self.require_user(id).await?;
        let claims = if all {
            self.users.get_all_claims(&user, &self.cancel).await?
        } else {
            self.users.get_claims(&user, &self.cancel).await?
        };
        to_json(&claims)
    }

    pub async fn add_login(&self, id: &str, login: UserLoginInfo) -> CliResult<Value> {
        let mut user = self.require_user(id).await?;
        self.users.add_login(&mut user, login, &self.cancel).await?;
        to_json(&user)
    }

    pub async fn remove_login(&self, id: &str, provider: &str, key: &str) -> CliResult<Value> {
        let mut user = self.require_user(id).await?;
        self.users
            .remove_login(&mut user, provider, key, &self.cancel)
            .await?;
        to_json(&user)
    }

    async fn require_role(&self, id: &str) -> CliResult<IdentityRole> {
        self.roles
            .find_by_id(id, &self.cancel)
            .await?
            .ok_or_else(|| CliError::not_found("Role", id))
    }

    async fn require_user(&self, id: &str) -> CliResult<IdentityUser> {
        self.users
            .find_by_id(id, &self.cancel)
            .await?
            .ok_or_else(|| CliError::not_found("User", id))
    }
}

fn accept(result: IdentityResult) -> CliResult<()> {
    if result.succeeded() {
        Ok(())
    } else {
        Err(CliError::rejected(result))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<Value> {
    serde_json::to_value(value).map_err(CliError::from_json)
}
