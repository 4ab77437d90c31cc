use crate::document::collection::DocumentCollection;
use crate::document::fields;
use crate::document::filter::Filter;
use crate::stores::store_guard::{
    DisposeGuard, ensure_not_cancelled, name_taken, require_key, require_non_blank,
};
use crate::stores::{DEFAULT_ROLES_COLLECTION, DEFAULT_USERS_COLLECTION, collection_name_or};
use crate::{DbError, Result};

use ids_core::claims;
use ids_core::{
    CancellationToken, DefaultErrorDescriber, ErrorDescriber, ErrorLocation, IdentityClaim,
    IdentityKey, IdentityResult, IdentityRole, IdentityUser, IdentityUserLogin,
    QueryableUserStore, UserClaimStore, UserEmailStore, UserLockoutStore, UserLoginInfo,
    UserLoginStore, UserPasswordStore, UserPhoneNumberStore, UserRoleStore,
    UserSecurityStampStore, UserStore, UserTwoFactorStore,
};

use std::panic::Location;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Serialize;
use sqlx::SqlitePool;

const STORE_NAME: &str = "DocumentUserStore";

/// User store over a document collection.
///
/// Claims, logins and role snapshots are embedded in the user document.
/// Role assignment resolves roles from the roles collection by normalized
/// name. User names are kept unique by a check before each write that is
/// not atomic with the write.
pub struct DocumentUserStore<K: IdentityKey = String> {
    users: DocumentCollection<IdentityUser<K>>,
    roles: DocumentCollection<IdentityRole<K>>,
    describer: Arc<dyn ErrorDescriber>,
    guard: DisposeGuard,
}

impl<K: IdentityKey> DocumentUserStore<K> {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_collection_names(pool, DEFAULT_USERS_COLLECTION, DEFAULT_ROLES_COLLECTION)
    }

    pub fn with_collection_names(pool: SqlitePool, users: &str, roles: &str) -> Self {
        let users = DocumentCollection::new(
            pool.clone(),
            collection_name_or(users, DEFAULT_USERS_COLLECTION),
        );
        let roles = DocumentCollection::new(pool, collection_name_or(roles, DEFAULT_ROLES_COLLECTION));
        Self::from_collections(users, roles)
    }

    pub fn from_collections(
        users: DocumentCollection<IdentityUser<K>>,
        roles: DocumentCollection<IdentityRole<K>>,
    ) -> Self {
        Self {
            users,
            roles,
            describer: Arc::new(DefaultErrorDescriber),
            guard: DisposeGuard::default(),
        }
    }

    pub fn with_describer(mut self, describer: Arc<dyn ErrorDescriber>) -> Self {
        self.describer = describer;
        self
    }

    pub fn collection(&self) -> &DocumentCollection<IdentityUser<K>> {
        &self.users
    }

    /// Every later call on this store fails with [`DbError::Disposed`].
    pub fn dispose(&self) {
        self.guard.dispose();
    }

    fn duplicate_name(&self, user: &IdentityUser<K>) -> IdentityResult {
        let name = user.user_name.as_deref().unwrap_or_default();
        warn!("Rejected user {}: user name '{}' is already taken", user.id, name);
        IdentityResult::failed(self.describer.duplicate_user_name(name))
    }

    /// Writes one embedded collection of a stored user.
    async fn persist<V>(&self, id: &str, field: &'static str, value: &V) -> Result<()>
    where
        V: Serialize + ?Sized + Sync,
    {
        self.users.set_field(id, field, value).await?;
        debug!("Saved {} for user {}", field, id);
        Ok(())
    }

    fn begin(&self, cancel: &CancellationToken) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        ensure_not_cancelled(cancel)
    }
}

#[async_trait]
impl<K: IdentityKey> UserStore<K> for DocumentUserStore<K> {
    type Error = DbError;

    async fn create(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult> {
        self.begin(cancel)?;
        let id = require_key(&user.id)?;

        if name_taken(&self.users, &id, fields::USER_NAME, user.user_name.as_deref()).await? {
            return Ok(self.duplicate_name(user));
        }

        match self.users.insert_one(user).await {
            Ok(()) => {
                debug!("Created user {} ({})", id, user);
                Ok(IdentityResult::Success)
            }
            Err(e) if e.is_unique_violation() => Ok(self.duplicate_name(user)),
            Err(e) => Err(e),
        }
    }

    async fn update(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult> {
        self.begin(cancel)?;
        let id = require_key(&user.id)?;

        if name_taken(&self.users, &id, fields::USER_NAME, user.user_name.as_deref()).await? {
            return Ok(self.duplicate_name(user));
        }

        self.users.replace_one(user).await?;
        debug!("Updated user {} ({})", id, user);

        Ok(IdentityResult::Success)
    }

    async fn delete(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult> {
        self.begin(cancel)?;
        let id = require_key(&user.id)?;

        let deleted = self.users.delete_one(&id).await?;
        debug!("Deleted user {} ({} removed)", id, deleted);

        Ok(IdentityResult::Success)
    }

    fn get_user_id(&self, user: &IdentityUser<K>) -> Result<Option<String>> {
        self.guard.check(STORE_NAME)?;
        Ok(user.id.to_key_string())
    }

    fn get_user_name(&self, user: &IdentityUser<K>) -> Result<Option<String>> {
        self.guard.check(STORE_NAME)?;
        Ok(user.user_name.clone())
    }

    fn set_user_name(&self, user: &mut IdentityUser<K>, user_name: Option<String>) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.user_name = user_name;
        Ok(())
    }

    fn get_normalized_user_name(&self, user: &IdentityUser<K>) -> Result<Option<String>> {
        self.guard.check(STORE_NAME)?;
        Ok(user.normalized_user_name.clone())
    }

    fn set_normalized_user_name(
        &self,
        user: &mut IdentityUser<K>,
        normalized_name: Option<String>,
    ) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.normalized_user_name = normalized_name;
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityUser<K>>> {
        self.begin(cancel)?;

        let Some(id) = K::parse_key(user_id)?.and_then(|key| key.to_key_string()) else {
            return Ok(None);
        };

        self.users.find_single(&Filter::id_eq(id)).await
    }

    async fn find_by_name(
        &self,
        normalized_user_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityUser<K>>> {
        self.begin(cancel)?;

        if normalized_user_name.trim().is_empty() {
            return Ok(None);
        }

        self.users
            .find_single(&Filter::eq(fields::NORMALIZED_USER_NAME, normalized_user_name))
            .await
    }
}

#[async_trait]
impl<K: IdentityKey> UserLoginStore<K> for DocumentUserStore<K> {
    async fn add_login(
        &self,
        user: &mut IdentityUser<K>,
        login: UserLoginInfo,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.begin(cancel)?;
        let id = require_key(&user.id)?;

        let exists = user
            .logins()
            .iter()
            .any(|l| l.matches(&login.login_provider, &login.provider_key));
        if exists {
            return Ok(());
        }

        let user_login = IdentityUserLogin::from_info(user.id.clone(), login);
        user.logins_mut().push(user_login);
        self.persist(&id, fields::LOGINS, user.logins()).await
    }

    async fn remove_login(
        &self,
        user: &mut IdentityUser<K>,
        login_provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.begin(cancel)?;
        let id = require_key(&user.id)?;

        let before = user.logins().len();
        user.logins_mut()
            .retain(|l| !l.matches(login_provider, provider_key));
        if user.logins().len() == before {
            return Ok(());
        }

        self.persist(&id, fields::LOGINS, user.logins()).await
    }

    async fn get_logins(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<Vec<UserLoginInfo>> {
        self.begin(cancel)?;
        Ok(user.logins().iter().map(IdentityUserLogin::to_info).collect())
    }

    async fn find_by_login(
        &self,
        login_provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityUser<K>>> {
        self.begin(cancel)?;

        if login_provider.trim().is_empty() || provider_key.trim().is_empty() {
            return Ok(None);
        }

        let filter = Filter::elem_match(
            fields::LOGINS,
            vec![
                (fields::LOGIN_PROVIDER, login_provider.to_string()),
                (fields::PROVIDER_KEY, provider_key.to_string()),
            ],
        );
        self.users.find_single(&filter).await
    }
}

#[async_trait]
impl<K: IdentityKey> UserRoleStore<K> for DocumentUserStore<K> {
    async fn add_to_role(
        &self,
        user: &mut IdentityUser<K>,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.begin(cancel)?;
        let id = require_key(&user.id)?;
        require_non_blank("normalized_role_name", normalized_role_name)?;

        let role = self
            .roles
            .find_single(&Filter::eq(fields::NORMALIZED_NAME, normalized_role_name))
            .await?
            .ok_or_else(|| DbError::RoleNotFound {
                role_name: normalized_role_name.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if user.has_role(&role.id) {
            return Ok(());
        }

        user.roles_mut().push(role);
        self.persist(&id, fields::ROLES, user.roles()).await
    }

    async fn remove_from_role(
        &self,
        user: &mut IdentityUser<K>,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.begin(cancel)?;
        let id = require_key(&user.id)?;
        require_non_blank("normalized_role_name", normalized_role_name)?;

        let before = user.roles().len();
        user.roles_mut()
            .retain(|r| r.normalized_name.as_deref() != Some(normalized_role_name));
        if user.roles().len() == before {
            return Ok(());
        }

        self.persist(&id, fields::ROLES, user.roles()).await
    }

    async fn get_roles(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>> {
        self.begin(cancel)?;
        Ok(user.roles().iter().filter_map(|r| r.name.clone()).collect())
    }

    async fn is_in_role(
        &self,
        user: &IdentityUser<K>,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        self.begin(cancel)?;
        require_non_blank("normalized_role_name", normalized_role_name)?;

        Ok(user
            .roles()
            .iter()
            .any(|r| r.normalized_name.as_deref() == Some(normalized_role_name)))
    }

    async fn get_users_in_role(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<IdentityUser<K>>> {
        self.begin(cancel)?;
        require_non_blank("normalized_role_name", normalized_role_name)?;

        let filter = Filter::elem_match(
            fields::ROLES,
            vec![(fields::NORMALIZED_NAME, normalized_role_name.to_string())],
        );
        self.users.find(&filter).await
    }
}

#[async_trait]
impl<K: IdentityKey> UserClaimStore<K> for DocumentUserStore<K> {
    async fn get_claims(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<Vec<IdentityClaim>> {
        self.begin(cancel)?;
        Ok(user.claims().to_vec())
    }

    async fn get_all_claims(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<Vec<IdentityClaim>> {
        self.begin(cancel)?;
        Ok(user.all_claims())
    }

    async fn add_claims(
        &self,
        user: &mut IdentityUser<K>,
        claims: Vec<IdentityClaim>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.begin(cancel)?;
        let id = require_key(&user.id)?;

        let mut changed = false;
        for claim in claims {
            changed |= claims::add_claim(user.claims_mut(), claim);
        }
        if !changed {
            return Ok(());
        }

        self.persist(&id, fields::CLAIMS, user.claims()).await
    }

    async fn replace_claim(
        &self,
        user: &mut IdentityUser<K>,
        claim: &IdentityClaim,
        new_claim: &IdentityClaim,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.begin(cancel)?;
        let id = require_key(&user.id)?;

        if !claims::replace_claim(user.claims_mut(), claim, new_claim) {
            return Ok(());
        }

        self.persist(&id, fields::CLAIMS, user.claims()).await
    }

    async fn remove_claims(
        &self,
        user: &mut IdentityUser<K>,
        claims: &[IdentityClaim],
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.begin(cancel)?;
        let id = require_key(&user.id)?;

        let mut changed = false;
        for claim in claims {
            changed |= claims::remove_claim(user.claims_mut(), claim);
        }
        if !changed {
            return Ok(());
        }

        self.persist(&id, fields::CLAIMS, user.claims()).await
    }

    async fn get_users_for_claim(
        &self,
        claim: &IdentityClaim,
        cancel: &CancellationToken,
    ) -> Result<Vec<IdentityUser<K>>> {
        self.begin(cancel)?;

        let filter = Filter::elem_match(
            fields::CLAIMS,
            vec![
                (fields::CLAIM_TYPE, claim.claim_type.clone()),
                (fields::CLAIM_VALUE, claim.claim_value.clone()),
            ],
        );
        self.users.find(&filter).await
    }
}

impl<K: IdentityKey> UserPasswordStore<K> for DocumentUserStore<K> {
    fn set_password_hash(
        &self,
        user: &mut IdentityUser<K>,
        password_hash: Option<String>,
    ) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.password_hash = password_hash;
        Ok(())
    }

    fn get_password_hash(&self, user: &IdentityUser<K>) -> Result<Option<String>> {
        self.guard.check(STORE_NAME)?;
        Ok(user.password_hash.clone())
    }

    fn has_password(&self, user: &IdentityUser<K>) -> Result<bool> {
        self.guard.check(STORE_NAME)?;
        Ok(user.password_hash.is_some())
    }
}

impl<K: IdentityKey> UserSecurityStampStore<K> for DocumentUserStore<K> {
    fn set_security_stamp(&self, user: &mut IdentityUser<K>, stamp: Option<String>) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.security_stamp = stamp;
        Ok(())
    }

    fn get_security_stamp(&self, user: &IdentityUser<K>) -> Result<Option<String>> {
        self.guard.check(STORE_NAME)?;
        Ok(user.security_stamp.clone())
    }
}

#[async_trait]
impl<K: IdentityKey> UserEmailStore<K> for DocumentUserStore<K> {
    fn set_email(&self, user: &mut IdentityUser<K>, email: Option<String>) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.email = email;
        Ok(())
    }

    fn get_email(&self, user: &IdentityUser<K>) -> Result<Option<String>> {
        self.guard.check(STORE_NAME)?;
        Ok(user.email.clone())
    }

    fn get_email_confirmed(&self, user: &IdentityUser<K>) -> Result<bool> {
        self.guard.check(STORE_NAME)?;
        Ok(user.email_confirmed)
    }

    fn set_email_confirmed(&self, user: &mut IdentityUser<K>, confirmed: bool) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.email_confirmed = confirmed;
        Ok(())
    }

    fn get_normalized_email(&self, user: &IdentityUser<K>) -> Result<Option<String>> {
        self.guard.check(STORE_NAME)?;
        Ok(user.normalized_email.clone())
    }

    fn set_normalized_email(
        &self,
        user: &mut IdentityUser<K>,
        normalized_email: Option<String>,
    ) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.normalized_email = normalized_email;
        Ok(())
    }

    async fn find_by_email(
        &self,
        normalized_email: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityUser<K>>> {
        self.begin(cancel)?;

        if normalized_email.trim().is_empty() {
            return Ok(None);
        }

        self.users
            .find_single(&Filter::eq(fields::NORMALIZED_EMAIL, normalized_email))
            .await
    }
}

impl<K: IdentityKey> UserLockoutStore<K> for DocumentUserStore<K> {
    fn get_lockout_end_date(&self, user: &IdentityUser<K>) -> Result<Option<DateTime<Utc>>> {
        self.guard.check(STORE_NAME)?;
        Ok(user.lockout_end)
    }

    fn set_lockout_end_date(
        &self,
        user: &mut IdentityUser<K>,
        lockout_end: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.lockout_end = lockout_end;
        Ok(())
    }

    fn increment_access_failed_count(&self, user: &mut IdentityUser<K>) -> Result<i32> {
        self.guard.check(STORE_NAME)?;
        user.access_failed_count = user.access_failed_count.saturating_add(1);
        Ok(user.access_failed_count)
    }

    fn reset_access_failed_count(&self, user: &mut IdentityUser<K>) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.access_failed_count = 0;
        Ok(())
    }

    fn get_access_failed_count(&self, user: &IdentityUser<K>) -> Result<i32> {
        self.guard.check(STORE_NAME)?;
        Ok(user.access_failed_count)
    }

    fn get_lockout_enabled(&self, user: &IdentityUser<K>) -> Result<bool> {
        self.guard.check(STORE_NAME)?;
        Ok(user.lockout_enabled)
    }

    fn set_lockout_enabled(&self, user: &mut IdentityUser<K>, enabled: bool) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.lockout_enabled = enabled;
        Ok(())
    }
}

impl<K: IdentityKey> UserPhoneNumberStore<K> for DocumentUserStore<K> {
    fn set_phone_number(
        &self,
        user: &mut IdentityUser<K>,
        phone_number: Option<String>,
    ) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.phone_number = phone_number;
        Ok(())
    }

    fn get_phone_number(&self, user: &IdentityUser<K>) -> Result<Option<String>> {
        self.guard.check(STORE_NAME)?;
        Ok(user.phone_number.clone())
    }

    fn get_phone_number_confirmed(&self, user: &IdentityUser<K>) -> Result<bool> {
        self.guard.check(STORE_NAME)?;
        Ok(user.phone_number_confirmed)
    }

    fn set_phone_number_confirmed(&self, user: &mut IdentityUser<K>, confirmed: bool) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.phone_number_confirmed = confirmed;
        Ok(())
    }
}

impl<K: IdentityKey> UserTwoFactorStore<K> for DocumentUserStore<K> {
    fn set_two_factor_enabled(&self, user: &mut IdentityUser<K>, enabled: bool) -> Result<()> {
        self.guard.check(STORE_NAME)?;
        user.two_factor_enabled = enabled;
        Ok(())
    }

    fn get_two_factor_enabled(&self, user: &IdentityUser<K>) -> Result<bool> {
        self.guard.check(STORE_NAME)?;
        Ok(user.two_factor_enabled)
    }
}

#[async_trait]
impl<K: IdentityKey> QueryableUserStore<K> for DocumentUserStore<K> {
    async fn users(&self, cancel: &CancellationToken) -> Result<Vec<IdentityUser<K>>> {
        self.begin(cancel)?;
        self.users.find(&Filter::All).await
    }
}
