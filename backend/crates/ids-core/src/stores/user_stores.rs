use crate::{IdentityClaim, IdentityKey, IdentityResult, IdentityUser, UserLoginInfo};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

/// Basic persistence for users.
#[async_trait]
pub trait UserStore<K: IdentityKey = String>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Inserts a new user. A user name already used by another user is
    /// reported as a failed result, not an error.
    async fn create(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult, Self::Error>;

    /// Replaces the stored user, inserting it when absent.
    async fn update(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult, Self::Error>;

    async fn delete(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<IdentityResult, Self::Error>;

    fn get_user_id(&self, user: &IdentityUser<K>) -> Result<Option<String>, Self::Error>;

    fn get_user_name(&self, user: &IdentityUser<K>) -> Result<Option<String>, Self::Error>;

    fn set_user_name(
        &self,
        user: &mut IdentityUser<K>,
        user_name: Option<String>,
    ) -> Result<(), Self::Error>;

    fn get_normalized_user_name(
        &self,
        user: &IdentityUser<K>,
    ) -> Result<Option<String>, Self::Error>;

    fn set_normalized_user_name(
        &self,
        user: &mut IdentityUser<K>,
        normalized_name: Option<String>,
    ) -> Result<(), Self::Error>;

    /// Blank ids find nothing.
    async fn find_by_id(
        &self,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityUser<K>>, Self::Error>;

    async fn find_by_name(
        &self,
        normalized_user_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityUser<K>>, Self::Error>;
}

/// External logins embedded in the user.
#[async_trait]
pub trait UserLoginStore<K: IdentityKey = String>: UserStore<K> {
    /// A login with the same provider and key is only stored once.
    async fn add_login(
        &self,
        user: &mut IdentityUser<K>,
        login: UserLoginInfo,
        cancel: &CancellationToken,
    ) -> Result<(), Self::Error>;

    async fn remove_login(
        &self,
        user: &mut IdentityUser<K>,
        login_provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> Result<(), Self::Error>;

    async fn get_logins(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<Vec<UserLoginInfo>, Self::Error>;

    async fn find_by_login(
        &self,
        login_provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityUser<K>>, Self::Error>;
}

/// Role membership, kept as role snapshots on the user.
#[async_trait]
pub trait UserRoleStore<K: IdentityKey = String>: UserStore<K> {
    async fn add_to_role(
        &self,
        user: &mut IdentityUser<K>,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), Self::Error>;

    async fn remove_from_role(
        &self,
        user: &mut IdentityUser<K>,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), Self::Error>;

    /// Names of the roles the user belongs to.
    async fn get_roles(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, Self::Error>;

    async fn is_in_role(
        &self,
        user: &IdentityUser<K>,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, Self::Error>;

    async fn get_users_in_role(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<IdentityUser<K>>, Self::Error>;
}

#[async_trait]
pub trait UserClaimStore<K: IdentityKey = String>: UserStore<K> {
    /// The user's own claims.
    async fn get_claims(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<Vec<IdentityClaim>, Self::Error>;

    /// Own claims merged with the claims of every assigned role.
    async fn get_all_claims(
        &self,
        user: &IdentityUser<K>,
        cancel: &CancellationToken,
    ) -> Result<Vec<IdentityClaim>, Self::Error>;

    async fn add_claims(
        &self,
        user: &mut IdentityUser<K>,
        claims: Vec<IdentityClaim>,
        cancel: &CancellationToken,
    ) -> Result<(), Self::Error>;

    async fn replace_claim(
        &self,
        user: &mut IdentityUser<K>,
        claim: &IdentityClaim,
        new_claim: &IdentityClaim,
        cancel: &CancellationToken,
    ) -> Result<(), Self::Error>;

    async fn remove_claims(
        &self,
        user: &mut IdentityUser<K>,
        claims: &[IdentityClaim],
        cancel: &CancellationToken,
    ) -> Result<(), Self::Error>;

    /// Users holding the claim directly.
    async fn get_users_for_claim(
        &self,
        claim: &IdentityClaim,
        cancel: &CancellationToken,
    ) -> Result<Vec<IdentityUser<K>>, Self::Error>;
}

pub trait UserPasswordStore<K: IdentityKey = String>: UserStore<K> {
    fn set_password_hash(
        &self,
        user: &mut IdentityUser<K>,
        password_hash: Option<String>,
    ) -> Result<(), Self::Error>;

    fn get_password_hash(&self, user: &IdentityUser<K>) -> Result<Option<String>, Self::Error>;

    fn has_password(&self, user: &IdentityUser<K>) -> Result<bool, Self::Error>;
}

pub trait UserSecurityStampStore<K: IdentityKey = String>: UserStore<K> {
    fn set_security_stamp(
        &self,
        user: &mut IdentityUser<K>,
        stamp: Option<String>,
    ) -> Result<(), Self::Error>;

    fn get_security_stamp(&self, user: &IdentityUser<K>) -> Result<Option<String>, Self::Error>;
}

#[async_trait]
pub trait UserEmailStore<K: IdentityKey = String>: UserStore<K> {
    fn set_email(&self, user: &mut IdentityUser<K>, email: Option<String>)
    -> Result<(), Self::Error>;

    fn get_email(&self, user: &IdentityUser<K>) -> Result<Option<String>, Self::Error>;

    fn get_email_confirmed(&self, user: &IdentityUser<K>) -> Result<bool, Self::Error>;

    fn set_email_confirmed(
        &self,
        user: &mut IdentityUser<K>,
        confirmed: bool,
    ) -> Result<(), Self::Error>;

    fn get_normalized_email(&self, user: &IdentityUser<K>) -> Result<Option<String>, Self::Error>;

    fn set_normalized_email(
        &self,
        user: &mut IdentityUser<K>,
        normalized_email: Option<String>,
    ) -> Result<(), Self::Error>;

    async fn find_by_email(
        &self,
        normalized_email: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<IdentityUser<K>>, Self::Error>;
}

pub trait UserLockoutStore<K: IdentityKey = String>: UserStore<K> {
    fn get_lockout_end_date(
        &self,
        user: &IdentityUser<K>,
    ) -> Result<Option<DateTime<Utc>>, Self::Error>;

    fn set_lockout_end_date(
        &self,
        user: &mut IdentityUser<K>,
        lockout_end: Option<DateTime<Utc>>,
    ) -> Result<(), Self::Error>;

    /// Returns the count after incrementing.
    fn increment_access_failed_count(&self, user: &mut IdentityUser<K>) -> Result<i32, Self::Error>;

    fn reset_access_failed_count(&self, user: &mut IdentityUser<K>) -> Result<(), Self::Error>;

    fn get_access_failed_count(&self, user: &IdentityUser<K>) -> Result<i32, Self::Error>;

    fn get_lockout_enabled(&self, user: &IdentityUser<K>) -> Result<bool, Self::Error>;

    fn set_lockout_enabled(
        &self,
        user: &mut IdentityUser<K>,
        enabled: bool,
    ) -> Result<(), Self::Error>;
}

pub trait UserPhoneNumberStore<K: IdentityKey = String>: UserStore<K> {
    fn set_phone_number(
        &self,
        user: &mut IdentityUser<K>,
        phone_number: Option<String>,
    ) -> Result<(), Self::Error>;

    fn get_phone_number(&self, user: &IdentityUser<K>) -> Result<Option<String>, Self::Error>;

    fn get_phone_number_confirmed(&self, user: &IdentityUser<K>) -> Result<bool, Self::Error>;

    fn set_phone_number_confirmed(
        &self,
        user: &mut IdentityUser<K>,
        confirmed: bool,
    ) -> Result<(), Self::Error>;
}

pub trait UserTwoFactorStore<K: IdentityKey = String>: UserStore<K> {
    fn set_two_factor_enabled(
        &self,
        user: &mut IdentityUser<K>,
        enabled: bool,
    ) -> Result<(), Self::Error>;

    fn get_two_factor_enabled(&self, user: &IdentityUser<K>) -> Result<bool, Self::Error>;
}

#[async_trait]
pub trait QueryableUserStore<K: IdentityKey = String>: UserStore<K> {
    async fn users(&self, cancel: &CancellationToken) -> Result<Vec<IdentityUser<K>>, Self::Error>;
}
