use crate::claims::effective_claims;
use crate::serde_defaults::{is_false, is_zero, null_as_empty};
use crate::{IdentityClaim, IdentityKey, IdentityRole, IdentityUserLogin};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account as stored in the users collection.
///
/// Claims, role snapshots and external logins are embedded in the user
/// document. `roles` carries each assigned role's id, names and claims so
/// [`IdentityUser::all_claims`] needs no extra lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, bound = "K: IdentityKey")]
pub struct IdentityUser<K = String> {
    pub id: K,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_email: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub email_confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_stamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub phone_number_confirmed: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub two_factor_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lockout_end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_false")]
    pub lockout_enabled: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub access_failed_count: i32,
    #[serde(deserialize_with = "null_as_empty")]
    claims: Vec<IdentityClaim>,
    #[serde(deserialize_with = "null_as_empty")]
    roles: Vec<IdentityRole<K>>,
    #[serde(deserialize_with = "null_as_empty")]
    logins: Vec<IdentityUserLogin<K>>,
}

impl IdentityUser<String> {
    /// Creates a user with a freshly generated identifier.
    pub fn new(user_name: impl Into<String>) -> Self {
        Self::named(Uuid::new_v4().to_string(), user_name)
    }
}

impl<K: IdentityKey> IdentityUser<K> {
    pub fn with_id(id: K) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn named(id: K, user_name: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
            ..Self::with_id(id)
        }
    }

    pub fn claims(&self) -> &[IdentityClaim] {
        &self.claims
    }

    pub fn claims_mut(&mut self) -> &mut Vec<IdentityClaim> {
        &mut self.claims
    }

    pub fn set_claims(&mut self, claims: Option<Vec<IdentityClaim>>) {
        self.claims = claims.unwrap_or_default();
    }

    pub fn roles(&self) -> &[IdentityRole<K>] {
        &self.roles
    }

    pub fn roles_mut(&mut self) -> &mut Vec<IdentityRole<K>> {
        &mut self.roles
    }

    pub fn set_roles(&mut self, roles: Option<Vec<IdentityRole<K>>>) {
        self.roles = roles.unwrap_or_default();
    }

    pub fn logins(&self) -> &[IdentityUserLogin<K>] {
        &self.logins
    }

    pub fn logins_mut(&mut self) -> &mut Vec<IdentityUserLogin<K>> {
        &mut self.logins
    }

    pub fn set_logins(&mut self, logins: Option<Vec<IdentityUserLogin<K>>>) {
        self.logins = logins.unwrap_or_default();
    }

    /// Own claims followed by every role's claims, de-duplicated.
    ///
    /// Computed on each call.
    pub fn all_claims(&self) -> Vec<IdentityClaim> {
        effective_claims(&self.claims, self.roles.iter().map(|r| r.claims()))
    }

    pub fn has_role(&self, role_id: &K) -> bool {
        self.roles.iter().any(|r| &r.id == role_id)
    }
}

impl<K> std::fmt::Display for IdentityUser<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_name.as_deref().unwrap_or_default())
    }
}
