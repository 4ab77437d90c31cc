use crate::IdentityClaim;
use crate::IdentityKey;
use crate::serde_defaults::null_as_empty;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named role carrying its own claims.
///
/// The same shape is embedded in users as a role snapshot, which is what
/// lets a user's effective claims be computed without a second lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, bound = "K: IdentityKey")]
pub struct IdentityRole<K = String> {
    pub id: K,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_name: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    claims: Vec<IdentityClaim>,
}

impl IdentityRole<String> {
    /// Creates a role with a freshly generated identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self::named(Uuid::new_v4().to_string(), name)
    }
}

impl<K: IdentityKey> IdentityRole<K> {
    pub fn with_id(id: K) -> Self {
        Self {
            id,
            name: None,
            normalized_name: None,
            claims: Vec::new(),
        }
    }

    pub fn named(id: K, name: impl Into<String>) -> Self {
        let mut role = Self::with_id(id);
        role.name = Some(name.into());
        role
    }

    pub fn claims(&self) -> &[IdentityClaim] {
        &self.claims
    }

    pub fn claims_mut(&mut self) -> &mut Vec<IdentityClaim> {
        &mut self.claims
    }

    /// `None` resets the claims to an empty list.
    pub fn set_claims(&mut self, claims: Option<Vec<IdentityClaim>>) {
        self.claims = claims.unwrap_or_default();
    }
}

impl<K> std::fmt::Display for IdentityRole<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name.as_deref().unwrap_or_default())
    }
}
