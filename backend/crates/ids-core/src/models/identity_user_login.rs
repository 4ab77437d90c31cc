use crate::{IdentityKey, UserLoginInfo};

use serde::{Deserialize, Serialize};

/// A user's external login (e.g. a social provider), embedded in the user.
///
/// Unique per `(login_provider, provider_key)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, bound = "K: IdentityKey")]
pub struct IdentityUserLogin<K = String> {
    pub user_id: K,
    pub login_provider: String,
    pub provider_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_display_name: Option<String>,
}

impl<K: IdentityKey> IdentityUserLogin<K> {
    pub fn from_info(user_id: K, info: UserLoginInfo) -> Self {
        Self {
            user_id,
            login_provider: info.login_provider,
            provider_key: info.provider_key,
            provider_display_name: info.display_name,
        }
    }

    pub fn matches(&self, login_provider: &str, provider_key: &str) -> bool {
        self.login_provider == login_provider && self.provider_key == provider_key
    }

    pub fn to_info(&self) -> UserLoginInfo {
        UserLoginInfo {
            login_provider: self.login_provider.clone(),
            provider_key: self.provider_key.clone(),
            display_name: self.provider_display_name.clone(),
        }
    }
}
