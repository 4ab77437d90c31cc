use crate::{ConfigError, ConfigErrorResult, DEFAULT_ROLES_COLLECTION, DEFAULT_USERS_COLLECTION};

use serde::Deserialize;

/// Names of the document collections the stores use.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    pub users: String,
    pub roles: String,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            users: String::from(DEFAULT_USERS_COLLECTION),
            roles: String::from(DEFAULT_ROLES_COLLECTION),
        }
    }
}

impl CollectionsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (key, name) in [("users", &self.users), ("roles", &self.roles)] {
            if !is_valid_name(name) {
                return Err(ConfigError::collections(format!(
                    "collections.{key} '{name}' must be non-empty and use only letters, digits and '_'"
                )));
            }
        }

        if self.users == self.roles {
            return Err(ConfigError::collections(format!(
                "collections.users and collections.roles must differ, both are '{}'",
                self.users
            )));
        }

        Ok(())
    }
}

pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
