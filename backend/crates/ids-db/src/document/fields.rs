//! Stored field names, matching the camelCase serialization of the models.

pub const NAME: &str = "name";
pub const NORMALIZED_NAME: &str = "normalizedName";
pub const USER_NAME: &str = "userName";
pub const NORMALIZED_USER_NAME: &str = "normalizedUserName";
pub const NORMALIZED_EMAIL: &str = "normalizedEmail";
pub const CLAIMS: &str = "claims";
pub const ROLES: &str = "roles";
pub const LOGINS: &str = "logins";
pub const LOGIN_PROVIDER: &str = "loginProvider";
pub const PROVIDER_KEY: &str = "providerKey";
pub const CLAIM_TYPE: &str = "claimType";
pub const CLAIM_VALUE: &str = "claimValue";
