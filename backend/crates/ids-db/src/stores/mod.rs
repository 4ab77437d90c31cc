pub mod role_store;
pub mod store_guard;
pub mod user_store;

pub const DEFAULT_ROLES_COLLECTION: &str = "identity_roles";
pub const DEFAULT_USERS_COLLECTION: &str = "identity_users";

/// Blank collection names fall back to `default`.
pub(crate) fn collection_name_or(name: &str, default: &str) -> String {
    if name.trim().is_empty() {
        default.to_string()
    } else {
        name.to_string()
    }
}
