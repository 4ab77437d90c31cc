use crate::IdentityError;

pub const DUPLICATE_ROLE_NAME: &str = "DuplicateRoleName";
pub const DUPLICATE_USER_NAME: &str = "DuplicateUserName";

/// Builds the [`IdentityError`]s the stores report.
///
/// Override individual methods to localize or reword messages; the codes are
/// what callers should match on.
pub trait ErrorDescriber: Send + Sync {
    fn duplicate_role_name(&self, role_name: &str) -> IdentityError {
        IdentityError::new(
            DUPLICATE_ROLE_NAME,
            format!("Role name '{role_name}' is already taken."),
        )
    }

    fn duplicate_user_name(&self, user_name: &str) -> IdentityError {
        IdentityError::new(
            DUPLICATE_USER_NAME,
            format!("User name '{user_name}' is already taken."),
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorDescriber;

impl ErrorDescriber for DefaultErrorDescriber {}
