pub mod claims;
pub mod error;
pub mod error_describer;
pub mod identity_result;
pub mod key;
pub mod models;
pub mod normalizer;
pub mod stores;

mod serde_defaults;

pub use error::{CoreError, Result};
pub use error_describer::{DefaultErrorDescriber, ErrorDescriber};
pub use identity_result::{IdentityError, IdentityResult};
pub use key::IdentityKey;
pub use models::identity_claim::IdentityClaim;
pub use models::identity_role::IdentityRole;
pub use models::identity_user::IdentityUser;
pub use models::identity_user_login::IdentityUserLogin;
pub use models::user_login_info::UserLoginInfo;
pub use normalizer::{LookupNormalizer, UpperInvariantNormalizer};
pub use stores::role_stores::{QueryableRoleStore, RoleClaimStore, RoleStore};
pub use stores::user_stores::{
    QueryableUserStore, UserClaimStore, UserEmailStore, UserLockoutStore, UserLoginStore,
    UserPasswordStore, UserPhoneNumberStore, UserRoleStore, UserSecurityStampStore, UserStore,
    UserTwoFactorStore,
};

pub use error_location::ErrorLocation;
pub use tokio_util::sync::CancellationToken;

#[cfg(test)]
mod tests;
