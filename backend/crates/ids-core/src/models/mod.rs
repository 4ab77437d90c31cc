pub mod identity_claim;
pub mod identity_role;
pub mod identity_user;
pub mod identity_user_login;
pub mod user_login_info;
