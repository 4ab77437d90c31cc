use ids_core::{IdentityClaim, IdentityRole, IdentityUser};

/// Creates a role with its normalized name filled in
pub fn create_test_role(name: &str) -> IdentityRole {
    let mut role = IdentityRole::new(name);
    role.normalized_name = Some(name.to_uppercase());
    role
}

/// Creates a user with normalized user name and email filled in
pub fn create_test_user(user_name: &str) -> IdentityUser {
    let mut user = IdentityUser::new(user_name);
    user.normalized_user_name = Some(user_name.to_uppercase());
    let email = format!("{user_name}@example.com");
    user.normalized_email = Some(email.to_uppercase());
    user.email = Some(email);
    user
}

pub fn claim(claim_type: &str, claim_value: &str) -> IdentityClaim {
    IdentityClaim::new(claim_type, claim_value)
}
