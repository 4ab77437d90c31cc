use crate::claims::{add_claim, effective_claims, remove_claim, replace_claim};
use crate::{IdentityClaim, IdentityRole, IdentityUser};

use googletest::prelude::*;

fn claim(claim_type: &str, claim_value: &str) -> IdentityClaim {
    IdentityClaim::new(claim_type, claim_value)
}

fn role_with_claims(name: &str, claims: Vec<IdentityClaim>) -> IdentityRole {
    let mut role = IdentityRole::new(name);
    role.set_claims(Some(claims));
    role
}

#[test]
fn given_user_without_claims_or_roles_when_all_claims_then_returns_empty() {
    let user = IdentityUser::new("alice");

    let claims = user.all_claims();

    assert_that!(claims, len(eq(0)));
}

#[test]
fn given_claim_on_user_and_role_when_all_claims_then_claim_appears_once() {
    // Given
    let mut user = IdentityUser::new("alice");
    user.set_claims(Some(vec![claim("department", "sales")]));
    user.set_roles(Some(vec![role_with_claims(
        "Manager",
        vec![claim("department", "sales"), claim("level", "2")],
    )]));

    // When
    let claims = user.all_claims();

    // Then
    assert_that!(
        claims,
        elements_are![eq(&claim("department", "sales")), eq(&claim("level", "2"))]
    );
}

#[test]
fn given_two_roles_with_overlapping_claims_when_all_claims_then_returns_three_distinct() {
    // Given
    let role_a = role_with_claims("A", vec![claim("T1", "V1"), claim("T2", "V2")]);
    let role_b = role_with_claims("B", vec![claim("T1", "V1'"), claim("T2", "V2")]);
    let mut user = IdentityUser::new("bob");
    user.set_roles(Some(vec![role_a, role_b]));

    // When
    let claims = user.all_claims();

    // Then
    assert_that!(
        claims,
        elements_are![
            eq(&claim("T1", "V1")),
            eq(&claim("T2", "V2")),
            eq(&claim("T1", "V1'"))
        ]
    );
}

#[test]
fn given_role_claims_when_effective_claims_then_own_claims_come_first() {
    let own = vec![claim("b", "2")];
    let role = vec![claim("a", "1"), claim("b", "2")];

    let claims = effective_claims(&own, [role.as_slice()]);

    assert_that!(claims, elements_are![eq(&claim("b", "2")), eq(&claim("a", "1"))]);
}

#[test]
fn given_existing_claim_when_added_again_then_list_is_unchanged() {
    let mut claims = vec![claim("email", "a@example.com")];

    let changed = add_claim(&mut claims, claim("email", "a@example.com"));

    assert_that!(changed, eq(false));
    assert_that!(claims, len(eq(1)));
}

#[test]
fn given_claim_with_same_type_and_other_value_when_added_then_both_are_kept() {
    let mut claims = vec![claim("email", "a@example.com")];

    let changed = add_claim(&mut claims, claim("email", "b@example.com"));

    assert_that!(changed, eq(true));
    assert_that!(claims, len(eq(2)));
}

#[test]
fn given_claim_never_added_when_removed_then_is_no_op() {
    let mut claims = vec![claim("email", "a@example.com")];

    let changed = remove_claim(&mut claims, &claim("email", "other@example.com"));

    assert_that!(changed, eq(false));
    assert_that!(claims, elements_are![eq(&claim("email", "a@example.com"))]);
}

#[test]
fn given_present_claim_when_removed_then_only_matching_value_is_removed() {
    let mut claims = vec![claim("email", "a@example.com"), claim("email", "b@example.com")];

    let changed = remove_claim(&mut claims, &claim("email", "a@example.com"));

    assert_that!(changed, eq(true));
    assert_that!(claims, elements_are![eq(&claim("email", "b@example.com"))]);
}

#[test]
fn given_present_claim_when_replaced_then_position_is_kept() {
    let mut claims = vec![claim("a", "1"), claim("b", "2"), claim("c", "3")];

    let changed = replace_claim(&mut claims, &claim("b", "2"), &claim("b", "20"));

    assert_that!(changed, eq(true));
    assert_that!(
        claims,
        elements_are![eq(&claim("a", "1")), eq(&claim("b", "20")), eq(&claim("c", "3"))]
    );
}

#[test]
fn given_replacement_already_present_when_replaced_then_duplicate_is_dropped() {
    let mut claims = vec![claim("a", "1"), claim("b", "2")];

    let changed = replace_claim(&mut claims, &claim("a", "1"), &claim("b", "2"));

    assert_that!(changed, eq(true));
    assert_that!(claims, elements_are![eq(&claim("b", "2"))]);
}

#[test]
fn given_missing_claim_when_replaced_then_is_no_op() {
    let mut claims = vec![claim("a", "1")];

    let changed = replace_claim(&mut claims, &claim("x", "9"), &claim("y", "9"));

    assert_that!(changed, eq(false));
    assert_that!(claims, elements_are![eq(&claim("a", "1"))]);
}
