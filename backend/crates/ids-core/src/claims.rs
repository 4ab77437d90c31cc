//! Claim list reconciliation shared by the role and user stores.
//!
//! Claims compare by `(claim_type, claim_value)`. A list may hold several
//! claims of the same type as long as their values differ.

use crate::IdentityClaim;

use std::collections::HashSet;

/// Own claims followed by each role's claims, keeping the first occurrence
/// of every `(type, value)` pair.
pub fn effective_claims<'a, I>(own: &'a [IdentityClaim], role_claims: I) -> Vec<IdentityClaim>
where
    I: IntoIterator<Item = &'a [IdentityClaim]>,
{
    let mut seen: HashSet<&IdentityClaim> = HashSet::new();
    let mut result = Vec::new();

    let lists = std::iter::once(own).chain(role_claims);
    for claim in lists.flat_map(|list| list.iter()) {
        if seen.insert(claim) {
            result.push(claim.clone());
        }
    }

    result
}

/// Appends `claim` unless an identical one is present. Returns whether the
/// list changed.
pub fn add_claim(claims: &mut Vec<IdentityClaim>, claim: IdentityClaim) -> bool {
    if claims.contains(&claim) {
        return false;
    }
    claims.push(claim);
    true
}

/// Removes every entry equal to `claim`. Returns whether the list changed.
pub fn remove_claim(claims: &mut Vec<IdentityClaim>, claim: &IdentityClaim) -> bool {
    let before = claims.len();
    claims.retain(|c| c != claim);
    claims.len() != before
}

/// Replaces every entry equal to `old` with `new`, dropping replacements that
/// would duplicate a claim already in the list.
pub fn replace_claim(
    claims: &mut Vec<IdentityClaim>,
    old: &IdentityClaim,
    new: &IdentityClaim,
) -> bool {
    if old == new || !claims.contains(old) {
        return false;
    }

    let mut replaced: Vec<IdentityClaim> = Vec::with_capacity(claims.len());
    for claim in claims.drain(..) {
        let claim = if &claim == old { new.clone() } else { claim };
        if !replaced.contains(&claim) {
            replaced.push(claim);
        }
    }
    *claims = replaced;
    true
}
