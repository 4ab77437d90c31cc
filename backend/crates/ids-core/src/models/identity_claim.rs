use serde::{Deserialize, Serialize};

/// A `(type, value)` attribute attached to a user or a role.
///
/// Two claims are the same claim when both type and value match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityClaim {
    pub claim_type: String,
    pub claim_value: String,
}

impl IdentityClaim {
    pub fn new(claim_type: impl Into<String>, claim_value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
        }
    }
}

impl std::fmt::Display for IdentityClaim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.claim_type, self.claim_value)
    }
}
