use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// A single failure reported by a store operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityError {
    pub code: String,
    pub description: String,
}

impl IdentityError {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Outcome of a write against a store.
///
/// Expected business failures (a taken name) come back as `Failed`; storage
/// faults are returned as `Err` by the store instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdentityResult {
    #[default]
    Success,
    Failed(Vec<IdentityError>),
}

impl IdentityResult {
    pub fn failed(error: IdentityError) -> Self {
        Self::Failed(vec![error])
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn errors(&self) -> &[IdentityError] {
        match self {
            Self::Success => &[],
            Self::Failed(errors) => errors,
        }
    }
}

impl std::fmt::Display for IdentityResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Succeeded"),
            Self::Failed(errors) => {
                let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
                write!(f, "Failed : {}", codes.join(","))
            }
        }
    }
}

impl Serialize for IdentityResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("IdentityResult", 2)?;
        state.serialize_field("succeeded", &self.succeeded())?;
        state.serialize_field("errors", self.errors())?;
        state.end()
    }
}
