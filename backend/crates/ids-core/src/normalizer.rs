/// Produces the normalized form of names and emails used for lookups.
pub trait LookupNormalizer: Send + Sync {
    fn normalize_name(&self, name: &str) -> String;
    fn normalize_email(&self, email: &str) -> String;
}

/// Upper-cases input after trimming surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperInvariantNormalizer;

impl LookupNormalizer for UpperInvariantNormalizer {
    fn normalize_name(&self, name: &str) -> String {
        name.trim().to_uppercase()
    }

    fn normalize_email(&self, email: &str) -> String {
        email.trim().to_uppercase()
    }
}
