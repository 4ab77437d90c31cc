//! A small document-collection layer over SQLite's JSON functions.
//!
//! Every collection lives in the shared `documents` table, keyed by
//! `(collection, id)`, with the serialized record in `body`.

pub mod collection;
pub mod fields;
pub mod filter;

use ids_core::{IdentityKey, IdentityRole, IdentityUser};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record that can be stored in a [`collection::DocumentCollection`].
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// The stored identifier, `None` while the record has no id assigned.
    fn document_id(&self) -> Option<String>;
}

impl<K: IdentityKey> Document for IdentityRole<K> {
    fn document_id(&self) -> Option<String> {
        self.id.to_key_string()
    }
}

impl<K: IdentityKey> Document for IdentityUser<K> {
    fn document_id(&self) -> Option<String> {
        self.id.to_key_string()
    }
}
