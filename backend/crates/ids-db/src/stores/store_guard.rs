use crate::document::Document;
use crate::document::collection::DocumentCollection;
use crate::document::filter::Filter;
use crate::{DbError, Result};

use ids_core::{CancellationToken, ErrorLocation, IdentityKey};

use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether a store has been disposed.
#[derive(Debug, Default)]
pub struct DisposeGuard {
    disposed: AtomicBool,
}

impl DisposeGuard {
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    #[track_caller]
    pub fn check(&self, store: &'static str) -> Result<()> {
        if self.is_disposed() {
            return Err(DbError::Disposed {
                store,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

#[track_caller]
pub fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(DbError::Cancelled {
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

/// The stored form of `id`, rejecting unassigned keys.
#[track_caller]
pub fn require_key<K: IdentityKey>(id: &K) -> Result<String> {
    match id.to_key_string() {
        Some(id) => Ok(id),
        None => Err(DbError::InvalidArgument {
            argument: "id",
            message: "record has no identifier assigned".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

#[track_caller]
pub fn require_non_blank(argument: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DbError::InvalidArgument {
            argument,
            message: "value must not be blank".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

/// True when a document other than `id` already uses `name` in `field`.
///
/// An absent name matches other documents without one. The check and the
/// write that follows are separate statements, so two concurrent writers
/// can both pass it.
pub async fn name_taken<T: Document>(
    collection: &DocumentCollection<T>,
    id: &str,
    field: &'static str,
    name: Option<&str>,
) -> Result<bool> {
    let filter = Filter::id_ne(id).and(Filter::eq_opt(field, name));
    Ok(collection.count(&filter).await? > 0)
}
