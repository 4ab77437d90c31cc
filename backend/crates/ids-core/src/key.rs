use crate::{CoreError, Result as CoreErrorResult};

use std::fmt::{Debug, Display};
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Identifier type for users and roles.
///
/// The `Default` value of a key means "not assigned": it never round-trips
/// to a stored identifier. `String` and `uuid::Uuid` both qualify.
pub trait IdentityKey:
    Clone
    + Debug
    + Default
    + Display
    + PartialEq
    + FromStr<Err: Display>
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Text form of the key, or `None` when the key is unassigned.
    fn to_key_string(&self) -> Option<String> {
        if *self == Self::default() {
            None
        } else {
            Some(self.to_string())
        }
    }

    /// Parse a key from its text form. Blank input yields `None`.
    #[track_caller]
    fn parse_key(value: &str) -> CoreErrorResult<Option<Self>> {
        if value.trim().is_empty() {
            return Ok(None);
        }

        value
            .parse::<Self>()
            .map(Some)
            .map_err(|e| CoreError::InvalidKey {
                value: value.to_string(),
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl<T> IdentityKey for T where
    T: Clone
        + Debug
        + Default
        + Display
        + PartialEq
        + FromStr<Err: Display>
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static
{
}
