use ids_core::{CoreError, ErrorLocation};

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Document serialization failed: {source} {location}")]
    Serialization {
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("{store} has been disposed {location}")]
    Disposed {
        store: &'static str,
        location: ErrorLocation,
    },

    #[error("Operation cancelled {location}")]
    Cancelled { location: ErrorLocation },

    #[error("Invalid argument '{argument}': {message} {location}")]
    InvalidArgument {
        argument: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid identifier '{value}': {message} {location}")]
    InvalidKey {
        value: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Role {role_name} does not exist {location}")]
    RoleNotFound {
        role_name: String,
        location: ErrorLocation,
    },

    #[error("More than one document in {collection} matches {filter} {location}")]
    NotUnique {
        collection: String,
        filter: String,
        location: ErrorLocation,
    },
}

impl DbError {
    /// True when the database rejected a write on a unique index.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::Sqlx { source: sqlx::Error::Database(db), .. } if db.is_unique_violation())
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for DbError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for DbError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidKey {
                value,
                message,
                location,
            } => Self::InvalidKey {
                value,
                message,
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
