pub mod connection;
pub mod document;
pub mod error;
pub mod stores;

pub use connection::connection_manager::ConnectionManager;
pub use connection::migrations::run_migrations;
pub use document::Document;
pub use document::collection::DocumentCollection;
pub use document::filter::Filter;
pub use error::{DbError, Result};
pub use stores::role_store::DocumentRoleStore;
pub use stores::user_store::DocumentUserStore;
pub use stores::{DEFAULT_ROLES_COLLECTION, DEFAULT_USERS_COLLECTION};
