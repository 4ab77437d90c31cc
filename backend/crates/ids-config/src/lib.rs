mod collections_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;

pub use collections_config::CollectionsConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;

const CONFIG_DIR_ENV: &str = "IDS_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".ids";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_DATABASE_DIRECTORY: &str = "data";
const DEFAULT_DATABASE_NAME: &str = "identity";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const MAX_MAX_CONNECTIONS: u32 = 100;
const DEFAULT_DURABLE_WRITES: bool = true;

const DEFAULT_USERS_COLLECTION: &str = "identity_users";
const DEFAULT_ROLES_COLLECTION: &str = "identity_roles";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;

#[cfg(test)]
mod tests;
