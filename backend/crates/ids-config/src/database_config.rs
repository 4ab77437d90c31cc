use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DATABASE_DIRECTORY, DEFAULT_DATABASE_NAME,
    DEFAULT_DURABLE_WRITES, DEFAULT_MAX_CONNECTIONS, MAX_MAX_CONNECTIONS,
    collections_config::is_valid_name,
};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Directory holding the database files, relative to the config dir.
    pub directory: String,
    /// Database name; the file is `<directory>/<name>.db`.
    pub name: String,
    pub max_connections: u32,
    pub durable_writes: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            directory: String::from(DEFAULT_DATABASE_DIRECTORY),
            name: String::from(DEFAULT_DATABASE_NAME),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            durable_writes: DEFAULT_DURABLE_WRITES,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if Path::new(&self.directory).is_absolute() || self.directory.contains("..") {
            return Err(ConfigError::database(
                "database.directory must be relative and cannot contain '..'",
            ));
        }

        if !is_valid_name(&self.name) {
            return Err(ConfigError::database(format!(
                "database.name '{}' must be non-empty and use only letters, digits and '_'",
                self.name
            )));
        }

        if !(1..=MAX_MAX_CONNECTIONS).contains(&self.max_connections) {
            return Err(ConfigError::database(format!(
                "database.max_connections must be between 1 and {}, got {}",
                MAX_MAX_CONNECTIONS, self.max_connections
            )));
        }

        Ok(())
    }
}
