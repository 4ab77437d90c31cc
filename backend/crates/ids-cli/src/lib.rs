//! ids-cli library
//!
//! Command definitions and the [`Admin`] executor behind the `ids` binary.

pub mod admin;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod role_commands;
pub mod user_commands;

#[cfg(test)]
mod tests;

pub use admin::Admin;
pub use cli::Cli;
pub use error::{CliError, CliResult};
