use crate::{role_commands::RoleCommands, user_commands::UserCommands};

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Role operations
    Role {
        #[command(subcommand)]
        action: RoleCommands,
    },

    /// User operations
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
}
