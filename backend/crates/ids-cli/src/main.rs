//! ids - identity store administration
//!
//! # Examples
//!
//! ```bash
//! # Create a role and a user, then assign the role
//! ids role create Admin
//! ids user create alice --email alice@example.com
//! ids user add-to-role <user-id> Admin
//!
//! # Show the user's effective claims
//! ids user claims <user-id> --all --pretty
//! ```

use ids_cli::commands::Commands;
use ids_cli::role_commands::RoleCommands;
use ids_cli::user_commands::{ClaimArgs, UserCommands};
use ids_cli::{Admin, Cli, CliResult, logger};
use ids_config::Config;
use ids_core::{CancellationToken, IdentityClaim, UserLoginInfo};
use ids_db::ConnectionManager;

use std::process::ExitCode;

use clap::Parser;
use log::{debug, warn};
use serde_json::Value;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let pretty = cli.pretty;

    match run(cli).await {
        Ok(value) => {
            let output = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<Value> {
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => Config::config_dir()?,
    };

    let config = Config::load_from(&config_dir)?;
    config.validate()?;

    let log_file = config.logging.file.as_ref().map(|f| config_dir.join(f));
    logger::initialize(config.logging.level, log_file, config.logging.colored)?;
    config.log_summary();

    let manager = ConnectionManager::new(config.database_directory(&config_dir))
        .with_max_connections(config.database.max_connections)
        .with_durable_writes(config.database.durable_writes);
    let pool = manager.get_pool(&config.database.name).await?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    let admin = Admin::new(
        pool,
        &config.collections.users,
        &config.collections.roles,
        cancel,
    );

    let result = dispatch(&admin, cli.command).await;

    manager.close().await;
    debug!("Database closed");

    result
}

async fn dispatch(admin: &Admin, command: Commands) -> CliResult<Value> {
    match command {
        Commands::Role { action } => match action {
            RoleCommands::Create { name } => admin.create_role(&name).await,
            RoleCommands::Delete { id } => admin.delete_role(&id).await,
            RoleCommands::Get { key, name } => admin.get_role(&key, name).await,
            RoleCommands::List => admin.list_roles().await,
            RoleCommands::AddClaim {
                id,
                claim_type,
                claim_value,
            } => {
                admin
                    .add_role_claim(&id, IdentityClaim::new(claim_type, claim_value))
                    .await
            }
            RoleCommands::RemoveClaim {
                id,
                claim_type,
                claim_value,
            } => {
                admin
                    .remove_role_claim(&id, IdentityClaim::new(claim_type, claim_value))
                    .await
            }
        },

        Commands::User { action } => match action {
            UserCommands::Create { user_name, email } => {
                admin.create_user(&user_name, email.as_deref()).await
            }
            UserCommands::Delete { id } => admin.delete_user(&id).await,
            UserCommands::Get { key, name, email } => admin.get_user(&key, name, email).await,
            UserCommands::List => admin.list_users().await,
            UserCommands::AddToRole { id, role } => admin.add_to_role(&id, &role).await,
            UserCommands::RemoveFromRole { id, role } => admin.remove_from_role(&id, &role).await,
            UserCommands::AddClaim(ClaimArgs {
                id,
                claim_type,
                claim_value,
            }) => {
                admin
                    .add_user_claim(&id, IdentityClaim::new(claim_type, claim_value))
                    .await
            }
            UserCommands::RemoveClaim(ClaimArgs {
                id,
                claim_type,
                claim_value,
            }) => {
                admin
                    .remove_user_claim(&id, IdentityClaim::new(claim_type, claim_value))
                    .await
            }
            UserCommands::Claims { id, all } => admin.user_claims(&id, all).await,
            UserCommands::AddLogin {
                login,
                display_name,
            } => {
                let info = UserLoginInfo::new(login.provider, login.key, display_name);
                admin.add_login(&login.id, info).await
            }
            UserCommands::RemoveLogin(login) => {
                admin
                    .remove_login(&login.id, &login.provider, &login.key)
                    .await
            }
        },
    }
}
