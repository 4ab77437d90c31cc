use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct ClaimArgs {
    /// User ID
    pub id: String,
    /// Claim type
    #[arg(long = "type")]
    pub claim_type: String,
    /// Claim value
    #[arg(long = "value")]
    pub claim_value: String,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// User ID
    pub id: String,
    /// Login provider, e.g. "github"
    #[arg(long)]
    pub provider: String,
    /// Key of the user at the provider
    #[arg(long)]
    pub key: String,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create a user
    Create {
        /// User name
        user_name: String,
        /// Email address
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a user by ID
    Delete {
        /// User ID
        id: String,
    },
    /// Get a user by ID, user name or email
    Get {
        /// User ID, or the value to match when --name or --email is set
        key: String,
        /// Look the user up by user name
        #[arg(long, conflicts_with = "email")]
        name: bool,
        /// Look the user up by email
        #[arg(long)]
        email: bool,
    },
    /// List all users
    List,
    /// Add a user to a role
    AddToRole {
        /// User ID
        id: String,
        /// Role name
        role: String,
    },
    /// Remove a user from a role
    RemoveFromRole {
        /// User ID
        id: String,
        /// Role name
        role: String,
    },
    /// Add a claim to a user
    AddClaim(ClaimArgs),
    /// Remove a claim from a user
    RemoveClaim(ClaimArgs),
    /// Show a user's claims
    Claims {
        /// User ID
        id: String,
        /// Include claims inherited from roles
        #[arg(long)]
        all: bool,
    },
    /// Link an external login to a user
    AddLogin {
        #[command(flatten)]
        login: LoginArgs,
        /// Display name of the provider
        #[arg(long)]
        display_name: Option<String>,
    },
    /// Unlink an external login from a user
    RemoveLogin(LoginArgs),
}
