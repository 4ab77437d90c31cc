use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum RoleCommands {
    /// Create a role
    Create {
        /// Role name
        name: String,
    },
    /// Delete a role by ID
    Delete {
        /// Role ID
        id: String,
    },
    /// Get a role by ID, or by name with --name
    Get {
        /// Role ID, or role name when --name is set
        key: String,
        /// Look the role up by name
        #[arg(long)]
        name: bool,
    },
    /// List all roles
    List,
    /// Add a claim to a role
    AddClaim {
        /// Role ID
        id: String,
        /// Claim type
        #[arg(long = "type")]
        claim_type: String,
        /// Claim value
        #[arg(long = "value")]
        claim_value: String,
    },
    /// Remove a claim from a role
    RemoveClaim {
        /// Role ID
        id: String,
        /// Claim type
        #[arg(long = "type")]
        claim_type: String,
        /// Claim value
        #[arg(long = "value")]
        claim_value: String,
    },
}
