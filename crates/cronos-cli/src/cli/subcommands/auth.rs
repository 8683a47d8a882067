use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Store a user identity for later commands.
    Login(AuthLoginArgs),
    /// Clear the stored identity.
    Logout,
    /// Show who is signed in and from where.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// User ID to sign in as.
    #[arg(long = "user")]
    pub user_id: String,
    #[arg(long)]
    pub email: Option<String>,
}
