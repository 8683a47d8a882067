use cronos_auth::LocalAuth;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    email: Option<String>,
    source: Option<&'static str>,
}

#[derive(Serialize)]
struct AuthLoginResponse {
    user_id: String,
    email: Option<String>,
}

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

/// Handle `cronos auth <subcommand>`. Runs without a session.
pub async fn handle(
    action: &AuthCommands,
    auth: &LocalAuth,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => {
            let user = auth.sign_in(&args.user_id, args.email.as_deref())?;
            output(
                &AuthLoginResponse {
                    user_id: user.user_id,
                    email: user.email,
                },
                flags.format,
            )
        }
        AuthCommands::Logout => {
            auth.sign_out_local()?;
            output(&AuthLogoutResponse { cleared: true }, flags.format)
        }
        AuthCommands::Status => {
            let status = match auth.resolve() {
                Some((user, source)) => AuthStatusResponse {
                    authenticated: true,
                    user_id: Some(user.user_id),
                    email: user.email,
                    source: Some(source.as_str()),
                },
                None => AuthStatusResponse {
                    authenticated: false,
                    user_id: None,
                    email: None,
                    source: None,
                },
            };
            output(&status, flags.format)
        }
    }
}
