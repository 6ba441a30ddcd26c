//! Command-line front end over [`AppState`].

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;

use crate::auth::AuthError;
use crate::config::DEFAULT_CONFIG_PATH;
use crate::http::ApiError;
use crate::models::Credentials;
use crate::router::NavigationError;
use crate::state::AppState;
use crate::store::StorageError;

#[derive(Parser, Debug)]
#[command(name = "distri-client", version, about = "DistriChat command-line client")]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create an account and start a session.
    Register {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Start a session.
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the local session.
    Logout,
    /// Show the stored profile.
    Whoami,
    /// Authenticated GET against the backend; prints the response data.
    Get { path: String },
    /// Run a route transition through the navigation guard.
    Navigate { path: String },
    /// Print the configuration JSON schema.
    Schema,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Pipeline failures have already been shown to the user by the notifier.
    pub fn already_reported(&self) -> bool {
        matches!(self, CliError::Api(_) | CliError::Auth(AuthError::Api(_)))
    }
}

/// Run one command. Results go to stdout.
pub async fn execute(state: &mut AppState, command: Command) -> Result<(), CliError> {
    match command {
        Command::Register { phone, password } => {
            let session = state.auth.register(&Credentials::new(phone, password)).await?;
            println!("Registered as user {} ({})", session.user_id, session.nickname);
            land_after_login(state)?;
        }
        Command::Login { phone, password } => {
            let session = state.auth.login(&Credentials::new(phone, password)).await?;
            println!("Logged in as user {} ({})", session.user_id, session.nickname);
            land_after_login(state)?;
        }
        Command::Logout => {
            state.auth.logout()?;
            println!("Logged out");
        }
        Command::Whoami => match state.auth.current_user() {
            Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
            None => println!("Not logged in"),
        },
        Command::Get { path } => {
            let result = state.client.get::<Value>(&path).await;
            if let Some(location) = state.process_session_events()? {
                println!("Session expired; now at {}", location.full_path());
            }
            println!("{}", serde_json::to_string_pretty(&result?)?);
        }
        Command::Navigate { path } => {
            let location = state.navigator.navigate(&path)?;
            match state.navigator.title() {
                Some(title) => println!("{} ({})", location.full_path(), title),
                None => println!("{}", location.full_path()),
            }
        }
        Command::Schema => println!("{}", crate::config::schema_json()?),
    }
    Ok(())
}

fn land_after_login(state: &mut AppState) -> Result<(), CliError> {
    let target = state.navigator.post_login_target();
    let location = state.navigator.navigate(&target)?;
    println!("Now at {}", location.full_path());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login_with_global_config() {
        let cli = Cli::try_parse_from([
            "distri-client",
            "login",
            "--phone",
            "13800000000",
            "--password",
            "pw",
            "--config",
            "/etc/distri.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/distri.yaml"));
        assert!(matches!(cli.command, Command::Login { ref phone, .. } if phone == "13800000000"));
    }

    #[test]
    fn config_defaults_to_local_file() {
        let cli = Cli::try_parse_from(["distri-client", "whoami"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn api_failures_count_as_reported() {
        let err = CliError::Api(ApiError::from_status(::http::StatusCode::FORBIDDEN, None));
        assert!(err.already_reported());
        let err = CliError::Navigation(NavigationError::NotFound("/x".to_string()));
        assert!(!err.already_reported());
    }
}
