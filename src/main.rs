use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use distri_client::cli::{self, Cli, Command};
use distri_client::config::{load_config, schema_json};
use distri_client::http::ConsoleNotifier;
use distri_client::startup;
use distri_client::utils::logger::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    if let Command::Schema = args.command {
        return match schema_json() {
            Ok(schema) => {
                println!("{}", schema);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error rendering schema: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }

    let mut state = match startup::build(config, Arc::new(ConsoleNotifier)) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error starting client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli::execute(&mut state, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.already_reported() {
                eprintln!("error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}
