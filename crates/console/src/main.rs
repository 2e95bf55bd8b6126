// The Cloud console - dashboard TUI and plain-table commands

mod commands;
mod exit_codes;
mod format;
mod tui;
mod util;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_API_NETWORK, EXIT_API_NOT_AUTH, EXIT_SUCCESS, EXIT_USAGE};
use thecloud_api_client::ApiError;

#[derive(Parser)]
#[command(name = "thecloud")]
#[command(about = "Terminal console for The Cloud")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save an API key for subsequent commands
    #[command(after_help = "\
Examples:
  thecloud login thecloud_abc123
  THECLOUD_API_KEY=thecloud_abc123 thecloud login
  thecloud login --demo demo-user")]
    Login {
        /// API key (omit to read THECLOUD_API_KEY or prompt)
        key: Option<String>,

        /// Request a fresh key from the server under this name, then save it
        #[arg(long, value_name = "NAME")]
        demo: Option<String>,
    },

    /// Clear the stored API key
    Logout,

    /// Open the interactive dashboard
    Dash,

    /// List compute instances
    Instances {
        /// Print raw records as JSON
        #[arg(long)]
        json: bool,
    },

    /// List VPCs
    Vpcs {
        #[arg(long)]
        json: bool,
    },

    /// List the objects in a bucket
    Storage {
        /// Bucket name
        bucket: String,

        #[arg(long)]
        json: bool,
    },

    /// List audit events
    Events {
        #[arg(long)]
        json: bool,
    },

    /// Show the overview summary and recent activity
    Stats {
        #[arg(long)]
        json: bool,
    },
}

/// One CLI failure: exit code, message, optional hint.
pub(crate) struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: message.into(),
            hint: None,
        }
    }
}

/// Map API client errors onto the exit-code registry.
pub(crate) fn api_error(e: ApiError) -> CliError {
    match e {
        ApiError::MissingKey => CliError {
            code: EXIT_API_NOT_AUTH,
            message: e.to_string(),
            hint: Some("run `thecloud login` first".into()),
        },
        ApiError::Network(_) | ApiError::Http(..) | ApiError::Parse(_) => CliError {
            code: EXIT_API_NETWORK,
            message: e.to_string(),
            hint: None,
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Login { key, demo }) => commands::cmd_login(key, demo),
        Some(Commands::Logout) => commands::cmd_logout(),
        Some(Commands::Dash) => tui::run(),
        Some(Commands::Instances { json }) => commands::cmd_instances(json),
        Some(Commands::Vpcs { json }) => commands::cmd_vpcs(json),
        Some(Commands::Storage { bucket, json }) => commands::cmd_storage(&bucket, json),
        Some(Commands::Events { json }) => commands::cmd_events(json),
        Some(Commands::Stats { json }) => commands::cmd_stats(json),
        None => {
            if atty::is(atty::Stream::Stdout) {
                tui::run()
            } else {
                Err(CliError::usage(
                    "no command given and stdout is not a terminal (try `thecloud instances`)",
                ))
            }
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(e.code)
        }
    }
}
