//! # jury CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jury_cli::edit::{run_edit, EditArgs};
use jury_cli::pull::{run_pull, PullArgs};
use jury_cli::push::{run_push, PushArgs};
use jury_cli::show::{run_show, ShowArgs};
use jury_client::ClientConfig;
use jury_core::Scope;

/// Jury roster editor.
///
/// Pulls an event's jury roster into a local draft, applies operator
/// actions under the rules of the regional or national governing body,
/// and pushes the result back to the roster service.
#[derive(Parser, Debug)]
#[command(name = "jury", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Governing body operating the editor (regional or national).
    ///
    /// `pull` defaults to regional. Other commands use the scope recorded
    /// in the draft and refuse a different one.
    #[arg(long, global = true)]
    scope: Option<Scope>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch an event's roster and eligible officials into a draft.
    Pull(PullArgs),

    /// Show a draft with its validation errors and submit status.
    Show(ShowArgs),

    /// Apply operator actions to a draft.
    Edit(EditArgs),

    /// Submit a draft to the roster service.
    Push(PushArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(scope = ?cli.scope, "jury CLI starting");

    let result = match &cli.command {
        Commands::Pull(args) => ClientConfig::from_env()
            .map_err(anyhow::Error::from)
            .and_then(|config| run_pull(args, cli.scope.unwrap_or(Scope::Regional), &config)),
        Commands::Show(args) => run_show(args, cli.scope),
        Commands::Edit(args) => run_edit(args, cli.scope),
        Commands::Push(args) => ClientConfig::from_env()
            .map_err(anyhow::Error::from)
            .and_then(|config| run_push(args, cli.scope, &config)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
