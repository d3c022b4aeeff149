//! # Pull Subcommand
//!
//! Fetches an event's positions and the officials eligible for the
//! operator's scope, and writes them as a fresh draft whose baseline equals
//! its positions.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use jury_client::{ClientConfig, JuryClient};
use jury_core::{EventId, Scope};
use jury_roster::{LoadError, Roster, RosterSession};

use crate::draft::{render_draft, write_draft};

/// Arguments for the `jury pull` subcommand.
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Event whose roster to fetch.
    #[arg(long)]
    pub event: String,

    /// Draft file to write. Prints to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Load positions and officials concurrently and build a session.
pub async fn load_session(
    client: &JuryClient,
    scope: Scope,
    event_id: EventId,
) -> Result<RosterSession, LoadError> {
    let (positions, officials) = tokio::join!(
        client.load_roster(&event_id),
        client.list_officials(scope, &event_id)
    );
    let positions = positions.map_err(|e| LoadError::Positions {
        event_id: event_id.clone(),
        source: e.into(),
    })?;
    let officials = officials.map_err(|e| LoadError::Officials {
        event_id: event_id.clone(),
        source: e.into(),
    })?;

    tracing::info!(
        event_id = %event_id,
        scope = %scope,
        positions = positions.len(),
        officials = officials.len(),
        "roster pulled"
    );
    Ok(RosterSession::new(
        scope,
        Roster::from_positions(event_id, positions),
        officials,
    ))
}

/// Run the pull subcommand.
pub fn run_pull(args: &PullArgs, scope: Scope, config: &ClientConfig) -> Result<u8> {
    let event_id = EventId::new(args.event.as_str())?;
    let client = JuryClient::new(config.clone())?;

    let loaded = crate::runtime()?.block_on(load_session(&client, scope, event_id));
    let session = match loaded {
        Ok(session) => session,
        Err(err) => {
            eprintln!("FAILED: {err}");
            return Ok(1);
        }
    };
    let draft = session.to_draft();

    match &args.output {
        Some(path) => {
            write_draft(path, &draft)?;
            println!(
                "OK: pulled {} position(s) and {} official(s) into {}",
                draft.positions.len(),
                draft.officials.len(),
                path.display()
            );
        }
        None => print!("{}", render_draft(&draft)?),
    }
    Ok(0)
}
