//! # jury-cli -- Jury Roster Command-Line Interface
//!
//! Provides the `jury` command. The operator works on a local draft file
//! holding the positions as last persisted (the baseline), the positions
//! as edited, and the officials offered for assignment.
//!
//! ## Subcommands
//!
//! - `jury pull`: Fetch an event's roster and officials into a draft.
//! - `jury show`: Print the draft with validation errors and submit status,
//!   and with `--eligible IDX` the officials a position can be given.
//! - `jury edit`: Apply operator actions to the draft.
//! - `jury push`: Submit the draft through the submission gate.
//!
//! The draft records the scope it was pulled under; later commands run
//! under that scope and reject a conflicting `--scope`.
//!
//! ```bash
//! jury --scope national pull --event cup-2026-final -o final.json
//! jury show final.json --eligible 2
//! jury edit final.json --op toggle-scope=2 --op assign=2:off-7
//! jury push final.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Editing rules live in `jury-roster`; handlers only forward to a `RosterSession`.
//! - Handlers return the process exit code; `Err` is reserved for I/O,
//!   configuration and transport failures.

pub mod draft;
pub mod edit;
pub mod pull;
pub mod push;
pub mod show;

use anyhow::{Context, Result};

/// Single-threaded runtime for the HTTP calls of one command.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}
