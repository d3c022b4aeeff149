//! # Push Subcommand
//!
//! Submits a draft through the submission gate. The draft file is only
//! rewritten after the service accepted the batch, with the submitted
//! positions as its new baseline.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use jury_client::{ClientConfig, JuryClient};
use jury_core::Scope;
use jury_roster::StoreError;

use crate::draft::{open_session, write_draft};

/// Arguments for the `jury push` subcommand.
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Draft file to submit.
    pub file: PathBuf,
}

/// Run the push subcommand.
pub fn run_push(args: &PushArgs, scope: Option<Scope>, config: &ClientConfig) -> Result<u8> {
    let mut session = open_session(&args.file, scope)?;

    let batch = match session.begin_submission() {
        Ok(batch) => batch,
        Err(err) => {
            eprintln!("NOT SUBMITTED: {err}");
            return Ok(1);
        }
    };

    let client = JuryClient::new(config.clone())?;
    let outcome = crate::runtime()?
        .block_on(client.save_roster(&batch))
        .map_err(StoreError::from);

    match session.complete_submission(outcome) {
        Ok(receipt) => {
            write_draft(&args.file, &session.to_draft())?;
            println!(
                "OK: submitted {} position(s) for {} at {}",
                receipt.positions,
                receipt.event_id.as_str(),
                receipt.submitted_at.to_rfc3339()
            );
            Ok(0)
        }
        Err(err) => {
            eprintln!("FAILED: {err}");
            eprintln!("Draft not modified: {}", args.file.display());
            Ok(1)
        }
    }
}
