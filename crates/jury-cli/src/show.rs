//! # Show Subcommand
//!
//! Prints a draft as the operator's scope sees it: one line per position,
//! the field errors under each row, roster-level errors and the state of
//! the submission gate. With `--eligible IDX` it also lists the officials
//! that may be assigned to that position.

use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use jury_core::Scope;
use jury_roster::{RosterSession, SubmitBlocked};

use crate::draft::open_session;

/// Arguments for the `jury show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Draft file to display.
    pub file: PathBuf,

    /// List the officials eligible for the position at this index.
    #[arg(long, value_name = "IDX")]
    pub eligible: Option<usize>,
}

/// Text rendering of a session.
pub struct RosterView<'a>(pub &'a RosterSession);

impl fmt::Display for RosterView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        let policy = session.policy();
        let report = session.report();

        writeln!(
            f,
            "Roster {} ({} view, {} position(s){})",
            session.roster().event_id(),
            session.scope(),
            session.positions().len(),
            if session.is_dirty() { ", modified" } else { "" },
        )?;
        writeln!(f, "{:>3}  {:<20} {:<9} {:<28} FLAGS", "#", "ROLE", "SCOPE", "ASSIGNEE")?;

        for (index, p) in session.positions().iter().enumerate() {
            let scope = if p.is_national {
                Scope::National
            } else {
                Scope::Regional
            };
            let assignee = match &p.assignee_id {
                Some(id) => format!("{} ({})", p.assignee_name, id.as_str()),
                None if p.assignee_name.is_empty() => "-".to_string(),
                None => p.assignee_name.clone(),
            };
            let mut flags = Vec::new();
            if p.is_referee {
                flags.push("referee");
            }
            if p.is_erased() {
                flags.push("erase");
            }
            if !policy.can_edit_assignee(p) {
                flags.push("assignee-locked");
            }
            if !policy.can_rename_role(p) {
                flags.push("role-locked");
            }
            writeln!(
                f,
                "{index:>3}  {:<20} {:<9} {:<28} {}",
                p.role,
                scope.to_string(),
                assignee,
                flags.join(",")
            )?;

            if let Some(errors) = report.row(index) {
                for (field, error) in errors {
                    writeln!(f, "       ! {}: {error}", field.as_str())?;
                }
            }
        }

        for error in report.roster_errors() {
            writeln!(f, "! {error}")?;
        }

        match session.submit_blocked() {
            None => write!(f, "Submit: ready"),
            Some(SubmitBlocked::Unchanged) => write!(f, "Submit: nothing to submit"),
            Some(blocked) => write!(f, "Submit: blocked ({blocked})"),
        }
    }
}

/// Officials offered for one position.
pub struct EligibleView<'a> {
    pub session: &'a RosterSession,
    pub index: usize,
}

impl fmt::Display for EligibleView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let eligible = self.session.eligible_officials(self.index);
        write!(f, "Eligible for position {}:", self.index)?;
        if eligible.is_empty() {
            return write!(f, " none");
        }
        for official in eligible {
            write!(f, "\n  {:<12} {}", official.id.as_str(), official.display_name)?;
        }
        Ok(())
    }
}

/// Whether submit is held back by errors, as opposed to having nothing to send.
pub fn blocked_by_errors(session: &RosterSession) -> bool {
    matches!(
        session.submit_blocked(),
        Some(SubmitBlocked::ValidationFailed { .. } | SubmitBlocked::InvariantViolated(_))
    )
}

/// Run the show subcommand.
pub fn run_show(args: &ShowArgs, scope: Option<Scope>) -> Result<u8> {
    let session = open_session(&args.file, scope)?;
    println!("{}", RosterView(&session));
    if let Some(index) = args.eligible {
        if index >= session.positions().len() {
            bail!(
                "position index {index} out of range (roster has {})",
                session.positions().len()
            );
        }
        println!("{}", EligibleView { session: &session, index });
    }
    Ok(u8::from(blocked_by_errors(&session)))
}
