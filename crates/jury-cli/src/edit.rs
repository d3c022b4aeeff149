//! # Edit Subcommand
//!
//! Applies operator actions to a draft, in order, under the operator's
//! scope. The first rejected action aborts the command and the draft file
//! is left as it was.
//!
//! ## Operations
//!
//! | Syntax | Action |
//! |--------|--------|
//! | `add` / `add=ROLE` | append a position (regional operator only) |
//! | `toggle-scope=IDX` | move a position between regional and national |
//! | `toggle-erase=IDX` | mark or unmark a position for erase |
//! | `rename=IDX:ROLE` | change a position's role |
//! | `assign=IDX:OFFICIAL_ID` | seat an official eligible for the position |
//! | `unassign=IDX` | clear the assignee |
//!
//! `assign` only accepts officials from the draft's directory listing that
//! are not seated elsewhere; `jury show --eligible IDX` prints them.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Args;

use jury_core::{JuryError, Official, OfficialId, Scope};
use jury_roster::{PositionDefaults, RosterSession};

use crate::draft::{open_session, write_draft};

/// Arguments for the `jury edit` subcommand.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Draft file to edit in place.
    pub file: PathBuf,

    /// Operation to apply. Repeat to apply several in order.
    #[arg(long = "op", required = true)]
    pub ops: Vec<EditOp>,
}

/// One operator action on the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Add { role: Option<String> },
    ToggleScope { index: usize },
    ToggleErase { index: usize },
    Rename { index: usize, role: String },
    Assign { index: usize, official: OfficialId },
    Unassign { index: usize },
}

impl FromStr for EditOp {
    type Err = JuryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once('=') {
            Some((name, arg)) => (name.trim(), Some(arg)),
            None => (s.trim(), None),
        };

        match (name, arg) {
            ("add", None) => Ok(Self::Add { role: None }),
            ("add", Some(role)) => Ok(Self::Add {
                role: Some(role.to_string()),
            }),
            ("toggle-scope", Some(arg)) => Ok(Self::ToggleScope {
                index: parse_index(arg)?,
            }),
            ("toggle-erase", Some(arg)) => Ok(Self::ToggleErase {
                index: parse_index(arg)?,
            }),
            ("unassign", Some(arg)) => Ok(Self::Unassign {
                index: parse_index(arg)?,
            }),
            ("rename", Some(arg)) => {
                let (index, role) = arg.split_once(':').ok_or_else(|| {
                    JuryError::Parse(format!("rename expects IDX:ROLE, got '{arg}'"))
                })?;
                Ok(Self::Rename {
                    index: parse_index(index)?,
                    role: role.to_string(),
                })
            }
            ("assign", Some(arg)) => match arg.split_once(':') {
                Some((index, id)) if !id.trim().is_empty() => Ok(Self::Assign {
                    index: parse_index(index)?,
                    official: OfficialId::new(id.trim()),
                }),
                _ => Err(JuryError::Parse(format!(
                    "assign expects IDX:OFFICIAL_ID, got '{arg}'"
                ))),
            },
            ("toggle-scope" | "toggle-erase" | "unassign" | "rename" | "assign", None) => Err(
                JuryError::Parse(format!("operation '{name}' needs an argument")),
            ),
            _ => Err(JuryError::Parse(format!("unknown operation '{s}'"))),
        }
    }
}

fn parse_index(raw: &str) -> Result<usize, JuryError> {
    raw.trim()
        .parse()
        .map_err(|_| JuryError::Parse(format!("invalid position index '{raw}'")))
}

/// Apply `ops` to the session in order, stopping at the first rejection.
///
/// Returns one line of description per applied operation.
pub fn apply_ops(session: &mut RosterSession, ops: &[EditOp]) -> Result<Vec<String>, JuryError> {
    let mut applied = Vec::with_capacity(ops.len());
    for op in ops {
        let line = match op {
            EditOp::Add { role } => {
                let defaults = role
                    .as_deref()
                    .map(PositionDefaults::with_role)
                    .unwrap_or_default();
                let index = session.add_position(defaults)?;
                format!("added position {index}")
            }
            EditOp::ToggleScope { index } => {
                session.toggle_scope(*index)?;
                let now = if session.positions()[*index].is_national {
                    Scope::National
                } else {
                    Scope::Regional
                };
                format!("position {index} is now {now}")
            }
            EditOp::ToggleErase { index } => {
                session.toggle_erase(*index)?;
                format!("position {index}: {}", session.positions()[*index].erase)
            }
            EditOp::Rename { index, role } => {
                session.rename_role(*index, role.clone())?;
                format!("position {index} renamed to '{role}'")
            }
            EditOp::Assign { index, official } => {
                let official = eligible_official(session, *index, official)?;
                session.assign_official(*index, &official)?;
                format!("position {index} assigned to {official}")
            }
            EditOp::Unassign { index } => {
                session.unassign(*index)?;
                format!("position {index} unassigned")
            }
        };
        applied.push(line);
    }
    Ok(applied)
}

/// Find `id` among the officials offered for the position at `index`.
fn eligible_official(
    session: &RosterSession,
    index: usize,
    id: &OfficialId,
) -> Result<Official, JuryError> {
    if let Some(official) = session
        .eligible_officials(index)
        .into_iter()
        .find(|o| o.id == *id)
    {
        return Ok(official.clone());
    }
    let reason = match session.roster().holder_of(id, Some(index)) {
        Some(held_by) => format!("{id} already holds position {held_by}"),
        None => format!("{id} is not in the officials list of this draft"),
    };
    Err(JuryError::Rejected(format!(
        "{reason}; `jury show --eligible {index}` lists who can be assigned"
    )))
}

/// Run the edit subcommand.
pub fn run_edit(args: &EditArgs, scope: Option<Scope>) -> Result<u8> {
    let mut session = open_session(&args.file, scope)?;

    let applied = match apply_ops(&mut session, &args.ops) {
        Ok(applied) => applied,
        Err(err) => {
            eprintln!("REJECTED: {err}");
            eprintln!("Draft not modified: {}", args.file.display());
            return Ok(1);
        }
    };

    write_draft(&args.file, &session.to_draft())?;
    for line in &applied {
        println!("OK: {line}");
    }
    let errors = session.report().error_count();
    if errors > 0 {
        println!("Draft has {errors} validation error(s); run `jury show` for details.");
    }
    Ok(0)
}
