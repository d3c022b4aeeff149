//! # Roster Validation
//!
//! Pure mapping from a roster and the operator's policy to the field and
//! roster-level errors that block submission. Recomputed after every
//! accepted mutation.
//!
//! Duplicate assignees are not reported here. They are prevented by
//! offering only eligible officials and rejected by
//! [`Roster::check_invariants`] at submission.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::policy::ScopePolicy;
use crate::roster::Roster;

/// Editable field of a position row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Role,
    AssigneeName,
}

impl Field {
    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::AssigneeName => "assigneeName",
        }
    }
}

/// Error attached to one field of one row.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldError {
    #[error("Role is required")]
    RoleRequired,
    #[error("An assignee is required")]
    AssigneeRequired,
}

/// Error concerning the roster as a whole.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RosterLevelError {
    #[error("At least one referee position is required")]
    RefereeRequired,
}

/// Errors of a roster, keyed by row index and field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    rows: BTreeMap<usize, BTreeMap<Field, FieldError>>,
    roster: Vec<RosterLevelError>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.rows.is_empty() && self.roster.is_empty()
    }

    /// Total number of field and roster-level errors.
    pub fn error_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum::<usize>() + self.roster.len()
    }

    pub fn row(&self, index: usize) -> Option<&BTreeMap<Field, FieldError>> {
        self.rows.get(&index)
    }

    pub fn field(&self, index: usize, field: Field) -> Option<FieldError> {
        self.rows.get(&index).and_then(|r| r.get(&field)).copied()
    }

    pub fn roster_errors(&self) -> &[RosterLevelError] {
        &self.roster
    }

    /// Rows with at least one error, in roster order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &BTreeMap<Field, FieldError>)> {
        self.rows.iter().map(|(i, errs)| (*i, errs))
    }

    fn push(&mut self, index: usize, field: Field, error: FieldError) {
        self.rows.entry(index).or_default().insert(field, error);
    }
}

/// Validate every row of `roster` under `policy`.
pub fn validate(roster: &Roster, policy: &dyn ScopePolicy) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (index, position) in roster.positions().iter().enumerate() {
        // Applies to erased rows too.
        if position.role.trim().is_empty() {
            report.push(index, Field::Role, FieldError::RoleRequired);
        }
        if policy.name_required(position) && position.assignee_name.trim().is_empty() {
            report.push(index, Field::AssigneeName, FieldError::AssigneeRequired);
        }
    }

    let referees = roster.positions().iter().filter(|p| p.is_referee).count();
    if roster.is_empty() || referees != 1 {
        report.roster.push(RosterLevelError::RefereeRequired);
    }

    report
}

// ─── Tests ───────────────────────────────────────────────────────────
