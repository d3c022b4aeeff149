//! # Roster Editing Session
//!
//! One operator editing one event's roster. The session owns the working
//! roster, the last persisted baseline, the officials offered for
//! assignment, the validation report and the in-flight flag, and acts as
//! the submission gate.
//!
//! ## Submission Gate
//!
//! ```text
//!            mutate ──▶ validate ──▶ report
//!                                       │
//!   submit_blocked(): InFlight │ ValidationFailed │ InvariantViolated │ Unchanged
//!                                       │ none
//!                                       ▼
//!   begin_submission() ──▶ [in flight: mutations refused] ──▶ complete_submission()
//!                                                               │ Ok  → baseline := positions
//!                                                               │ Err → nothing changes
//! ```
//!
//! The batch sent to the persistence service is the full list of positions,
//! erased rows included. No client-side diff is computed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use jury_core::{EventId, JuryError, Official, Scope};

use crate::policy::{policy_for, ScopePolicy};
use crate::position::{Position, PositionDefaults};
use crate::roster::{InvariantViolation, Roster, RosterError};
use crate::store::{OfficialDirectory, RosterStore, StoreError};
use crate::validation::{validate, ValidationReport};

// ─── Errors ──────────────────────────────────────────────────────────

/// Why submit is currently disabled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    #[error("a submission is already in flight")]
    InFlight,

    #[error("roster has {errors} validation error(s)")]
    ValidationFailed { errors: usize },

    #[error("roster invariant violated: {0}")]
    InvariantViolated(InvariantViolation),

    #[error("roster is unchanged since it was last saved")]
    Unchanged,
}

/// A mutation was refused by the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("roster is locked while a submission is in flight")]
    SubmissionInFlight,

    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Submission could not start or the persistence service refused it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("submit blocked: {0}")]
    Blocked(SubmitBlocked),

    #[error("no submission is in flight")]
    NotInFlight,

    #[error("saving roster of {event_id} failed: {reason}")]
    Persistence { event_id: EventId, reason: String },
}

/// Initial load failed; no session was built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("loading positions of {event_id} failed: {source}")]
    Positions {
        event_id: EventId,
        source: StoreError,
    },

    #[error("loading officials for {event_id} failed: {source}")]
    Officials {
        event_id: EventId,
        source: StoreError,
    },
}

impl From<SessionError> for JuryError {
    fn from(err: SessionError) -> Self {
        JuryError::Rejected(err.to_string())
    }
}

impl From<SubmitError> for JuryError {
    fn from(err: SubmitError) -> Self {
        JuryError::Submission(err.to_string())
    }
}

impl From<LoadError> for JuryError {
    fn from(err: LoadError) -> Self {
        JuryError::Load(err.to_string())
    }
}

// ─── Payloads ────────────────────────────────────────────────────────

/// What is sent to the persistence service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionBatch {
    pub event_id: EventId,
    pub positions: Vec<Position>,
}

/// Record of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub event_id: EventId,
    pub positions: usize,
    pub submitted_at: DateTime<Utc>,
}

/// Serializable working copy of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterDraft {
    pub event_id: EventId,
    /// Scope the roster and officials were loaded under.
    pub scope: Scope,
    /// Positions as last loaded or persisted.
    pub baseline: Vec<Position>,
    /// Positions as currently edited.
    pub positions: Vec<Position>,
    #[serde(default)]
    pub officials: Vec<Official>,
}

// ─── Session ─────────────────────────────────────────────────────────

/// An operator's editing session over one roster.
#[derive(Debug, Clone)]
pub struct RosterSession {
    scope: Scope,
    roster: Roster,
    baseline: Vec<Position>,
    officials: Vec<Official>,
    report: ValidationReport,
    in_flight: bool,
}

impl RosterSession {
    /// Start a session on a roster; its current positions become the baseline.
    pub fn new(scope: Scope, roster: Roster, officials: Vec<Official>) -> Self {
        let report = validate(&roster, policy_for(scope));
        Self {
            scope,
            baseline: roster.positions().to_vec(),
            roster,
            officials,
            report,
            in_flight: false,
        }
    }

    /// Fetch the roster and the eligible officials, then start a session.
    pub fn load(
        scope: Scope,
        event_id: EventId,
        store: &dyn RosterStore,
        directory: &dyn OfficialDirectory,
    ) -> Result<Self, LoadError> {
        let positions = store
            .load_roster(&event_id)
            .map_err(|source| LoadError::Positions {
                event_id: event_id.clone(),
                source,
            })?;
        let officials = directory
            .list_officials(scope, &event_id)
            .map_err(|source| LoadError::Officials {
                event_id: event_id.clone(),
                source,
            })?;

        tracing::info!(
            event_id = %event_id,
            scope = %scope,
            store = store.store_name(),
            positions = positions.len(),
            officials = officials.len(),
            "roster loaded"
        );
        Ok(Self::new(
            scope,
            Roster::from_positions(event_id, positions),
            officials,
        ))
    }

    /// Resume a session from a draft, under the scope it was loaded with.
    pub fn from_draft(draft: RosterDraft) -> Self {
        let roster = Roster::from_positions(draft.event_id, draft.positions);
        let report = validate(&roster, policy_for(draft.scope));
        Self {
            scope: draft.scope,
            roster,
            baseline: draft.baseline,
            officials: draft.officials,
            report,
            in_flight: false,
        }
    }

    pub fn to_draft(&self) -> RosterDraft {
        RosterDraft {
            event_id: self.roster.event_id().clone(),
            scope: self.scope,
            baseline: self.baseline.clone(),
            positions: self.roster.positions().to_vec(),
            officials: self.officials.clone(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn policy(&self) -> &'static dyn ScopePolicy {
        policy_for(self.scope)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn positions(&self) -> &[Position] {
        self.roster.positions()
    }

    pub fn baseline(&self) -> &[Position] {
        &self.baseline
    }

    pub fn officials(&self) -> &[Official] {
        &self.officials
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether the positions differ from the last persisted baseline.
    pub fn is_dirty(&self) -> bool {
        self.roster.positions() != self.baseline.as_slice()
    }

    /// Officials that may be offered for the position at `index`.
    pub fn eligible_officials(&self, index: usize) -> Vec<&Official> {
        self.roster.eligible_officials(index, &self.officials)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append a new position. Only the regional operator may do this.
    pub fn add_position(&mut self, defaults: PositionDefaults) -> Result<usize, SessionError> {
        self.mutate("add_position", None, |roster, policy| {
            roster.add_position(policy, defaults)
        })
    }

    pub fn toggle_scope(&mut self, index: usize) -> Result<(), SessionError> {
        self.mutate("toggle_scope", Some(index), |roster, policy| {
            roster.toggle_scope(policy, index)
        })
    }

    pub fn toggle_erase(&mut self, index: usize) -> Result<(), SessionError> {
        self.mutate("toggle_erase", Some(index), |roster, policy| {
            roster.toggle_erase(policy, index)
        })
    }

    pub fn rename_role(&mut self, index: usize, role: impl Into<String>) -> Result<(), SessionError> {
        let role = role.into();
        self.mutate("rename_role", Some(index), |roster, policy| {
            roster.rename_role(policy, index, role)
        })
    }

    pub fn assign_official(&mut self, index: usize, official: &Official) -> Result<(), SessionError> {
        self.mutate("assign_official", Some(index), |roster, policy| {
            roster.assign_official(policy, index, official)
        })
    }

    pub fn unassign(&mut self, index: usize) -> Result<(), SessionError> {
        self.mutate("unassign", Some(index), |roster, policy| {
            roster.unassign(policy, index)
        })
    }

    fn mutate<T, F>(&mut self, op: &'static str, index: Option<usize>, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut Roster, &dyn ScopePolicy) -> Result<T, RosterError>,
    {
        if self.in_flight {
            tracing::warn!(op, ?index, "mutation refused while submission in flight");
            return Err(SessionError::SubmissionInFlight);
        }
        let policy = self.policy();
        match f(&mut self.roster, policy) {
            Ok(out) => {
                self.report = validate(&self.roster, policy);
                tracing::debug!(
                    op,
                    ?index,
                    scope = %self.scope,
                    errors = self.report.error_count(),
                    dirty = self.is_dirty(),
                    "roster mutated"
                );
                Ok(out)
            }
            Err(err) => {
                tracing::warn!(op, ?index, scope = %self.scope, error = %err, "roster operation rejected");
                Err(err.into())
            }
        }
    }

    // ── Submission ───────────────────────────────────────────────────

    /// The reason submit is disabled, if it is.
    pub fn submit_blocked(&self) -> Option<SubmitBlocked> {
        if self.in_flight {
            return Some(SubmitBlocked::InFlight);
        }
        if !self.report.is_clean() {
            return Some(SubmitBlocked::ValidationFailed {
                errors: self.report.error_count(),
            });
        }
        if let Err(violation) = self.roster.check_invariants() {
            return Some(SubmitBlocked::InvariantViolated(violation));
        }
        if !self.is_dirty() {
            return Some(SubmitBlocked::Unchanged);
        }
        None
    }

    pub fn can_submit(&self) -> bool {
        self.submit_blocked().is_none()
    }

    /// Lock the session and hand out the batch to persist.
    pub fn begin_submission(&mut self) -> Result<SubmissionBatch, SubmitError> {
        if let Some(blocked) = self.submit_blocked() {
            tracing::warn!(event_id = %self.roster.event_id(), reason = %blocked, "submit blocked");
            return Err(SubmitError::Blocked(blocked));
        }
        self.in_flight = true;
        Ok(SubmissionBatch {
            event_id: self.roster.event_id().clone(),
            positions: self.roster.positions().to_vec(),
        })
    }

    /// Unlock the session with the persistence outcome.
    ///
    /// On success the submitted positions become the new baseline. On
    /// failure positions and baseline are left as they were, so the same
    /// batch can be submitted again.
    pub fn complete_submission(
        &mut self,
        outcome: Result<(), StoreError>,
    ) -> Result<SubmissionReceipt, SubmitError> {
        if !self.in_flight {
            return Err(SubmitError::NotInFlight);
        }
        self.in_flight = false;
        let event_id = self.roster.event_id().clone();

        match outcome {
            Ok(()) => {
                self.baseline = self.roster.positions().to_vec();
                let receipt = SubmissionReceipt {
                    event_id,
                    positions: self.baseline.len(),
                    submitted_at: Utc::now(),
                };
                tracing::info!(event_id = %receipt.event_id, positions = receipt.positions, "roster submitted");
                Ok(receipt)
            }
            Err(err) => {
                tracing::warn!(event_id = %event_id, error = %err, "roster submission failed");
                Err(SubmitError::Persistence {
                    event_id,
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Run both submission phases against a synchronous store.
    pub fn submit(&mut self, store: &dyn RosterStore) -> Result<SubmissionReceipt, SubmitError> {
        let batch = self.begin_submission()?;
        let outcome = store.save_roster(&batch.event_id, &batch.positions);
        self.complete_submission(outcome)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
