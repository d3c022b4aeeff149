//! # Roster
//!
//! The ordered list of positions for one event, with the operations an
//! operator performs on it. Every operation is checked against the
//! operator's [`ScopePolicy`] first; a rejected operation returns an error
//! and leaves the roster exactly as it was.
//!
//! ## Structural Invariants
//!
//! 1. Exactly one position is the referee.
//! 2. The referee is never marked for erase.
//! 3. The roster is never empty.
//! 4. No two non-erased positions share an assignee.
//!
//! Invariants 1–3 are kept by construction: the referee flag is never
//! toggled and the referee cannot be erased. Invariant 4 is kept by
//! offering only [`Roster::eligible_officials`] for selection, by rejecting
//! duplicate assignments and un-erasing a row whose official has been
//! seated elsewhere, and by dropping a snapshot assignee restored on a
//! scope toggle when that official already holds another row.
//! [`Roster::check_invariants`] re-checks all four for rosters that arrive
//! from outside.

use thiserror::Error;

use jury_core::{EventId, JuryError, Official, OfficialId, Scope};

use crate::policy::ScopePolicy;
use crate::position::{Position, PositionDefaults};

// ─── Actions ─────────────────────────────────────────────────────────

/// Operator actions that are gated per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterAction {
    ToggleScope,
    ToggleErase,
    RenameRole,
    AssignOfficial,
    Unassign,
}

impl std::fmt::Display for RosterAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ToggleScope => "TOGGLE_SCOPE",
            Self::ToggleErase => "TOGGLE_ERASE",
            Self::RenameRole => "RENAME_ROLE",
            Self::AssignOfficial => "ASSIGN_OFFICIAL",
            Self::Unassign => "UNASSIGN",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// A roster operation was rejected. The roster is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("position {index} does not exist (roster has {len} positions)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{action} is not permitted for the {scope} operator on position {index}")]
    NotPermitted {
        action: RosterAction,
        scope: Scope,
        index: usize,
    },

    #[error("the referee role of position {index} is fixed")]
    RefereeRoleFixed { index: usize },

    #[error("{official} is already assigned to position {held_by}")]
    DuplicateAssignee { official: OfficialId, held_by: usize },

    #[error("the {scope} operator cannot add positions")]
    AddNotPermitted { scope: Scope },
}

/// A structural invariant does not hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("roster has no positions")]
    Empty,

    #[error("roster must have exactly one referee position, found {found}")]
    RefereeCount { found: usize },

    #[error("referee position {index} is marked for erase")]
    RefereeErased { index: usize },

    #[error("{official} is assigned to both position {first} and position {second}")]
    DuplicateAssignee {
        official: OfficialId,
        first: usize,
        second: usize,
    },
}

impl From<RosterError> for JuryError {
    fn from(err: RosterError) -> Self {
        JuryError::Rejected(err.to_string())
    }
}

impl From<InvariantViolation> for JuryError {
    fn from(err: InvariantViolation) -> Self {
        JuryError::Rejected(err.to_string())
    }
}

// ─── Roster ──────────────────────────────────────────────────────────

/// The jury roster of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    event_id: EventId,
    positions: Vec<Position>,
}

impl Roster {
    /// A fresh roster holding only the mandatory referee position.
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            positions: vec![Position::referee()],
        }
    }

    /// Wrap positions as loaded from the persistence service.
    ///
    /// Nothing is rejected here; structural problems surface through
    /// validation and [`Roster::check_invariants`].
    pub fn from_positions(event_id: EventId, positions: Vec<Position>) -> Self {
        Self {
            event_id,
            positions,
        }
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, index: usize) -> Option<&Position> {
        self.positions.get(index)
    }

    /// Index of the first referee position.
    pub fn referee_index(&self) -> Option<usize> {
        self.positions.iter().position(|p| p.is_referee)
    }

    /// Index of the non-erased position holding `official`, skipping `except`.
    pub fn holder_of(&self, official: &OfficialId, except: Option<usize>) -> Option<usize> {
        self.positions
            .iter()
            .enumerate()
            .find(|(i, p)| Some(*i) != except && p.holds(official))
            .map(|(i, _)| i)
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Append a new regional, editable, unassigned position. Returns its index.
    pub fn add_position(
        &mut self,
        policy: &dyn ScopePolicy,
        defaults: PositionDefaults,
    ) -> Result<usize, RosterError> {
        if !policy.can_add_positions() {
            return Err(RosterError::AddNotPermitted {
                scope: policy.scope(),
            });
        }
        self.positions.push(Position::new(defaults));
        Ok(self.positions.len() - 1)
    }

    /// Flip the position between regional and national ownership.
    pub fn toggle_scope(
        &mut self,
        policy: &dyn ScopePolicy,
        index: usize,
    ) -> Result<(), RosterError> {
        let current = self.checked(policy, index, RosterAction::ToggleScope)?;
        let mut next = policy.on_toggle_scope(current);
        if let Some(restored) = next.assignee_id.as_ref() {
            if current.assignee_id.as_ref() != Some(restored)
                && self.holder_of(restored, Some(index)).is_some()
            {
                next.clear_assignee();
            }
        }
        self.positions[index] = next;
        Ok(())
    }

    /// Mark the position for erase, or restore it. Assignee fields are untouched.
    ///
    /// Restoring is rejected while another non-erased position holds the
    /// same official.
    pub fn toggle_erase(
        &mut self,
        policy: &dyn ScopePolicy,
        index: usize,
    ) -> Result<(), RosterError> {
        let position = self.checked(policy, index, RosterAction::ToggleErase)?;
        if position.is_erased() {
            if let Some(official) = position.assignee_id.as_ref() {
                if let Some(held_by) = self.holder_of(official, Some(index)) {
                    return Err(RosterError::DuplicateAssignee {
                        official: official.clone(),
                        held_by,
                    });
                }
            }
        }
        let next = position.erase.toggled();
        self.positions[index].erase = next;
        Ok(())
    }

    pub fn rename_role(
        &mut self,
        policy: &dyn ScopePolicy,
        index: usize,
        role: impl Into<String>,
    ) -> Result<(), RosterError> {
        let position = self.get(index)?;
        if position.is_referee {
            return Err(RosterError::RefereeRoleFixed { index });
        }
        self.checked(policy, index, RosterAction::RenameRole)?;
        self.positions[index].role = role.into();
        Ok(())
    }

    /// Seat `official` on the position.
    ///
    /// Rejected when another non-erased position already holds the
    /// official. Re-assigning the position's own assignee is accepted.
    pub fn assign_official(
        &mut self,
        policy: &dyn ScopePolicy,
        index: usize,
        official: &Official,
    ) -> Result<(), RosterError> {
        self.checked(policy, index, RosterAction::AssignOfficial)?;
        if let Some(held_by) = self.holder_of(&official.id, Some(index)) {
            return Err(RosterError::DuplicateAssignee {
                official: official.id.clone(),
                held_by,
            });
        }
        self.positions[index].assign(official);
        Ok(())
    }

    pub fn unassign(&mut self, policy: &dyn ScopePolicy, index: usize) -> Result<(), RosterError> {
        self.checked(policy, index, RosterAction::Unassign)?;
        self.positions[index].clear_assignee();
        Ok(())
    }

    /// Officials that may be offered for the position: everyone not seated
    /// on another non-erased position, plus the position's own assignee.
    pub fn eligible_officials<'a>(
        &self,
        index: usize,
        officials: &'a [Official],
    ) -> Vec<&'a Official> {
        officials
            .iter()
            .filter(|o| self.holder_of(&o.id, Some(index)).is_none())
            .collect()
    }

    /// Verify the four structural invariants, reporting the first failure.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.positions.is_empty() {
            return Err(InvariantViolation::Empty);
        }

        let referees: Vec<usize> = self
            .positions
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_referee)
            .map(|(i, _)| i)
            .collect();
        if referees.len() != 1 {
            return Err(InvariantViolation::RefereeCount {
                found: referees.len(),
            });
        }
        let referee = referees[0];
        if self.positions[referee].is_erased() {
            return Err(InvariantViolation::RefereeErased { index: referee });
        }

        for (first, position) in self.positions.iter().enumerate() {
            let Some(official) = position.assignee_id.as_ref() else {
                continue;
            };
            if position.is_erased() {
                continue;
            }
            if let Some(second) = self.positions[first + 1..]
                .iter()
                .position(|other| other.holds(official))
            {
                return Err(InvariantViolation::DuplicateAssignee {
                    official: official.clone(),
                    first,
                    second: first + 1 + second,
                });
            }
        }
        Ok(())
    }

    fn get(&self, index: usize) -> Result<&Position, RosterError> {
        self.positions.get(index).ok_or(RosterError::IndexOutOfRange {
            index,
            len: self.positions.len(),
        })
    }

    /// Look up the position and check that `policy` permits `action` on it.
    fn checked(
        &self,
        policy: &dyn ScopePolicy,
        index: usize,
        action: RosterAction,
    ) -> Result<&Position, RosterError> {
        let position = self.get(index)?;
        let permitted = match action {
            RosterAction::ToggleScope => policy.can_toggle_scope(position),
            RosterAction::ToggleErase => !position.is_referee && policy.can_toggle_erase(position),
            RosterAction::RenameRole => policy.can_rename_role(position),
            RosterAction::AssignOfficial | RosterAction::Unassign => {
                policy.can_edit_assignee(position)
            }
        };
        if !permitted {
            return Err(RosterError::NotPermitted {
                action,
                scope: policy.scope(),
                index,
            });
        }
        Ok(position)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
