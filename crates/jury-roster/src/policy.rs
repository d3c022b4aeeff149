//! # Scope Policies
//!
//! The rules that differ between the Regional and the National operator.
//! Both bodies see the same roster; each owns the positions whose
//! `is_national` flag matches its own level, and each can only name
//! assignees inside that level.
//!
//! ## Mirror Relationship
//!
//! Every permission predicate is written once, in the default methods of
//! [`ScopePolicy`], against [`ScopePolicy::owns`]. The two policies differ
//! only in which flag value they own, whether they may create positions,
//! and the side effects of crossing the scope boundary
//! ([`ScopePolicy::on_toggle_scope`]).
//!
//! | Predicate            | Regional                               | National                              |
//! |----------------------|----------------------------------------|---------------------------------------|
//! | `name_required`      | `!is_national && !erase`               | `is_national && !erase`               |
//! | `can_toggle_scope`   | `(can_edit \|\| !is_national) && !erase` | `(can_edit \|\| is_national) && !erase` |
//! | `can_toggle_erase`   | `!is_referee && (can_edit \|\| !is_national)` | `!is_referee && (can_edit \|\| is_national)` |
//! | `can_edit_assignee`  | `!is_national && !erase && can_edit`   | `is_national && !erase && can_edit`   |
//! | `can_rename_role`    | `!is_referee && (can_edit \|\| !is_national)` | `!is_referee && (can_edit \|\| is_national)` |

use jury_core::Scope;

use crate::position::Position;

/// Rule set of one operating scope.
///
/// Implementations are stateless and object-safe so a session can hold
/// `&'static dyn ScopePolicy` selected at runtime from a [`Scope`].
pub trait ScopePolicy: Send + Sync + std::fmt::Debug {
    /// The governing body this policy speaks for.
    fn scope(&self) -> Scope;

    /// Whether the operator may append new positions.
    fn can_add_positions(&self) -> bool;

    /// Flip `is_national` and apply the assignee side effects of the crossing.
    fn on_toggle_scope(&self, position: &Position) -> Position;

    /// Whether the position sits in this operator's own scope.
    fn owns(&self, position: &Position) -> bool {
        position.is_national == self.scope().owned_flag()
    }

    /// Whether `assignee_name` must be non-empty.
    fn name_required(&self, position: &Position) -> bool {
        self.owns(position) && !position.is_erased()
    }

    fn can_toggle_scope(&self, position: &Position) -> bool {
        (position.can_edit || self.owns(position)) && !position.is_erased()
    }

    fn can_toggle_erase(&self, position: &Position) -> bool {
        !position.is_referee && (position.can_edit || self.owns(position))
    }

    fn can_edit_assignee(&self, position: &Position) -> bool {
        self.owns(position) && !position.is_erased() && position.can_edit
    }

    /// The role stays locked while the position is outside this scope and
    /// not editable. The referee role is always locked.
    fn can_rename_role(&self, position: &Position) -> bool {
        !position.is_referee && (position.can_edit || self.owns(position))
    }
}

/// Rules of the regional (autonomic) governing body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionalPolicy;

/// Rules of the national governing body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NationalPolicy;

impl ScopePolicy for RegionalPolicy {
    fn scope(&self) -> Scope {
        Scope::Regional
    }

    fn can_add_positions(&self) -> bool {
        true
    }

    fn on_toggle_scope(&self, position: &Position) -> Position {
        let mut next = position.clone();
        next.is_national = !position.is_national;

        if position.is_national {
            // Claiming back as local: bring back the loaded assignee if there was one.
            if let Some(snapshot) = position
                .original_snapshot
                .as_ref()
                .filter(|s| s.carries_assignee())
            {
                next.restore_assignee(snapshot);
            }
        } else {
            // Requesting national designation: the national body names the assignee.
            next.clear_assignee();
        }
        next
    }
}

impl ScopePolicy for NationalPolicy {
    fn scope(&self) -> Scope {
        Scope::National
    }

    fn can_add_positions(&self) -> bool {
        false
    }

    fn on_toggle_scope(&self, position: &Position) -> Position {
        let mut next = position.clone();
        next.is_national = !position.is_national;

        if position.is_national {
            // Returning to regional control: the regional replacement is unknown here.
            next.clear_assignee();
            return next;
        }

        let baseline = position.original_snapshot.clone().unwrap_or_default();
        let unchanged = baseline.assignee_id == position.assignee_id
            && baseline.assignee_name == position.assignee_name;

        // An unchanged assignment is being re-confirmed and stays as loaded.
        if !unchanged {
            if !baseline.is_national {
                next.clear_assignee();
            } else if baseline.carries_assignee() {
                next.restore_assignee(&baseline);
            }
        }
        next
    }
}

/// The policy of a scope.
pub fn policy_for(scope: Scope) -> &'static dyn ScopePolicy {
    match scope {
        Scope::Regional => &RegionalPolicy,
        Scope::National => &NationalPolicy,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
