//! # External Collaborators
//!
//! Seams to the two services the roster editor talks to: the roster
//! persistence service (load and save a whole roster) and the official
//! directory (who may be seated). Both are object-safe and `Send + Sync`
//! so a live client or an in-memory stand-in can be selected at runtime.
//!
//! The in-memory implementations emulate the backend closely enough for
//! tests and local development: saving drops erased rows, assigns ids to
//! new rows, and refreshes each row's original snapshot.

use std::collections::HashMap;

use parking_lot::Mutex;
use thiserror::Error;

use jury_core::{EventId, Official, PositionId, Scope};

use crate::position::Position;

/// Failure reported by an external collaborator. The reason is passed
/// through to the operator without interpretation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no roster stored for {event_id}")]
    NotFound { event_id: EventId },

    #[error("service unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("rejected by service: {reason}")]
    Rejected { reason: String },
}

/// The roster persistence service.
pub trait RosterStore: Send + Sync {
    /// Load every position of the event, each with its original snapshot.
    fn load_roster(&self, event_id: &EventId) -> Result<Vec<Position>, StoreError>;

    /// Persist the full list of positions as the desired end state.
    fn save_roster(&self, event_id: &EventId, positions: &[Position]) -> Result<(), StoreError>;

    /// Human-readable name of the implementation, for logs.
    fn store_name(&self) -> &str;
}

/// The official directory.
pub trait OfficialDirectory: Send + Sync {
    /// Officials eligible for assignment by the `scope` operator for the event.
    fn list_officials(&self, scope: Scope, event_id: &EventId) -> Result<Vec<Official>, StoreError>;
}

// ─── In-memory store ─────────────────────────────────────────────────

/// Roster store backed by a map, with injectable save failures.
#[derive(Debug, Default)]
pub struct InMemoryRosterStore {
    rosters: Mutex<HashMap<EventId, Vec<Position>>>,
    fail_next_save: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl InMemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the stored roster of an event, exactly as given.
    pub fn insert(&self, event_id: EventId, positions: Vec<Position>) {
        self.rosters.lock().insert(event_id, positions);
    }

    /// Make the next `save_roster` call fail with `reason`.
    pub fn fail_next_save(&self, reason: impl Into<String>) {
        *self.fail_next_save.lock() = Some(reason.into());
    }

    /// Number of saves that reached the store (successful or not).
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }

    /// The stored roster of an event.
    pub fn stored(&self, event_id: &EventId) -> Option<Vec<Position>> {
        self.rosters.lock().get(event_id).cloned()
    }
}

impl RosterStore for InMemoryRosterStore {
    fn load_roster(&self, event_id: &EventId) -> Result<Vec<Position>, StoreError> {
        self.rosters
            .lock()
            .get(event_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                event_id: event_id.clone(),
            })
    }

    fn save_roster(&self, event_id: &EventId, positions: &[Position]) -> Result<(), StoreError> {
        *self.saves.lock() += 1;
        if let Some(reason) = self.fail_next_save.lock().take() {
            return Err(StoreError::Rejected { reason });
        }

        let persisted = positions
            .iter()
            .filter(|p| !p.is_erased())
            .cloned()
            .map(|mut p| {
                p.id.get_or_insert_with(PositionId::generate);
                p.original_snapshot = Some(p.snapshot());
                p
            })
            .collect();
        self.rosters.lock().insert(event_id.clone(), persisted);
        Ok(())
    }

    fn store_name(&self) -> &str {
        "InMemoryRosterStore"
    }
}

// ─── Static directory ────────────────────────────────────────────────

/// Official directory serving fixed lists per scope.
#[derive(Debug, Clone, Default)]
pub struct StaticOfficialDirectory {
    regional: Vec<Official>,
    national: Vec<Official>,
    unavailable: bool,
}

impl StaticOfficialDirectory {
    pub fn new(regional: Vec<Official>, national: Vec<Official>) -> Self {
        Self {
            regional,
            national,
            unavailable: false,
        }
    }

    /// A directory whose every call fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

impl OfficialDirectory for StaticOfficialDirectory {
    fn list_officials(&self, scope: Scope, _event_id: &EventId) -> Result<Vec<Official>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable {
                reason: "official directory offline".to_string(),
            });
        }
        Ok(match scope {
            Scope::Regional => self.regional.clone(),
            Scope::National => self.national.clone(),
        })
    }
}
