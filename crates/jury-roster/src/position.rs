//! # Jury Positions
//!
//! One row of the roster: a role, its current assignee, and the flags that
//! decide which governing body owns it and whether it is marked for removal.
//!
//! ## Erase Marking
//!
//! Erasing a position never removes it from the roster. The row stays in
//! place as [`EraseState::MarkedForErase`] until submission so it can be
//! restored, and so the persistence service receives an explicit removal
//! (or return) instruction. On the wire the state is the boolean `erase`.
//!
//! ## Original Snapshot
//!
//! Each loaded position carries the single state it had when it was read
//! from the backend. Scope toggles consult it to bring back an assignee
//! after a round trip. There is no history beyond this one slot.

use serde::{Deserialize, Serialize};

use jury_core::{Official, OfficialId, PositionId};

/// Role label of the mandatory referee position.
pub const REFEREE_ROLE: &str = "Referee";

/// Role given to positions added without an explicit role.
pub const DEFAULT_ROLE: &str = "Auxiliary Judge";

// ─── Erase State ─────────────────────────────────────────────────────

/// Soft-delete marker of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EraseState {
    /// The position is part of the roster.
    #[default]
    Active,
    /// The position will be removed (or returned) when the roster is submitted.
    MarkedForErase,
}

impl EraseState {
    pub fn is_marked(&self) -> bool {
        matches!(self, Self::MarkedForErase)
    }

    /// The opposite marker.
    pub fn toggled(&self) -> EraseState {
        match self {
            Self::Active => Self::MarkedForErase,
            Self::MarkedForErase => Self::Active,
        }
    }
}

impl From<bool> for EraseState {
    fn from(erase: bool) -> Self {
        if erase {
            Self::MarkedForErase
        } else {
            Self::Active
        }
    }
}

impl std::fmt::Display for EraseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::MarkedForErase => write!(f, "MARKED_FOR_ERASE"),
        }
    }
}

/// Serde adapter: `EraseState` travels as the boolean `erase` flag.
mod erase_flag {
    use super::EraseState;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(state: &EraseState, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(state.is_marked())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EraseState, D::Error> {
        bool::deserialize(deserializer).map(EraseState::from)
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────

/// Assignment and scope of a position as last loaded from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSnapshot {
    #[serde(default)]
    pub assignee_id: Option<OfficialId>,
    #[serde(default)]
    pub assignee_name: String,
    #[serde(default)]
    pub is_national: bool,
}

impl PositionSnapshot {
    /// Whether the snapshot remembers a complete assignment (id and name).
    pub fn carries_assignee(&self) -> bool {
        self.assignee_id.is_some() && !self.assignee_name.is_empty()
    }
}

// ─── Position ────────────────────────────────────────────────────────

/// A jury seat on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Backend identifier. `None` until a new position has been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PositionId>,
    pub role: String,
    /// Set at creation for exactly one position. Never toggled by an operator.
    #[serde(default)]
    pub is_referee: bool,
    #[serde(default)]
    pub assignee_id: Option<OfficialId>,
    #[serde(default)]
    pub assignee_name: String,
    /// Which governing body currently owns or claims the position.
    #[serde(default)]
    pub is_national: bool,
    #[serde(default, with = "erase_flag")]
    pub erase: EraseState,
    /// Server-supplied permission for the current operator.
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub original_snapshot: Option<PositionSnapshot>,
}

/// Values used by `add_position` for a freshly created row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionDefaults {
    pub role: String,
}

impl Default for PositionDefaults {
    fn default() -> Self {
        Self {
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

impl PositionDefaults {
    pub fn with_role(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

impl Position {
    /// A new, unpersisted, regional position with no assignee.
    pub fn new(defaults: PositionDefaults) -> Self {
        Self {
            id: None,
            role: defaults.role,
            is_referee: false,
            assignee_id: None,
            assignee_name: String::new(),
            is_national: false,
            erase: EraseState::Active,
            can_edit: true,
            original_snapshot: None,
        }
    }

    /// The mandatory referee position of a fresh roster.
    pub fn referee() -> Self {
        Self {
            is_referee: true,
            ..Self::new(PositionDefaults::with_role(REFEREE_ROLE))
        }
    }

    pub fn is_erased(&self) -> bool {
        self.erase.is_marked()
    }

    pub fn has_assignee(&self) -> bool {
        self.assignee_id.is_some()
    }

    /// Whether this non-erased position holds `official`.
    pub fn holds(&self, official: &OfficialId) -> bool {
        !self.is_erased() && self.assignee_id.as_ref() == Some(official)
    }

    /// The current assignment and scope, in snapshot form.
    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            assignee_id: self.assignee_id.clone(),
            assignee_name: self.assignee_name.clone(),
            is_national: self.is_national,
        }
    }

    pub(crate) fn assign(&mut self, official: &Official) {
        self.assignee_id = Some(official.id.clone());
        self.assignee_name = official.display_name.clone();
    }

    pub(crate) fn clear_assignee(&mut self) {
        self.assignee_id = None;
        self.assignee_name.clear();
    }

    pub(crate) fn restore_assignee(&mut self, snapshot: &PositionSnapshot) {
        self.assignee_id = snapshot.assignee_id.clone();
        self.assignee_name = snapshot.assignee_name.clone();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_position_uses_defaults() {
        let p = Position::new(PositionDefaults::default());
        assert_eq!(p.role, DEFAULT_ROLE);
        assert!(!p.is_referee);
        assert!(!p.is_national);
        assert!(!p.is_erased());
        assert!(p.can_edit);
        assert!(p.id.is_none());
        assert!(p.original_snapshot.is_none());
    }

    #[test]
    fn referee_is_flagged() {
        let p = Position::referee();
        assert!(p.is_referee);
        assert_eq!(p.role, REFEREE_ROLE);
    }

    #[test]
    fn erase_state_toggles() {
        assert_eq!(EraseState::Active.toggled(), EraseState::MarkedForErase);
        assert_eq!(EraseState::MarkedForErase.toggled(), EraseState::Active);
        assert_eq!(EraseState::from(true), EraseState::MarkedForErase);
    }

    #[test]
    fn erased_position_does_not_hold_its_assignee() {
        let mut p = Position::new(PositionDefaults::default());
        p.assign(&Official::new("X", "Xavier"));
        assert!(p.holds(&OfficialId::from("X")));
        p.erase = EraseState::MarkedForErase;
        assert!(!p.holds(&OfficialId::from("X")));
        assert!(p.has_assignee());
    }

    #[test]
    fn snapshot_requires_id_and_name_to_carry_assignee() {
        let mut snap = PositionSnapshot {
            assignee_id: Some(OfficialId::from("A")),
            assignee_name: String::new(),
            is_national: false,
        };
        assert!(!snap.carries_assignee());
        snap.assignee_name = "Alice".to_string();
        assert!(snap.carries_assignee());
    }

    // ── Wire format ──────────────────────────────────────────────────

    #[test]
    fn serializes_camel_case_with_boolean_erase() {
        let mut p = Position::referee();
        p.erase = EraseState::MarkedForErase;
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["isReferee"], serde_json::json!(true));
        assert_eq!(json["erase"], serde_json::json!(true));
        assert_eq!(json["assigneeName"], serde_json::json!(""));
        assert!(json.get("id").is_none());
    }

    #[test]
    fn deserializes_backend_payload() {
        let p: Position = serde_json::from_value(serde_json::json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "role": "Line Judge",
            "assigneeId": "B",
            "assigneeName": "Bob",
            "isNational": true,
            "erase": false,
            "canEdit": false,
            "originalSnapshot": { "assigneeId": "B", "assigneeName": "Bob", "isNational": true }
        }))
        .unwrap();
        assert_eq!(p.id.unwrap().as_str(), "550e8400-e29b-41d4-a716-446655440000");
        assert!(!p.is_referee);
        assert_eq!(p.erase, EraseState::Active);
        assert_eq!(p.assignee_id, Some(OfficialId::from("B")));
        assert!(p.original_snapshot.unwrap().is_national);
    }

    #[test]
    fn accepts_non_uuid_backend_ids() {
        let named: Position = serde_json::from_value(serde_json::json!({
            "id": "pos-42",
            "role": "Line Judge",
            "erase": false
        }))
        .unwrap();
        assert_eq!(named.id, Some(PositionId::new("pos-42")));

        let numeric: Position = serde_json::from_value(serde_json::json!({
            "id": 42,
            "role": "Line Judge"
        }))
        .unwrap();
        assert_eq!(numeric.id, Some(PositionId::new("42")));
        assert_eq!(serde_json::to_value(&numeric).unwrap()["id"], serde_json::json!("42"));
    }
}
