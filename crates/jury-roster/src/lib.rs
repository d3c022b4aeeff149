//! # jury-roster -- Jury Roster State Machine
//!
//! Implements the roster editor's domain: the positions of an event's jury,
//! the rules of the two governing bodies that edit them, validation, and
//! the gate in front of the persistence service.
//!
//! ## Modules
//!
//! - **Position** (`position.rs`): one jury seat with its scope, erase
//!   marker, edit permission and single-slot original snapshot.
//!
//! - **Policy** (`policy.rs`): the `ScopePolicy` trait and its two mirror
//!   images, `RegionalPolicy` and `NationalPolicy`. Permission predicates and
//!   scope-crossing side effects live here and nowhere else.
//!
//! - **Roster** (`roster.rs`): ordered positions and the operator actions
//!   (add, toggle scope, toggle erase, rename role, assign/unassign), each
//!   checked against the policy. Structural invariant check.
//!
//! - **Validation** (`validation.rs`): per-field and roster-level errors.
//!
//! - **Session** (`session.rs`): the submission gate. Dirty tracking
//!   against the persisted baseline, in-flight locking, two-phase submit.
//!
//! - **Store** (`store.rs`): seams to the persistence service and the
//!   official directory, with in-memory implementations.
//!
//! ## Crate Policy
//!
//! - Rejected operations return structured errors and leave state untouched.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod policy;
pub mod position;
pub mod roster;
pub mod session;
pub mod store;
pub mod validation;

// ─── Model re-exports ───────────────────────────────────────────────

pub use position::{EraseState, Position, PositionDefaults, PositionSnapshot, DEFAULT_ROLE, REFEREE_ROLE};
pub use roster::{InvariantViolation, Roster, RosterAction, RosterError};

// ─── Policy re-exports ──────────────────────────────────────────────

pub use policy::{policy_for, NationalPolicy, RegionalPolicy, ScopePolicy};

// ─── Validation re-exports ──────────────────────────────────────────

pub use validation::{validate, Field, FieldError, RosterLevelError, ValidationReport};

// ─── Session re-exports ─────────────────────────────────────────────

pub use session::{
    LoadError, RosterDraft, RosterSession, SessionError, SubmissionBatch, SubmissionReceipt,
    SubmitBlocked, SubmitError,
};

// ─── Store re-exports ───────────────────────────────────────────────

pub use store::{InMemoryRosterStore, OfficialDirectory, RosterStore, StaticOfficialDirectory, StoreError};
