//! # jury-core -- Foundational Types for the Jury Roster
//!
//! The leaf of the workspace dependency graph. Defines the identifier
//! newtypes, the `Official` record supplied by the official directory, the
//! two governing scopes, and the top-level error type. Every other crate
//! depends on `jury-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `EventId`, `PositionId` and
//!    `OfficialId` are distinct types. An official's id cannot be passed
//!    where a position id is expected.
//!
//! 2. **One `Scope` enum.** Regional and National are the only operators.
//!    Every scope-dependent rule matches on it exhaustively.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jury-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod official;
pub mod scope;

pub use error::JuryError;
pub use identity::{EventId, OfficialId, PositionId};
pub use official::Official;
pub use scope::Scope;
