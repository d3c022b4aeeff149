//! # Governing Scopes
//!
//! A roster is edited by one of two governing bodies. Each owns the
//! positions whose `is_national` flag matches its own level and may only
//! name assignees within that level.

use serde::{Deserialize, Serialize};

use crate::error::JuryError;

/// The governing body operating the roster editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Regional (autonomic) body. Owns local positions, may request national designation.
    Regional,
    /// National body. Owns national positions, may return a position to regional control.
    National,
}

impl Scope {
    /// The value of a position's `is_national` flag when this scope owns it.
    pub fn owned_flag(&self) -> bool {
        matches!(self, Self::National)
    }

    /// Lowercase wire name (`regional` / `national`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regional => "regional",
            Self::National => "national",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regional => write!(f, "REGIONAL"),
            Self::National => write!(f, "NATIONAL"),
        }
    }
}

impl std::str::FromStr for Scope {
    type Err = JuryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regional" | "local" => Ok(Self::Regional),
            "national" => Ok(Self::National),
            other => Err(JuryError::Parse(format!("unknown scope '{other}'"))),
        }
    }
}
