//! # Officials
//!
//! An official is a person who can be seated on a jury. The official
//! directory supplies them; this workspace never creates or edits one.

use serde::{Deserialize, Serialize};

use crate::identity::OfficialId;

/// An official eligible for assignment, as listed by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Official {
    pub id: OfficialId,
    pub display_name: String,
}

impl Official {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: OfficialId(id.into()),
            display_name: display_name.into(),
        }
    }
}

impl std::fmt::Display for Official {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id.0)
    }
}
