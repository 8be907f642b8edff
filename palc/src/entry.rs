//! Result records

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Category heading
    Branch,
    /// Computed value or sub-category listed under a heading
    Node,
}

/// One line of output: `{"type": "branch" | "node", "value": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub value: String,
}

impl Entry {
    pub fn branch(value: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Branch,
            value: value.into(),
        }
    }

    pub fn node(value: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Node,
            value: value.into(),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::Branch => write!(f, "# {}", self.value),
            EntryKind::Node => write!(f, "  {}", self.value),
        }
    }
}
