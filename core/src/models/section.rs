//! Section entity

use serde::{Serialize, Deserialize};

use super::new_id;

/// A named section of a survey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Session-scoped identifier
    pub id: String,

    /// Section name
    #[serde(rename = "section")]
    pub name: String,

    /// Position of the section, as typed by the operator
    #[serde(rename = "sectionSeq")]
    pub section_seq: String,
}

impl Section {
    /// Create a section with a fresh id
    pub fn new(name: impl Into<String>, section_seq: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            section_seq: section_seq.into(),
        }
    }

    /// Create an empty section
    pub fn blank() -> Self {
        Self::new("", "")
    }

    /// Whether the name holds anything besides whitespace
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
