//! Survey entity

use serde::{Serialize, Deserialize};

use super::new_id;

/// A survey and the sections it is made of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    /// Session-scoped identifier
    pub id: String,

    /// Survey name; surveys with a blank name are not submitted
    pub name: String,

    /// Sequence numbers of the sections in this survey
    pub section_ref: Vec<i64>,
}

impl Survey {
    /// Create a survey with a fresh id
    pub fn new(name: impl Into<String>, section_ref: Vec<i64>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            section_ref,
        }
    }

    /// Create an empty survey, as the editor does when a new row is added
    pub fn blank() -> Self {
        Self::new("", Vec::new())
    }

    /// Whether the name holds anything besides whitespace
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
