//! Answer option entity

use serde::{Serialize, Deserialize};

use super::kind::{blank_as_none, ItemKind};
use super::new_id;

/// An answer option questions can refer to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyOption {
    /// Session-scoped identifier
    pub id: String,

    /// Option label
    #[serde(rename = "option")]
    pub name: String,

    /// Kind of input the option belongs to; `None` while unset
    #[serde(rename = "optionType", with = "blank_as_none")]
    pub kind: Option<ItemKind>,

    /// Position of the option, as typed by the operator
    #[serde(rename = "optionSeq")]
    pub option_seq: String,
}

impl SurveyOption {
    /// Create an option with a fresh id
    pub fn new(name: impl Into<String>, kind: Option<ItemKind>, option_seq: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            kind,
            option_seq: option_seq.into(),
        }
    }

    /// Create an empty option
    pub fn blank() -> Self {
        Self::new("", None, "")
    }

    /// Whether the name holds anything besides whitespace
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
