//! Question entity

use serde::{Serialize, Deserialize};

use super::kind::{blank_as_none, ItemKind};
use super::new_id;

/// A survey question with its option and section links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Session-scoped identifier, shared by the question's tag and condition
    pub id: String,

    /// Question text
    #[serde(rename = "question")]
    pub text: String,

    /// Kind of input; `None` while unset
    #[serde(rename = "questionType", with = "blank_as_none")]
    pub kind: Option<ItemKind>,

    /// Linked options
    #[serde(rename = "questionOptionRef")]
    pub option_ref: Vec<String>,

    /// Linked sections; only the first one is submitted
    #[serde(rename = "questionSectionRef")]
    pub section_ref: Vec<String>,
}

impl Question {
    /// Create a question with a fresh id and no links
    pub fn new(text: impl Into<String>, kind: Option<ItemKind>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            kind,
            option_ref: Vec::new(),
            section_ref: Vec::new(),
        }
    }

    /// Create an empty question
    pub fn blank() -> Self {
        Self::new("", None)
    }

    /// Set the linked options
    pub fn with_options(mut self, option_ref: Vec<String>) -> Self {
        self.option_ref = option_ref;
        self
    }

    /// Set the linked sections
    pub fn with_sections(mut self, section_ref: Vec<String>) -> Self {
        self.section_ref = section_ref;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let question = Question::new("What is the status?", Some(ItemKind::RadioButton))
            .with_options(vec!["1".to_string(), "2".to_string()])
            .with_sections(vec!["1".to_string()]);
        let json = serde_json::to_value(&question).unwrap();

        assert_eq!(json["question"], "What is the status?");
        assert_eq!(json["questionType"], "RadioButton");
        assert_eq!(json["questionOptionRef"], serde_json::json!(["1", "2"]));
        assert_eq!(json["questionSectionRef"], serde_json::json!(["1"]));
    }

    #[test]
    fn test_scalar_section_ref_is_rejected() {
        let result = serde_json::from_str::<Question>(
            r#"{"id": "q", "question": "Q", "questionType": "", "questionOptionRef": [], "questionSectionRef": "1"}"#,
        );
        assert!(result.is_err());
    }
}
