//! Branching condition entity

use serde::{Serialize, Deserialize};

use super::kind::{blank_as_none, ConditionValue};
use super::new_id;
use super::question::Question;

/// Sentinel source meaning "no source question"
pub const NULL_SOURCE_QUESTION: &str = "NULL";

/// Where a condition takes its input from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceQuestion<'a> {
    /// Nothing chosen yet
    Unset,

    /// Explicitly no source (`"NULL"`)
    Null,

    /// Id of the source question
    Question(&'a str),
}

/// Branching condition attached to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Identifier; equals the id of the question the condition belongs to
    pub id: String,

    /// Copy of the question text
    pub question: String,

    /// Outcome to branch on; `None` while unset
    #[serde(with = "blank_as_none")]
    pub condition: Option<ConditionValue>,

    /// Source question id, or `"NULL"`
    #[serde(rename = "conditionalSourceQuestion")]
    pub conditional_source_question: String,
}

impl Condition {
    /// Create an empty condition with a fresh id
    pub fn blank(question: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            question: question.into(),
            condition: None,
            conditional_source_question: String::new(),
        }
    }

    /// Create an empty condition bound to a question
    pub fn for_question(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            question: question.text.clone(),
            condition: None,
            conditional_source_question: String::new(),
        }
    }

    /// Interpret the source question field
    pub fn source(&self) -> SourceQuestion<'_> {
        match self.conditional_source_question.as_str() {
            "" => SourceQuestion::Unset,
            NULL_SOURCE_QUESTION => SourceQuestion::Null,
            id => SourceQuestion::Question(id),
        }
    }
}

/// A condition list entry; conditions may arrive nested one level deep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionEntry {
    /// A single condition
    One(Condition),

    /// A nested group of conditions
    Group(Vec<Condition>),
}

impl ConditionEntry {
    /// Conditions held by this entry, in order
    pub fn conditions(&self) -> &[Condition] {
        match self {
            ConditionEntry::One(condition) => std::slice::from_ref(condition),
            ConditionEntry::Group(group) => group,
        }
    }
}

impl From<Condition> for ConditionEntry {
    fn from(condition: Condition) -> Self {
        ConditionEntry::One(condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_question() {
        let mut condition = Condition::blank("Q1");
        assert_eq!(condition.source(), SourceQuestion::Unset);

        condition.conditional_source_question = "NULL".to_string();
        assert_eq!(condition.source(), SourceQuestion::Null);

        condition.conditional_source_question = "q-7".to_string();
        assert_eq!(condition.source(), SourceQuestion::Question("q-7"));
    }

    #[test]
    fn test_for_question_copies_id_and_text() {
        let question = Question::new("Is Didi enrolled?", None);
        let condition = Condition::for_question(&question);
        assert_eq!(condition.id, question.id);
        assert_eq!(condition.question, "Is Didi enrolled?");
    }

    #[test]
    fn test_nested_entries_decode() {
        let entries: Vec<ConditionEntry> = serde_json::from_str(
            r#"[
                {"id": "a", "question": "Q1", "condition": "TRUE", "conditionalSourceQuestion": "NULL"},
                [
                    {"id": "b", "question": "Q2", "condition": "FALSE", "conditionalSourceQuestion": "a"},
                    {"id": "c", "question": "Q3", "condition": "", "conditionalSourceQuestion": ""}
                ]
            ]"#,
        )
        .unwrap();

        let flat: Vec<&str> = entries
            .iter()
            .flat_map(|entry| entry.conditions())
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(flat, vec!["a", "b", "c"]);
    }
}
