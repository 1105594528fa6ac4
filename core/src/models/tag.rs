//! Question tag entity

use serde::{Serialize, Deserialize};

use super::question::Question;

/// Tag attached to a question, optionally under a parent tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Identifier; equals the id of the tagged question
    pub id: String,

    /// Id of the tagged question
    #[serde(rename = "questionName")]
    pub question_name: String,

    /// Tag name
    pub tag_name: String,

    /// Parent tag id as text; empty when the tag has no parent
    #[serde(rename = "tag_parentId")]
    pub parent_id: String,

    /// Parent tag name
    #[serde(rename = "tag_parentName")]
    pub parent_name: String,
}

impl Tag {
    /// Create an empty tag bound to a question
    pub fn for_question(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            question_name: question.id.clone(),
            tag_name: String::new(),
            parent_id: String::new(),
            parent_name: String::new(),
        }
    }

    /// Whether the tag sits under a parent
    pub fn has_parent(&self) -> bool {
        !self.parent_id.is_empty()
    }
}
