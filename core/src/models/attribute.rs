//! Question attribute entity

use serde::{Serialize, Deserialize};

use super::new_id;
use super::question::Question;

/// Static attribute attached to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Session-scoped identifier
    pub id: String,

    /// Id of the question the attribute describes
    #[serde(rename = "questionId")]
    pub question_id: String,

    /// Attribute name
    pub attribute_name: String,

    /// Pre-allocated database id, as text
    pub attribute_primary_id: String,

    /// Attribute group id, as text
    pub attribute_group_id: String,
}

impl Attribute {
    /// Create an empty attribute bound to a question
    pub fn for_question(question: &Question) -> Self {
        Self {
            id: new_id(),
            question_id: question.id.clone(),
            attribute_name: String::new(),
            attribute_primary_id: String::new(),
            attribute_group_id: String::new(),
        }
    }
}
