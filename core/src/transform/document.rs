//! Normalized submission document
//!
//! This is the wire contract with the SQL generation service. Key names and
//! their order are fixed; integer fields that failed to parse carry the
//! not-a-number sentinel and serialize as `null`.

use serde::{Serialize, Deserialize};

use crate::utils::ParsedInt;

/// Value written into every attribute's `type`
pub const STATIC_ATTRIBUTE_TYPE: &str = "Static";

/// A survey row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRecord {
    /// Survey name
    pub name: String,

    /// Section sequence numbers, passed through unchanged
    pub section_ref: Vec<i64>,
}

/// A section row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Section name
    pub name: String,

    /// Section position
    pub section_seq: ParsedInt,
}

/// An option row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    /// Option label
    pub name: String,

    /// Kind name, empty when unset
    #[serde(rename = "type")]
    pub kind: String,

    /// Option position
    pub option_seq: ParsedInt,
}

/// Parent of a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagParentRecord {
    /// Parent tag name
    pub name: String,

    /// Parent tag id
    #[serde(rename = "parentId")]
    pub parent_id: ParsedInt,
}

/// Tag embedded in a question row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Tag name
    pub name: String,

    /// Parent tag, `null` for a root tag
    #[serde(rename = "parentId")]
    pub parent: Option<TagParentRecord>,
}

/// A question row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question text
    pub name: String,

    /// Kind name, empty when unset
    #[serde(rename = "type")]
    pub kind: String,

    /// First linked section
    pub section_ref: ParsedInt,

    /// Linked options
    pub option_ref: Vec<ParsedInt>,

    /// Embedded tag, `null` when the question has none
    pub tag: Option<TagRecord>,
}

/// A question-condition row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionConditionRecord {
    /// Question text
    pub name: String,

    /// Source question id or `"NULL"`
    #[serde(rename = "sourceQuestionName")]
    pub source_question_name: String,
}

/// An attribute row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    /// Pre-allocated attribute id
    pub id: ParsedInt,

    /// Attribute name
    pub name: String,

    /// Always [`STATIC_ATTRIBUTE_TYPE`]
    #[serde(rename = "type")]
    pub kind: String,

    /// Tag name, equal to the attribute name
    pub tag: String,

    /// Attribute group id
    #[serde(rename = "attributeGroupId")]
    pub attribute_group_id: ParsedInt,
}

/// The normalized document sent to the SQL generation service
///
/// Reference ids are one-element lists except `survey_reference_id`, which
/// keeps one entry per referenced survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDocument {
    /// Target database name
    pub db_name: String,

    /// Named surveys
    pub survey: Vec<SurveyRecord>,

    /// Named sections
    pub section: Vec<SectionRecord>,

    /// Named options
    pub options: Vec<OptionRecord>,

    /// Every question, with its tag
    pub questions: Vec<QuestionRecord>,

    /// Flattened conditions
    pub question_conditions: Vec<QuestionConditionRecord>,

    /// Static attribute rows
    pub attributes: Vec<AttributeRecord>,

    /// First survey id
    pub survey_primary_id: Vec<ParsedInt>,

    /// First section id
    pub section_primary_id: Vec<ParsedInt>,

    /// First option id
    pub option_primary_id: Vec<ParsedInt>,

    /// First question id
    pub question_primary_id: Vec<ParsedInt>,

    /// Referenced survey ids, one per entry
    pub survey_reference_id: Vec<ParsedInt>,

    /// First survey-reference mapping id
    pub survey_reference_primary_id: Vec<ParsedInt>,

    /// First survey-section mapping id
    pub survey_section_primary_id: Vec<ParsedInt>,

    /// First section-question mapping id
    pub section_question_primary_id: Vec<ParsedInt>,

    /// First question-option mapping id
    pub question_option_primary_id: Vec<ParsedInt>,

    /// First conditional question mapping id
    pub conditional_question_mapping_primary_id: Vec<ParsedInt>,

    /// First condition id
    pub condition_primary_id: Vec<ParsedInt>,

    /// First tag id
    pub tag_primary_id: Vec<ParsedInt>,
}

impl SubmissionDocument {
    /// Serialize to compact JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Paths of every integer field holding the not-a-number sentinel
    ///
    /// The transform never rejects these in permissive mode; callers that
    /// need clean ids check this list before submitting.
    pub fn unparsed_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();

        for (i, section) in self.section.iter().enumerate() {
            if section.section_seq.is_nan() {
                fields.push(format!("section[{}].section_seq", i));
            }
        }
        for (i, option) in self.options.iter().enumerate() {
            if option.option_seq.is_nan() {
                fields.push(format!("options[{}].option_seq", i));
            }
        }
        for (i, question) in self.questions.iter().enumerate() {
            if question.section_ref.is_nan() {
                fields.push(format!("questions[{}].section_ref", i));
            }
            for (j, option) in question.option_ref.iter().enumerate() {
                if option.is_nan() {
                    fields.push(format!("questions[{}].option_ref[{}]", i, j));
                }
            }
            let parent = question.tag.as_ref().and_then(|tag| tag.parent.as_ref());
            if parent.map_or(false, |parent| parent.parent_id.is_nan()) {
                fields.push(format!("questions[{}].tag.parentId.parentId", i));
            }
        }
        for (i, attribute) in self.attributes.iter().enumerate() {
            if attribute.id.is_nan() {
                fields.push(format!("attributes[{}].id", i));
            }
            if attribute.attribute_group_id.is_nan() {
                fields.push(format!("attributes[{}].attributeGroupId", i));
            }
        }

        let references: [(&str, &[ParsedInt]); 12] = [
            ("survey_primary_id", self.survey_primary_id.as_slice()),
            ("section_primary_id", self.section_primary_id.as_slice()),
            ("option_primary_id", self.option_primary_id.as_slice()),
            ("question_primary_id", self.question_primary_id.as_slice()),
            ("survey_reference_id", self.survey_reference_id.as_slice()),
            ("survey_reference_primary_id", self.survey_reference_primary_id.as_slice()),
            ("survey_section_primary_id", self.survey_section_primary_id.as_slice()),
            ("section_question_primary_id", self.section_question_primary_id.as_slice()),
            ("question_option_primary_id", self.question_option_primary_id.as_slice()),
            ("conditional_question_mapping_primary_id", self.conditional_question_mapping_primary_id.as_slice()),
            ("condition_primary_id", self.condition_primary_id.as_slice()),
            ("tag_primary_id", self.tag_primary_id.as_slice()),
        ];
        for (name, values) in references {
            for (i, value) in values.iter().enumerate() {
                if value.is_nan() {
                    fields.push(format!("{}[{}]", name, i));
                }
            }
        }

        fields
    }
}
