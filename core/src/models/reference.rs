//! Reference singleton
//!
//! Holds the primary-key values the operator pre-allocates so the SQL
//! generator can line new rows up with existing database identifiers.

use std::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Serialize, Deserialize};

/// Pre-allocated primary keys for one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// First survey id
    pub survey_primary_id: String,

    /// First section id
    pub section_primary_id: String,

    /// First option id
    pub option_primary_id: String,

    /// First question id
    pub question_primary_id: String,

    /// Existing survey ids the new surveys reference
    pub survey_reference_id: Vec<String>,

    /// First survey-reference mapping id
    pub survey_reference_primary_id: String,

    /// First survey-section mapping id
    pub survey_section_primary_id: String,

    /// First section-question mapping id
    pub section_question_primary_id: String,

    /// First question-option mapping id
    pub question_option_primary_id: String,

    /// First conditional question mapping id
    pub conditional_question_mapping_primary_id: String,

    /// First condition id
    pub condition_primary_id: String,

    /// First tag id
    pub tag_primary_id: String,
}

/// The scalar fields of [`Reference`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceField {
    /// `survey_primary_id`
    SurveyPrimaryId,
    /// `section_primary_id`
    SectionPrimaryId,
    /// `option_primary_id`
    OptionPrimaryId,
    /// `question_primary_id`
    QuestionPrimaryId,
    /// `survey_reference_primary_id`
    SurveyReferencePrimaryId,
    /// `survey_section_primary_id`
    SurveySectionPrimaryId,
    /// `section_question_primary_id`
    SectionQuestionPrimaryId,
    /// `question_option_primary_id`
    QuestionOptionPrimaryId,
    /// `conditional_question_mapping_primary_id`
    ConditionalQuestionMappingPrimaryId,
    /// `condition_primary_id`
    ConditionPrimaryId,
    /// `tag_primary_id`
    TagPrimaryId,
}

impl ReferenceField {
    /// Every scalar field, in document order
    pub const ALL: [ReferenceField; 11] = [
        ReferenceField::SurveyPrimaryId,
        ReferenceField::SectionPrimaryId,
        ReferenceField::OptionPrimaryId,
        ReferenceField::QuestionPrimaryId,
        ReferenceField::SurveyReferencePrimaryId,
        ReferenceField::SurveySectionPrimaryId,
        ReferenceField::SectionQuestionPrimaryId,
        ReferenceField::QuestionOptionPrimaryId,
        ReferenceField::ConditionalQuestionMappingPrimaryId,
        ReferenceField::ConditionPrimaryId,
        ReferenceField::TagPrimaryId,
    ];

    /// Wire name of the field
    pub fn name(&self) -> &'static str {
        match self {
            ReferenceField::SurveyPrimaryId => "survey_primary_id",
            ReferenceField::SectionPrimaryId => "section_primary_id",
            ReferenceField::OptionPrimaryId => "option_primary_id",
            ReferenceField::QuestionPrimaryId => "question_primary_id",
            ReferenceField::SurveyReferencePrimaryId => "survey_reference_primary_id",
            ReferenceField::SurveySectionPrimaryId => "survey_section_primary_id",
            ReferenceField::SectionQuestionPrimaryId => "section_question_primary_id",
            ReferenceField::QuestionOptionPrimaryId => "question_option_primary_id",
            ReferenceField::ConditionalQuestionMappingPrimaryId => {
                "conditional_question_mapping_primary_id"
            }
            ReferenceField::ConditionPrimaryId => "condition_primary_id",
            ReferenceField::TagPrimaryId => "tag_primary_id",
        }
    }
}

impl Display for ReferenceField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl Reference {
    /// Read a scalar field
    pub fn get(&self, field: ReferenceField) -> &str {
        match field {
            ReferenceField::SurveyPrimaryId => &self.survey_primary_id,
            ReferenceField::SectionPrimaryId => &self.section_primary_id,
            ReferenceField::OptionPrimaryId => &self.option_primary_id,
            ReferenceField::QuestionPrimaryId => &self.question_primary_id,
            ReferenceField::SurveyReferencePrimaryId => &self.survey_reference_primary_id,
            ReferenceField::SurveySectionPrimaryId => &self.survey_section_primary_id,
            ReferenceField::SectionQuestionPrimaryId => &self.section_question_primary_id,
            ReferenceField::QuestionOptionPrimaryId => &self.question_option_primary_id,
            ReferenceField::ConditionalQuestionMappingPrimaryId => {
                &self.conditional_question_mapping_primary_id
            }
            ReferenceField::ConditionPrimaryId => &self.condition_primary_id,
            ReferenceField::TagPrimaryId => &self.tag_primary_id,
        }
    }

    /// Mutable access to a scalar field
    pub fn get_mut(&mut self, field: ReferenceField) -> &mut String {
        match field {
            ReferenceField::SurveyPrimaryId => &mut self.survey_primary_id,
            ReferenceField::SectionPrimaryId => &mut self.section_primary_id,
            ReferenceField::OptionPrimaryId => &mut self.option_primary_id,
            ReferenceField::QuestionPrimaryId => &mut self.question_primary_id,
            ReferenceField::SurveyReferencePrimaryId => &mut self.survey_reference_primary_id,
            ReferenceField::SurveySectionPrimaryId => &mut self.survey_section_primary_id,
            ReferenceField::SectionQuestionPrimaryId => &mut self.section_question_primary_id,
            ReferenceField::QuestionOptionPrimaryId => &mut self.question_option_primary_id,
            ReferenceField::ConditionalQuestionMappingPrimaryId => {
                &mut self.conditional_question_mapping_primary_id
            }
            ReferenceField::ConditionPrimaryId => &mut self.condition_primary_id,
            ReferenceField::TagPrimaryId => &mut self.tag_primary_id,
        }
    }

    /// Set a scalar field
    pub fn set(&mut self, field: ReferenceField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_match_serialized_keys() {
        let reference = Reference::default();
        let json = serde_json::to_value(&reference).unwrap();
        for field in ReferenceField::ALL {
            assert!(json.get(field.name()).is_some(), "missing key {}", field);
        }
    }

    #[test]
    fn test_get_and_set() {
        let mut reference = Reference::default();
        reference.set(ReferenceField::TagPrimaryId, "354");
        assert_eq!(reference.get(ReferenceField::TagPrimaryId), "354");
        assert_eq!(reference.tag_primary_id, "354");
        assert_eq!(reference.get(ReferenceField::SurveyPrimaryId), "");
    }
}
