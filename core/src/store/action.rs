//! Store actions
//!
//! Every mutation the editing UI can perform, as data. Field-level updates
//! are one enum per entity so the set of editable fields is checked at
//! compile time.

use crate::models::{
    Attribute, Condition, ConditionValue, Question, Reference, ReferenceField, Section, Survey,
    SurveyOption, Tag,
};

/// Field update for a [`Condition`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionUpdate {
    /// Replace the copied question text
    Question(String),

    /// Set or clear the branching outcome
    Condition(Option<ConditionValue>),

    /// Replace the source question id (or `"NULL"`)
    SourceQuestion(String),
}

impl ConditionUpdate {
    /// Apply the update in place
    pub fn apply(self, condition: &mut Condition) {
        match self {
            ConditionUpdate::Question(text) => condition.question = text,
            ConditionUpdate::Condition(value) => condition.condition = value,
            ConditionUpdate::SourceQuestion(source) => condition.conditional_source_question = source,
        }
    }
}

/// Field update for a [`Tag`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagUpdate {
    /// Replace the tagged question id
    QuestionName(String),

    /// Replace the tag name
    TagName(String),

    /// Replace the parent id text
    ParentId(String),

    /// Replace the parent name
    ParentName(String),
}

impl TagUpdate {
    /// Apply the update in place
    pub fn apply(self, tag: &mut Tag) {
        match self {
            TagUpdate::QuestionName(id) => tag.question_name = id,
            TagUpdate::TagName(name) => tag.tag_name = name,
            TagUpdate::ParentId(id) => tag.parent_id = id,
            TagUpdate::ParentName(name) => tag.parent_name = name,
        }
    }
}

/// Field update for an [`Attribute`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeUpdate {
    /// Replace the described question id
    QuestionId(String),

    /// Replace the attribute name
    Name(String),

    /// Replace the primary id text
    PrimaryId(String),

    /// Replace the group id text
    GroupId(String),
}

impl AttributeUpdate {
    /// Apply the update in place
    pub fn apply(self, attribute: &mut Attribute) {
        match self {
            AttributeUpdate::QuestionId(id) => attribute.question_id = id,
            AttributeUpdate::Name(name) => attribute.attribute_name = name,
            AttributeUpdate::PrimaryId(id) => attribute.attribute_primary_id = id,
            AttributeUpdate::GroupId(id) => attribute.attribute_group_id = id,
        }
    }
}

/// Field update for the [`Reference`] singleton
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceUpdate {
    /// Replace one scalar field
    Scalar(ReferenceField, String),

    /// Replace the whole list of referenced survey ids
    SurveyReferenceIds(Vec<String>),

    /// Append one referenced survey id
    PushSurveyReferenceId(String),
}

impl ReferenceUpdate {
    /// Apply the update in place
    pub fn apply(self, reference: &mut Reference) {
        match self {
            ReferenceUpdate::Scalar(field, value) => reference.set(field, value),
            ReferenceUpdate::SurveyReferenceIds(ids) => reference.survey_reference_id = ids,
            ReferenceUpdate::PushSurveyReferenceId(id) => reference.survey_reference_id.push(id),
        }
    }
}

/// A single store mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Append a survey
    AddSurvey(Survey),
    /// Replace the survey with the same id
    UpdateSurvey(Survey),
    /// Remove a survey by id
    RemoveSurvey(String),

    /// Append a section
    AddSection(Section),
    /// Replace the section with the same id
    UpdateSection(Section),
    /// Remove a section by id
    RemoveSection(String),

    /// Append an option
    AddOption(SurveyOption),
    /// Replace the option with the same id
    UpdateOption(SurveyOption),
    /// Remove an option by id
    RemoveOption(String),

    /// Append a question
    AddQuestion(Question),
    /// Replace the question with the same id
    UpdateQuestion(Question),
    /// Remove a question, leaving its dependents
    RemoveQuestion(String),
    /// Remove a question together with its condition, tag and attribute rows
    RemoveQuestionCascade(String),

    /// Append a condition
    AddCondition(Condition),
    /// Update one field of a condition
    UpdateCondition {
        /// Target record id
        id: String,
        /// Field to change
        update: ConditionUpdate,
    },
    /// Remove a condition by id
    RemoveCondition(String),

    /// Append a tag
    AddTag(Tag),
    /// Replace the whole tag list
    SetTags(Vec<Tag>),
    /// Update one field of a tag
    UpdateTag {
        /// Target record id
        id: String,
        /// Field to change
        update: TagUpdate,
    },
    /// Remove a tag by id
    RemoveTag(String),

    /// Append an attribute
    AddAttribute(Attribute),
    /// Replace the whole attribute list
    SetAttributes(Vec<Attribute>),
    /// Update one field of an attribute
    UpdateAttribute {
        /// Target record id
        id: String,
        /// Field to change
        update: AttributeUpdate,
    },
    /// Remove an attribute by id
    RemoveAttribute(String),

    /// Update one field of the reference singleton
    UpdateReference(ReferenceUpdate),
    /// Replace the reference singleton
    ReplaceReference(Reference),
}
