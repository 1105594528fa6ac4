//! Payload transform
//!
//! Turns an editing-state [`Snapshot`] into the normalized
//! [`SubmissionDocument`] the SQL generation service consumes. The
//! transform is a pure function of its input:
//!
//! - surveys, sections and options with blank names are dropped;
//! - every question is kept, with its tag embedded and only its first
//!   section reference;
//! - conditions are flattened one level and lose their TRUE/FALSE value;
//! - attributes become static attribute rows;
//! - reference scalars become one-element lists.
//!
//! Text-to-integer conversion follows the configured [`NumericPolicy`].

mod document;

pub use document::{
    AttributeRecord, OptionRecord, QuestionConditionRecord, QuestionRecord, SectionRecord,
    SubmissionDocument, SurveyRecord, TagParentRecord, TagRecord, STATIC_ATTRIBUTE_TYPE,
};

use std::collections::HashMap;
use std::convert::Infallible;
use log::{info, warn};

use crate::config::{NumericPolicy, TransformConfig};
use crate::error::{CoreError, Result};
use crate::models::{ItemKind, ReferenceField, Snapshot, Tag};
use crate::utils::{measure_time, parse_int, parse_int_strict, ParsedInt};

/// Converts one text field to an integer
trait NumericConverter {
    type Error;

    fn convert(&mut self, text: &str, field: impl FnOnce() -> String) -> std::result::Result<ParsedInt, Self::Error>;
}

/// Browser `parseInt` semantics; failures become the sentinel
struct Permissive;

impl NumericConverter for Permissive {
    type Error = Infallible;

    fn convert(&mut self, text: &str, field: impl FnOnce() -> String) -> std::result::Result<ParsedInt, Infallible> {
        let value = parse_int(text);
        if value.is_nan() {
            warn!("{} is not numeric ({:?}), sending null", field(), text);
        }
        Ok(value)
    }
}

/// Whole-string parse; failures abort the transform
struct Strict;

impl NumericConverter for Strict {
    type Error = CoreError;

    fn convert(&mut self, text: &str, field: impl FnOnce() -> String) -> Result<ParsedInt> {
        parse_int_strict(text)
            .map(ParsedInt::new)
            .ok_or_else(|| CoreError::FieldNotNumeric { field: field(), value: text.to_string() })
    }
}

fn kind_name(kind: Option<ItemKind>) -> String {
    kind.map(|kind| kind.as_str()).unwrap_or("").to_string()
}

fn build<C: NumericConverter>(snapshot: &Snapshot, conv: &mut C) -> std::result::Result<SubmissionDocument, C::Error> {
    let survey = snapshot
        .surveys
        .iter()
        .filter(|survey| survey.has_name())
        .map(|survey| SurveyRecord {
            name: survey.name.clone(),
            section_ref: survey.section_ref.clone(),
        })
        .collect::<Vec<_>>();

    let mut section = Vec::with_capacity(snapshot.sections.len());
    for item in snapshot.sections.iter().filter(|s| s.has_name()) {
        let i = section.len();
        section.push(SectionRecord {
            name: item.name.clone(),
            section_seq: conv.convert(&item.section_seq, || format!("section[{}].section_seq", i))?,
        });
    }

    let mut options = Vec::with_capacity(snapshot.options.len());
    for item in snapshot.options.iter().filter(|o| o.has_name()) {
        let i = options.len();
        options.push(OptionRecord {
            name: item.name.clone(),
            kind: kind_name(item.kind),
            option_seq: conv.convert(&item.option_seq, || format!("options[{}].option_seq", i))?,
        });
    }

    // First tag per id wins
    let mut tags_by_id: HashMap<&str, &Tag> = HashMap::with_capacity(snapshot.tags.len());
    for tag in &snapshot.tags {
        tags_by_id.entry(tag.id.as_str()).or_insert(tag);
    }

    let mut questions = Vec::with_capacity(snapshot.questions.len());
    for (i, question) in snapshot.questions.iter().enumerate() {
        let tag = match tags_by_id.get(question.id.as_str()) {
            Some(tag) => {
                let parent = if tag.has_parent() {
                    Some(TagParentRecord {
                        name: tag.parent_name.clone(),
                        parent_id: conv.convert(&tag.parent_id, || {
                            format!("questions[{}].tag.parentId.parentId", i)
                        })?,
                    })
                } else {
                    None
                };
                Some(TagRecord { name: tag.tag_name.clone(), parent })
            }
            None => None,
        };

        // Only the first linked section is submitted
        let first_section = question.section_ref.first().map(String::as_str).unwrap_or("");
        let section_ref = conv.convert(first_section, || format!("questions[{}].section_ref", i))?;

        let mut option_ref = Vec::with_capacity(question.option_ref.len());
        for (j, option) in question.option_ref.iter().enumerate() {
            option_ref.push(conv.convert(option, || format!("questions[{}].option_ref[{}]", i, j))?);
        }

        questions.push(QuestionRecord {
            name: question.text.clone(),
            kind: kind_name(question.kind),
            section_ref,
            option_ref,
            tag,
        });
    }

    let question_conditions = snapshot
        .flat_conditions()
        .map(|condition| QuestionConditionRecord {
            name: condition.question.clone(),
            source_question_name: condition.conditional_source_question.clone(),
        })
        .collect::<Vec<_>>();

    let mut attributes = Vec::with_capacity(snapshot.attributes.len());
    for (i, attribute) in snapshot.attributes.iter().enumerate() {
        attributes.push(AttributeRecord {
            id: conv.convert(&attribute.attribute_primary_id, || format!("attributes[{}].id", i))?,
            name: attribute.attribute_name.clone(),
            kind: STATIC_ATTRIBUTE_TYPE.to_string(),
            tag: attribute.attribute_name.clone(),
            attribute_group_id: conv.convert(&attribute.attribute_group_id, || {
                format!("attributes[{}].attributeGroupId", i)
            })?,
        });
    }

    let reference = &snapshot.reference;
    let mut scalar = |field: ReferenceField| -> std::result::Result<Vec<ParsedInt>, C::Error> {
        let value = conv.convert(reference.get(field), || field.name().to_string())?;
        Ok(vec![value])
    };

    let survey_primary_id = scalar(ReferenceField::SurveyPrimaryId)?;
    let section_primary_id = scalar(ReferenceField::SectionPrimaryId)?;
    let option_primary_id = scalar(ReferenceField::OptionPrimaryId)?;
    let question_primary_id = scalar(ReferenceField::QuestionPrimaryId)?;
    let survey_reference_primary_id = scalar(ReferenceField::SurveyReferencePrimaryId)?;
    let survey_section_primary_id = scalar(ReferenceField::SurveySectionPrimaryId)?;
    let section_question_primary_id = scalar(ReferenceField::SectionQuestionPrimaryId)?;
    let question_option_primary_id = scalar(ReferenceField::QuestionOptionPrimaryId)?;
    let conditional_question_mapping_primary_id =
        scalar(ReferenceField::ConditionalQuestionMappingPrimaryId)?;
    let condition_primary_id = scalar(ReferenceField::ConditionPrimaryId)?;
    let tag_primary_id = scalar(ReferenceField::TagPrimaryId)?;

    let mut survey_reference_id = Vec::with_capacity(reference.survey_reference_id.len());
    for (i, id) in reference.survey_reference_id.iter().enumerate() {
        survey_reference_id.push(conv.convert(id, || format!("survey_reference_id[{}]", i))?);
    }

    Ok(SubmissionDocument {
        db_name: snapshot.db_name.clone(),
        survey,
        section,
        options,
        questions,
        question_conditions,
        attributes,
        survey_primary_id,
        section_primary_id,
        option_primary_id,
        question_primary_id,
        survey_reference_id,
        survey_reference_primary_id,
        survey_section_primary_id,
        section_question_primary_id,
        question_option_primary_id,
        conditional_question_mapping_primary_id,
        condition_primary_id,
        tag_primary_id,
    })
}

/// Transform a snapshot with the permissive numeric policy
///
/// Never fails: unparseable integer fields carry the not-a-number sentinel.
pub fn transform_payload(snapshot: &Snapshot) -> SubmissionDocument {
    match build(snapshot, &mut Permissive) {
        Ok(document) => document,
        Err(never) => match never {},
    }
}

/// Snapshot-to-document transformer
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadTransformer {
    policy: NumericPolicy,
}

impl PayloadTransformer {
    /// Create a transformer with the given numeric policy
    pub fn new(policy: NumericPolicy) -> Self {
        Self { policy }
    }

    /// Create a transformer from configuration
    pub fn from_config(config: &TransformConfig) -> Self {
        Self::new(config.numeric_policy)
    }

    /// The numeric policy in use
    pub fn policy(&self) -> NumericPolicy {
        self.policy
    }

    /// Transform a snapshot
    ///
    /// Only the strict policy can fail, with `FieldNotNumeric` naming the
    /// first offending field.
    pub fn transform(&self, snapshot: &Snapshot) -> Result<SubmissionDocument> {
        let document = measure_time("payload transform", || match self.policy {
            NumericPolicy::Permissive => Ok(transform_payload(snapshot)),
            NumericPolicy::Strict => build(snapshot, &mut Strict),
        })?;

        info!(
            "Transformed snapshot for {}: {} surveys, {} sections, {} options, {} questions, {} conditions, {} attributes",
            document.db_name,
            document.survey.len(),
            document.section.len(),
            document.options.len(),
            document.questions.len(),
            document.question_conditions.len(),
            document.attributes.len()
        );
        Ok(document)
    }

    /// Decode a JSON snapshot and transform it
    pub fn transform_json(&self, json: &str) -> Result<SubmissionDocument> {
        let snapshot = Snapshot::from_json(json)?;
        self.transform(&snapshot)
    }
}
