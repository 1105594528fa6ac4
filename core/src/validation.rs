//! Advisory validation
//!
//! Checks the editing UI runs before adding a record and before enabling
//! submission. Nothing here is enforced by the store or the transform.

use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

use crate::models::{ReferenceField, Reference, Section, Snapshot, Survey, SurveyOption};
use crate::utils::is_all_digits;

/// Why a field failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is empty
    #[error("is required")]
    Required,

    /// Field must be ASCII digits only
    #[error("must contain digits only, got {0:?}")]
    NotDigits(String),

    /// Entity list has no records
    #[error("needs at least one record")]
    EmptyList,
}

/// One failed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Entity kind, e.g. `"section"` or `"reference"`
    pub entity: &'static str,

    /// Record id, empty for list-level and reference checks
    pub id: String,

    /// Wire name of the offending field
    pub field: String,

    /// Human-readable reason
    pub message: String,

    /// Machine-readable reason
    pub error: ValidationError,
}

impl ValidationIssue {
    fn new(entity: &'static str, id: &str, field: impl Into<String>, error: ValidationError) -> Self {
        Self {
            entity,
            id: id.to_string(),
            field: field.into(),
            message: error.to_string(),
            error,
        }
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.id.is_empty() {
            write!(f, "{}.{} {}", self.entity, self.field, self.message)
        } else {
            write!(f, "{}[{}].{} {}", self.entity, self.id, self.field, self.message)
        }
    }
}

/// Collected validation issues
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no check failed
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// The failed checks, in the order they ran
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Append every issue of another report
    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    fn require(&mut self, entity: &'static str, id: &str, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.push(ValidationIssue::new(entity, id, field, ValidationError::Required));
            false
        } else {
            true
        }
    }

    fn require_digits(&mut self, entity: &'static str, id: &str, field: &str, value: &str) {
        if self.require(entity, id, field, value) && !is_all_digits(value) {
            self.push(ValidationIssue::new(
                entity,
                id,
                field,
                ValidationError::NotDigits(value.to_string()),
            ));
        }
    }
}

/// Submission validator
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionValidator;

impl SubmissionValidator {
    /// Checks for a survey about to be added
    pub fn validate_survey(survey: &Survey) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.require("survey", &survey.id, "name", &survey.name);
        if survey.section_ref.is_empty() {
            report.push(ValidationIssue::new("survey", &survey.id, "section_ref", ValidationError::Required));
        }
        report
    }

    /// Checks for a section about to be added
    pub fn validate_section(section: &Section) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.require("section", &section.id, "section", &section.name);
        report.require_digits("section", &section.id, "sectionSeq", &section.section_seq);
        report
    }

    /// Checks for an option about to be added
    pub fn validate_option(option: &SurveyOption) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.require("option", &option.id, "option", &option.name);
        if option.kind.is_none() {
            report.push(ValidationIssue::new("option", &option.id, "optionType", ValidationError::Required));
        }
        report.require_digits("option", &option.id, "optionSeq", &option.option_seq);
        report
    }

    /// Whether the snapshot has everything a submission needs
    pub fn check_ready(snapshot: &Snapshot) -> ValidationReport {
        let mut report = ValidationReport::new();

        let lists = [
            ("surveys", snapshot.surveys.is_empty()),
            ("sections", snapshot.sections.is_empty()),
            ("options", snapshot.options.is_empty()),
            ("questions", snapshot.questions.is_empty()),
            ("conditions", snapshot.conditions.is_empty()),
            ("tags", snapshot.tags.is_empty()),
            ("attributes", snapshot.attributes.is_empty()),
        ];
        for (name, empty) in lists {
            if empty {
                report.push(ValidationIssue::new("snapshot", "", name, ValidationError::EmptyList));
            }
        }

        let reference = &snapshot.reference;
        for field in ReferenceField::ALL {
            report.require("reference", "", field.name(), reference.get(field));
        }
        if reference.survey_reference_id.is_empty() {
            report.push(ValidationIssue::new(
                "reference",
                "",
                "survey_reference_id",
                ValidationError::Required,
            ));
        }

        report
    }

    /// Whether every reference id is a plain non-negative integer
    pub fn check_reference_numeric(reference: &Reference) -> ValidationReport {
        let mut report = ValidationReport::new();
        for field in ReferenceField::ALL {
            report.require_digits("reference", "", field.name(), reference.get(field));
        }
        for (i, id) in reference.survey_reference_id.iter().enumerate() {
            report.require_digits("reference", "", &format!("survey_reference_id[{}]", i), id);
        }
        report
    }

    /// Readiness plus the numeric reference check
    pub fn validate_snapshot(snapshot: &Snapshot) -> ValidationReport {
        let mut report = Self::check_ready(snapshot);
        report.merge(Self::check_reference_numeric(&snapshot.reference));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemKind, Question};
    use crate::store::EntityStore;

    #[test]
    fn test_validate_survey() {
        let report = SubmissionValidator::validate_survey(&Survey::new("Avail PMJJY", vec![1]));
        assert!(report.is_valid());

        let report = SubmissionValidator::validate_survey(&Survey::blank());
        let fields: Vec<&str> = report.issues().iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "section_ref"]);
    }

    #[test]
    fn test_validate_section() {
        assert!(SubmissionValidator::validate_section(&Section::new("No Section", "1")).is_valid());

        let report = SubmissionValidator::validate_section(&Section::new("No Section", "1a"));
        assert_eq!(report.issues().len(), 1);
        assert_eq!(report.issues()[0].error, ValidationError::NotDigits("1a".to_string()));

        // An empty sequence is reported once, as missing
        let report = SubmissionValidator::validate_section(&Section::new("", ""));
        assert_eq!(report.issues().len(), 2);
        assert!(report.issues().iter().all(|i| i.error == ValidationError::Required));
    }

    #[test]
    fn test_validate_option() {
        let option = SurveyOption::new("Received", Some(ItemKind::Toggle), "4");
        assert!(SubmissionValidator::validate_option(&option).is_valid());

        let option = SurveyOption::new("Received", None, "-4");
        let report = SubmissionValidator::validate_option(&option);
        let fields: Vec<&str> = report.issues().iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["optionType", "optionSeq"]);
    }

    #[test]
    fn test_seeded_store_is_not_ready() {
        let snapshot = EntityStore::seeded().snapshot("dic_survey_engine_db");
        let report = SubmissionValidator::check_ready(&snapshot);

        assert!(!report.is_valid());
        let empty_lists: Vec<&str> = report
            .issues()
            .iter()
            .filter(|i| i.error == ValidationError::EmptyList)
            .map(|i| i.field.as_str())
            .collect();
        assert_eq!(empty_lists, vec!["conditions", "tags", "attributes"]);
        assert!(report.issues().iter().any(|i| i.field == "survey_reference_id"));
    }

    #[test]
    fn test_check_reference_numeric() {
        let mut reference = Reference::default();
        for field in ReferenceField::ALL {
            reference.set(field, "1");
        }
        reference.survey_reference_id = vec!["34".to_string(), "3x".to_string()];

        let report = SubmissionValidator::check_reference_numeric(&reference);
        assert_eq!(report.issues().len(), 1);
        assert_eq!(report.issues()[0].field, "survey_reference_id[1]");
        assert_eq!(
            report.issues()[0].to_string(),
            "reference.survey_reference_id[1] must contain digits only, got \"3x\""
        );
    }

    #[test]
    fn test_issue_display_includes_id() {
        let mut question = Question::new("Q", None);
        question.id = "q1".to_string();
        let issue = ValidationIssue::new("question", &question.id, "question", ValidationError::Required);
        assert_eq!(issue.to_string(), "question[q1].question is required");
    }
}
