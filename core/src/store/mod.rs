//! In-memory entity store
//!
//! The store owns every entity list of an editing session plus the
//! reference singleton. It performs no validation: updates and removals of
//! unknown ids are silent no-ops, and adds never check for duplicates.
//! Callers hold the store explicitly and pass it to whatever needs it.

mod action;

pub use action::{AttributeUpdate, ConditionUpdate, ReferenceUpdate, StoreAction, TagUpdate};

use log::debug;

use crate::models::{
    Attribute, Condition, ConditionEntry, Question, Reference, Section, Snapshot, Survey,
    SurveyOption, Tag,
};

/// Anything addressed by a session id
trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified!(Survey, Section, SurveyOption, Question, Condition, Tag, Attribute);

/// Replace the record with the same id; returns whether one matched
fn replace_by_id<T: Identified>(list: &mut [T], record: T) -> bool {
    match list.iter_mut().find(|item| item.id() == record.id()) {
        Some(slot) => {
            *slot = record;
            true
        }
        None => false,
    }
}

/// Mutate the record with the given id; returns whether one matched
fn modify_by_id<T: Identified>(list: &mut [T], id: &str, f: impl FnOnce(&mut T)) -> bool {
    match list.iter_mut().find(|item| item.id() == id) {
        Some(item) => {
            f(item);
            true
        }
        None => false,
    }
}

/// Drop every record with the given id; returns how many were removed
fn remove_by_id<T: Identified>(list: &mut Vec<T>, id: &str) -> usize {
    let before = list.len();
    list.retain(|item| item.id() != id);
    before - list.len()
}

/// Editing-session state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityStore {
    surveys: Vec<Survey>,
    sections: Vec<Section>,
    options: Vec<SurveyOption>,
    questions: Vec<Question>,
    conditions: Vec<Condition>,
    tags: Vec<Tag>,
    attributes: Vec<Attribute>,
    reference: Reference,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one blank survey, section, option and question,
    /// the state a fresh editing session starts from
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.add_survey(Survey::blank());
        store.add_section(Section::blank());
        store.add_option(SurveyOption::blank());
        store.add_question(Question::blank());
        store
    }

    /// Surveys, in insertion order
    pub fn surveys(&self) -> &[Survey] {
        &self.surveys
    }

    /// Sections, in insertion order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Options, in insertion order
    pub fn options(&self) -> &[SurveyOption] {
        &self.options
    }

    /// Questions, in insertion order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Conditions, in insertion order
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Tags, in insertion order
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Attributes, in insertion order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// The reference singleton
    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    /// Append a survey
    pub fn add_survey(&mut self, survey: Survey) {
        debug!("add survey {}", survey.id);
        self.surveys.push(survey);
    }

    /// Replace the survey with the same id
    pub fn update_survey(&mut self, survey: Survey) -> bool {
        debug!("update survey {}", survey.id);
        replace_by_id(&mut self.surveys, survey)
    }

    /// Remove a survey
    pub fn remove_survey(&mut self, id: &str) -> bool {
        debug!("remove survey {}", id);
        remove_by_id(&mut self.surveys, id) > 0
    }

    /// Append a section
    pub fn add_section(&mut self, section: Section) {
        debug!("add section {}", section.id);
        self.sections.push(section);
    }

    /// Replace the section with the same id
    pub fn update_section(&mut self, section: Section) -> bool {
        debug!("update section {}", section.id);
        replace_by_id(&mut self.sections, section)
    }

    /// Remove a section
    pub fn remove_section(&mut self, id: &str) -> bool {
        debug!("remove section {}", id);
        remove_by_id(&mut self.sections, id) > 0
    }

    /// Append an option
    pub fn add_option(&mut self, option: SurveyOption) {
        debug!("add option {}", option.id);
        self.options.push(option);
    }

    /// Replace the option with the same id
    pub fn update_option(&mut self, option: SurveyOption) -> bool {
        debug!("update option {}", option.id);
        replace_by_id(&mut self.options, option)
    }

    /// Remove an option
    pub fn remove_option(&mut self, id: &str) -> bool {
        debug!("remove option {}", id);
        remove_by_id(&mut self.options, id) > 0
    }

    /// Append a question
    pub fn add_question(&mut self, question: Question) {
        debug!("add question {}", question.id);
        self.questions.push(question);
    }

    /// Replace the question with the same id
    pub fn update_question(&mut self, question: Question) -> bool {
        debug!("update question {}", question.id);
        replace_by_id(&mut self.questions, question)
    }

    /// Remove a question
    ///
    /// Its condition, tag and attribute rows stay in place; use
    /// [`EntityStore::remove_question_cascade`] to drop them as well.
    pub fn remove_question(&mut self, id: &str) -> bool {
        debug!("remove question {}", id);
        remove_by_id(&mut self.questions, id) > 0
    }

    /// Remove a question and every condition, tag and attribute bound to it
    pub fn remove_question_cascade(&mut self, id: &str) -> bool {
        let removed = self.remove_question(id);

        let conditions = remove_by_id(&mut self.conditions, id);
        let tags_before = self.tags.len();
        self.tags.retain(|tag| tag.id != id && tag.question_name != id);
        let attributes_before = self.attributes.len();
        self.attributes.retain(|attribute| attribute.question_id != id);

        debug!(
            "cascade from question {}: {} conditions, {} tags, {} attributes",
            id,
            conditions,
            tags_before - self.tags.len(),
            attributes_before - self.attributes.len()
        );
        removed
    }

    /// Append a condition
    pub fn add_condition(&mut self, condition: Condition) {
        debug!("add condition {}", condition.id);
        self.conditions.push(condition);
    }

    /// Update one field of a condition
    pub fn update_condition(&mut self, id: &str, update: ConditionUpdate) -> bool {
        debug!("update condition {}: {:?}", id, update);
        modify_by_id(&mut self.conditions, id, |condition| update.apply(condition))
    }

    /// Remove a condition
    pub fn remove_condition(&mut self, id: &str) -> bool {
        debug!("remove condition {}", id);
        remove_by_id(&mut self.conditions, id) > 0
    }

    /// Append a tag
    pub fn add_tag(&mut self, tag: Tag) {
        debug!("add tag {}", tag.id);
        self.tags.push(tag);
    }

    /// Replace the whole tag list
    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        debug!("set {} tags", tags.len());
        self.tags = tags;
    }

    /// Update one field of a tag
    pub fn update_tag(&mut self, id: &str, update: TagUpdate) -> bool {
        debug!("update tag {}: {:?}", id, update);
        modify_by_id(&mut self.tags, id, |tag| update.apply(tag))
    }

    /// Remove a tag
    pub fn remove_tag(&mut self, id: &str) -> bool {
        debug!("remove tag {}", id);
        remove_by_id(&mut self.tags, id) > 0
    }

    /// Append an attribute
    pub fn add_attribute(&mut self, attribute: Attribute) {
        debug!("add attribute {}", attribute.id);
        self.attributes.push(attribute);
    }

    /// Replace the whole attribute list
    pub fn set_attributes(&mut self, attributes: Vec<Attribute>) {
        debug!("set {} attributes", attributes.len());
        self.attributes = attributes;
    }

    /// Update one field of an attribute
    pub fn update_attribute(&mut self, id: &str, update: AttributeUpdate) -> bool {
        debug!("update attribute {}: {:?}", id, update);
        modify_by_id(&mut self.attributes, id, |attribute| update.apply(attribute))
    }

    /// Remove an attribute
    pub fn remove_attribute(&mut self, id: &str) -> bool {
        debug!("remove attribute {}", id);
        remove_by_id(&mut self.attributes, id) > 0
    }

    /// Update one field of the reference singleton
    pub fn update_reference(&mut self, update: ReferenceUpdate) {
        debug!("update reference: {:?}", update);
        update.apply(&mut self.reference);
    }

    /// Replace the reference singleton
    pub fn replace_reference(&mut self, reference: Reference) {
        debug!("replace reference");
        self.reference = reference;
    }

    /// Apply one action
    pub fn dispatch(&mut self, action: StoreAction) {
        match action {
            StoreAction::AddSurvey(survey) => self.add_survey(survey),
            StoreAction::UpdateSurvey(survey) => {
                self.update_survey(survey);
            }
            StoreAction::RemoveSurvey(id) => {
                self.remove_survey(&id);
            }
            StoreAction::AddSection(section) => self.add_section(section),
            StoreAction::UpdateSection(section) => {
                self.update_section(section);
            }
            StoreAction::RemoveSection(id) => {
                self.remove_section(&id);
            }
            StoreAction::AddOption(option) => self.add_option(option),
            StoreAction::UpdateOption(option) => {
                self.update_option(option);
            }
            StoreAction::RemoveOption(id) => {
                self.remove_option(&id);
            }
            StoreAction::AddQuestion(question) => self.add_question(question),
            StoreAction::UpdateQuestion(question) => {
                self.update_question(question);
            }
            StoreAction::RemoveQuestion(id) => {
                self.remove_question(&id);
            }
            StoreAction::RemoveQuestionCascade(id) => {
                self.remove_question_cascade(&id);
            }
            StoreAction::AddCondition(condition) => self.add_condition(condition),
            StoreAction::UpdateCondition { id, update } => {
                self.update_condition(&id, update);
            }
            StoreAction::RemoveCondition(id) => {
                self.remove_condition(&id);
            }
            StoreAction::AddTag(tag) => self.add_tag(tag),
            StoreAction::SetTags(tags) => self.set_tags(tags),
            StoreAction::UpdateTag { id, update } => {
                self.update_tag(&id, update);
            }
            StoreAction::RemoveTag(id) => {
                self.remove_tag(&id);
            }
            StoreAction::AddAttribute(attribute) => self.add_attribute(attribute),
            StoreAction::SetAttributes(attributes) => self.set_attributes(attributes),
            StoreAction::UpdateAttribute { id, update } => {
                self.update_attribute(&id, update);
            }
            StoreAction::RemoveAttribute(id) => {
                self.remove_attribute(&id);
            }
            StoreAction::UpdateReference(update) => self.update_reference(update),
            StoreAction::ReplaceReference(reference) => self.replace_reference(reference),
        }
    }

    /// Copy the current state out for the transform
    pub fn snapshot(&self, db_name: &str) -> Snapshot {
        Snapshot {
            db_name: db_name.to_string(),
            surveys: self.surveys.clone(),
            sections: self.sections.clone(),
            options: self.options.clone(),
            questions: self.questions.clone(),
            conditions: self.conditions.iter().cloned().map(ConditionEntry::One).collect(),
            tags: self.tags.clone(),
            attributes: self.attributes.clone(),
            reference: self.reference.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemKind, ReferenceField};

    fn store_with_question() -> (EntityStore, Question) {
        let mut store = EntityStore::new();
        let question = Question::new("What is the status?", Some(ItemKind::Toggle));
        store.add_question(question.clone());

        let mut condition = Condition::for_question(&question);
        condition.conditional_source_question = "NULL".to_string();
        store.add_condition(condition);

        let mut tag = Tag::for_question(&question);
        tag.tag_name = "Status".to_string();
        store.add_tag(tag);

        store.add_attribute(Attribute::for_question(&question));
        (store, question)
    }

    #[test]
    fn test_seeded_store() {
        let store = EntityStore::seeded();
        assert_eq!(store.surveys().len(), 1);
        assert_eq!(store.sections().len(), 1);
        assert_eq!(store.options().len(), 1);
        assert_eq!(store.questions().len(), 1);
        assert!(store.conditions().is_empty());
        assert!(store.tags().is_empty());
        assert!(store.attributes().is_empty());
        assert_eq!(store.reference(), &Reference::default());
    }

    #[test]
    fn test_update_replaces_matching_record() {
        let mut store = EntityStore::new();
        let mut section = Section::new("No Section", "1");
        store.add_section(section.clone());

        section.section_seq = "2".to_string();
        assert!(store.update_section(section.clone()));
        assert_eq!(store.sections()[0].section_seq, "2");
    }

    #[test]
    fn test_update_of_unknown_id_is_a_no_op() {
        let mut store = EntityStore::seeded();
        let before = store.clone();

        assert!(!store.update_survey(Survey::new("Ghost", vec![1])));
        assert!(!store.update_tag("missing", TagUpdate::TagName("x".to_string())));
        assert!(!store.update_attribute("missing", AttributeUpdate::Name("x".to_string())));
        assert!(!store.update_condition("missing", ConditionUpdate::Question("x".to_string())));
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_of_unknown_id_is_a_no_op() {
        let mut store = EntityStore::seeded();
        let before = store.clone();
        assert!(!store.remove_option("missing"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_question_keeps_dependents() {
        let (mut store, question) = store_with_question();

        assert!(store.remove_question(&question.id));
        assert!(store.questions().is_empty());
        assert_eq!(store.conditions().len(), 1);
        assert_eq!(store.tags().len(), 1);
        assert_eq!(store.attributes().len(), 1);
    }

    #[test]
    fn test_remove_question_cascade_drops_dependents() {
        let (mut store, question) = store_with_question();
        let other = Question::new("Unrelated", None);
        store.add_question(other.clone());
        store.add_tag(Tag::for_question(&other));

        // Linked only through questionName
        let mut renamed = Tag::for_question(&question);
        renamed.id = "tag-by-name".to_string();
        store.add_tag(renamed);
        assert_eq!(store.tags().len(), 3);

        assert!(store.remove_question_cascade(&question.id));
        assert_eq!(store.questions().len(), 1);
        assert!(store.conditions().is_empty());
        assert_eq!(store.tags().len(), 1);
        assert_eq!(store.tags()[0].id, other.id);
        assert!(store.attributes().is_empty());
    }

    #[test]
    fn test_dispatch_applies_actions() {
        let mut store = EntityStore::new();
        let question = Question::new("Q1", None);
        let tag = Tag::for_question(&question);

        store.dispatch(StoreAction::AddQuestion(question.clone()));
        store.dispatch(StoreAction::SetTags(vec![tag.clone()]));
        store.dispatch(StoreAction::UpdateTag {
            id: tag.id.clone(),
            update: TagUpdate::TagName("T".to_string()),
        });
        store.dispatch(StoreAction::UpdateReference(ReferenceUpdate::Scalar(
            ReferenceField::SurveyPrimaryId,
            "176".to_string(),
        )));
        store.dispatch(StoreAction::RemoveQuestionCascade(question.id.clone()));

        assert!(store.questions().is_empty());
        assert!(store.tags().is_empty());
        assert_eq!(store.reference().survey_primary_id, "176");
    }

    #[test]
    fn test_snapshot_is_independent_of_later_mutation() {
        let (mut store, question) = store_with_question();
        let snapshot = store.snapshot("survey_db");

        store.remove_question_cascade(&question.id);

        assert_eq!(snapshot.db_name, "survey_db");
        assert_eq!(snapshot.questions.len(), 1);
        assert_eq!(snapshot.flat_conditions().count(), 1);
        assert_eq!(snapshot.tags.len(), 1);
    }
}
