//! Data models for the survey editing state
//!
//! This module provides the entity records the editor produces (surveys,
//! sections, options, questions, conditions, tags, attributes), the
//! reference singleton and the snapshot handed to the transform.
//! Field names on the wire follow the editing UI exactly.

mod kind;
mod survey;
mod section;
mod option;
mod question;
mod condition;
mod tag;
mod attribute;
mod reference;
mod snapshot;

pub use kind::{ItemKind, ConditionValue, UnknownVariant};
pub use survey::Survey;
pub use section::Section;
pub use option::SurveyOption;
pub use question::Question;
pub use condition::{Condition, ConditionEntry, SourceQuestion, NULL_SOURCE_QUESTION};
pub use tag::Tag;
pub use attribute::Attribute;
pub use reference::{Reference, ReferenceField};
pub use snapshot::Snapshot;

/// Generate a fresh session-scoped entity id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
