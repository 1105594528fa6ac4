//! Editing-state snapshot
//!
//! A [`Snapshot`] is the transform's only input: every entity list plus the
//! reference singleton, copied out of the store at submit time.

use std::convert::TryFrom;
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

use crate::config::DEFAULT_DB_NAME;
use crate::error::{to_shape_error, Result};
use super::{Attribute, ConditionEntry, Question, Reference, Section, Survey, SurveyOption, Tag};

/// Full copy of the editing state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct Snapshot {
    /// Target database name
    pub db_name: String,

    /// Surveys
    pub surveys: Vec<Survey>,

    /// Sections
    pub sections: Vec<Section>,

    /// Answer options
    pub options: Vec<SurveyOption>,

    /// Questions
    pub questions: Vec<Question>,

    /// Conditions, possibly nested one level
    pub conditions: Vec<ConditionEntry>,

    /// Tags
    pub tags: Vec<Tag>,

    /// Attributes
    pub attributes: Vec<Attribute>,

    /// Pre-allocated primary keys
    pub reference: Reference,
}

/// Wire form accepting the reference either nested or spread at the top level
#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    db_name: Option<String>,
    surveys: Vec<Survey>,
    sections: Vec<Section>,
    options: Vec<SurveyOption>,
    questions: Vec<Question>,
    conditions: Vec<ConditionEntry>,
    tags: Vec<Tag>,
    attributes: Vec<Attribute>,
    #[serde(default)]
    reference: Option<Reference>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = String;

    fn try_from(raw: RawSnapshot) -> std::result::Result<Self, Self::Error> {
        let reference = match raw.reference {
            Some(reference) => reference,
            None => serde_json::from_value(Value::Object(raw.rest))
                .map_err(|e| format!("reference: {}", e))?,
        };

        Ok(Snapshot {
            db_name: raw.db_name.unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            surveys: raw.surveys,
            sections: raw.sections,
            options: raw.options,
            questions: raw.questions,
            conditions: raw.conditions,
            tags: raw.tags,
            attributes: raw.attributes,
            reference,
        })
    }
}

impl Snapshot {
    /// Decode a snapshot from JSON; structural problems become `InvalidShape`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(to_shape_error)
    }

    /// Decode a snapshot from an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(to_shape_error)
    }

    /// Decode a snapshot from JSON, using `db_name` when the snapshot carries none
    pub fn from_json_with_default(json: &str, db_name: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(to_shape_error)?;
        Self::from_value_with_default(value, db_name)
    }

    /// Decode a parsed snapshot, using `db_name` when the snapshot carries none
    pub fn from_value_with_default(mut value: Value, db_name: &str) -> Result<Self> {
        if let Value::Object(map) = &mut value {
            let missing = map.get("db_name").map_or(true, Value::is_null);
            if missing {
                map.insert("db_name".to_string(), Value::String(db_name.to_string()));
            }
        }
        Self::from_value(value)
    }

    /// Iterate the conditions with one level of nesting flattened
    pub fn flat_conditions(&self) -> impl Iterator<Item = &super::Condition> {
        self.conditions.iter().flat_map(|entry| entry.conditions())
    }
}
