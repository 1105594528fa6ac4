//! Enumerated field values shared by several entities
//!
//! The editing UI starts every record from a blank template, so these enums
//! are stored as `Option<_>` and an empty string on the wire means "unset".

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Error returned when a wire string names no known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownVariant {
    /// What was being parsed
    pub kind: &'static str,
    /// The rejected text
    pub value: String,
}

/// Kind of an option or question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Single choice from a dropdown
    SingleSelectDropDown,

    /// Multiple choice from a list
    MultiSelect,

    /// No input
    None,

    /// On/off toggle
    Toggle,

    /// Numeric input
    InputNumber,

    /// Date picker
    DateType,

    /// Multiple image capture
    MultiImage,

    /// List with increment/decrement controls
    IncrementDecrementList,

    /// Radio buttons
    RadioButton,

    /// Multiple choice from a dropdown
    MultiSelectDropDown,
}

impl ItemKind {
    /// Every known kind, in the order the editing UI lists them
    pub const ALL: [ItemKind; 10] = [
        ItemKind::SingleSelectDropDown,
        ItemKind::MultiSelect,
        ItemKind::None,
        ItemKind::Toggle,
        ItemKind::InputNumber,
        ItemKind::DateType,
        ItemKind::MultiImage,
        ItemKind::IncrementDecrementList,
        ItemKind::RadioButton,
        ItemKind::MultiSelectDropDown,
    ];

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::SingleSelectDropDown => "SingleSelectDropDown",
            ItemKind::MultiSelect => "MultiSelect",
            ItemKind::None => "None",
            ItemKind::Toggle => "Toggle",
            ItemKind::InputNumber => "InputNumber",
            ItemKind::DateType => "DateType",
            ItemKind::MultiImage => "MultiImage",
            ItemKind::IncrementDecrementList => "IncrementDecrementList",
            ItemKind::RadioButton => "RadioButton",
            ItemKind::MultiSelectDropDown => "MultiSelectDropDown",
        }
    }
}

impl AsRef<str> for ItemKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownVariant { kind: "item kind", value: s.to_string() })
    }
}

/// Branching outcome a condition tests for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionValue {
    /// Branch when the source answer is true
    #[serde(rename = "TRUE")]
    True,

    /// Branch when the source answer is false
    #[serde(rename = "FALSE")]
    False,
}

impl ConditionValue {
    /// Wire name of the value
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionValue::True => "TRUE",
            ConditionValue::False => "FALSE",
        }
    }
}

impl AsRef<str> for ConditionValue {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for ConditionValue {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRUE" => Ok(ConditionValue::True),
            "FALSE" => Ok(ConditionValue::False),
            other => Err(UnknownVariant { kind: "condition value", value: other.to_string() }),
        }
    }
}

/// Serde adapter mapping `""` to `None` for string-backed enums
pub(crate) mod blank_as_none {
    use std::fmt::Display;
    use std::str::FromStr;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<str>,
        S: Serializer,
    {
        serializer.serialize_str(value.as_ref().map(|v| v.as_ref()).unwrap_or(""))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some).map_err(de::Error::custom)
    }
}
