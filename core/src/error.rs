//! Error types for the core crate
//!
//! This module provides a consolidated error type for the core crate,
//! covering snapshot decoding, strict numeric parsing and configuration.

use std::io;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// A snapshot field is missing or has the wrong kind
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// A text field expected to hold an integer does not (strict policy only)
    #[error("Field {field} is not numeric: {value:?}")]
    FieldNotNumeric {
        /// Path of the offending field, e.g. `questions[2].section_ref`
        field: String,
        /// The raw text that failed to parse
        value: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for the core crate
pub type Result<T> = std::result::Result<T, CoreError>;

/// Convert a decoding error to an InvalidShape error
pub fn to_shape_error<E: std::fmt::Display>(err: E) -> CoreError {
    CoreError::InvalidShape(err.to_string())
}

/// Convert a string error to a ConfigError
pub fn to_config_error<E: std::fmt::Display>(err: E) -> CoreError {
    CoreError::ConfigError(err.to_string())
}
