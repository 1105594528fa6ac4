//! # Survey Payload Core
//!
//! Editing-state models, the entity store and the payload transform that
//! turns a store snapshot into the document the SQL generation service
//! consumes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod transform;
pub mod utils;
pub mod validation;

/// Re-export common types for ease of use
pub use config::{NumericPolicy, TransformConfig};
pub use error::{CoreError, Result};
pub use models::{Reference, Snapshot};
pub use store::{EntityStore, StoreAction};
pub use transform::{transform_payload, PayloadTransformer, SubmissionDocument};
pub use validation::{SubmissionValidator, ValidationReport};

/// Version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decode a JSON snapshot and transform it with the given configuration
///
/// A snapshot without its own `db_name` takes the configured one.
pub fn transform_json(json: &str, config: &TransformConfig) -> Result<SubmissionDocument> {
    let snapshot = Snapshot::from_json_with_default(json, &config.db_name)?;
    PayloadTransformer::from_config(config).transform(&snapshot)
}
