//! Survey Payload Builder - turns survey editing state into SQL-ready payloads
//!
//! This is the root crate that provides workspace-level documentation.
//! Actual implementation is in the subcrates:
//! - `survey-payload-core`: Entity store, advisory validation and the payload transform
//! - `survey-payload-client`: Client for the SQL generation service
//! - `survey-payload-cli`: Command-line driver for transforming and submitting snapshots

/// Returns the version of the package.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
