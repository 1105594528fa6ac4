//! Client library for the SQL generation service
//!
//! This library posts normalized survey documents to the service and
//! returns the SQL text it generates.

pub mod submit;

pub use submit::{submit_store, SqlClient, SubmitError, Result};
