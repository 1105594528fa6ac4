//! Utility functions and helpers
//!
//! This module provides helpers used throughout the codebase.

pub mod numeric;

pub use numeric::{is_all_digits, parse_int, parse_int_strict, ParsedInt};

use std::time::Instant;
use log::debug;

/// Measure execution time of a closure and log it at debug level
pub fn measure_time<F, T>(name: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    debug!("{} took {}us", name, elapsed.as_micros());
    result
}
