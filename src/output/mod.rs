//! Chrome trace output.
//!
//! This module handles:
//! - The Trace Event format schema
//! - Writing (and reading back) trace documents

pub mod json;
pub mod schema;

// Re-export main types and functions
pub use json::{read_trace, validate_path, write_trace};
pub use schema::{ChromeTrace, Phase, TimelineEvent};
