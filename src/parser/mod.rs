//! Raw trace input.
//!
//! This module handles:
//! - The raw event model (name, clock snapshot, payload)
//! - Reading decoded event streams from disk

pub mod event;
pub mod source;

// Re-export main types
pub use event::{FieldValue, RawEvent};
pub use source::{open_trace, JsonLinesSource};
