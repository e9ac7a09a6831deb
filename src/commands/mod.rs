//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod convert;
pub mod models;

// Re-export main command functions
pub use convert::{convert_events, execute_convert, validate_args};
pub use models::{ConversionSummary, ConvertArgs, PartialConversion};
