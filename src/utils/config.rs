//! Configuration and constants for the converter.

/// Output file written when `--output` is not given
pub const DEFAULT_OUTPUT_PATH: &str = "out.json";

/// Decoded event stream looked up inside a trace directory
pub const EVENTS_FILE_NAME: &str = "events.jsonl";

/// Smallest step between two emitted timestamps (1ns, in microseconds)
pub const TIMESTAMP_EPSILON_US: f64 = 0.001;

/// Fake duration attached to Complete ("X") events
pub const PLACEHOLDER_DURATION_US: u64 = 10;

// Viewers only show the args panel when at least one arg exists
pub const PLACEHOLDER_ARG_KEY: &str = "dummy";

/// Value of the top-level `displayTimeUnit` key
pub const DISPLAY_TIME_UNIT: &str = "ns";

/// Every event lands in a single synthetic process
pub const TRACE_PID: u64 = 0;

/// Name and category used by track-naming Metadata events
pub const METADATA_EVENT_NAME: &str = "thread_name";
pub const METADATA_CATEGORY: &str = "__metadata";
