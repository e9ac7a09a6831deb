use crate::timeline::{RunOutcome, SessionStats};
use crate::utils::config::DEFAULT_OUTPUT_PATH;
use std::fmt;
use std::path::PathBuf;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Trace directory or decoded event file
    pub trace_path: PathBuf,

    /// Output path for the Chrome trace JSON
    pub output_path: PathBuf,

    /// Indent the JSON output
    pub pretty: bool,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::new(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            pretty: false,
        }
    }
}

/// What a successful conversion produced
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub outcome: RunOutcome,
    pub stats: SessionStats,

    /// Discovered (non-fixed) tracks
    pub track_count: usize,

    pub output_path: PathBuf,
}

impl ConversionSummary {
    /// One-line description printed when the command finishes
    pub fn describe(&self) -> String {
        let ending = match self.outcome {
            RunOutcome::Completed => "",
            RunOutcome::Truncated => " (trace truncated)",
        };

        format!(
            "{} raw events -> {} timeline events on {} tracks, {} duplicate begins dropped{}",
            self.stats.raw_events,
            self.stats.emitted_events,
            self.track_count,
            self.stats.suppressed_begins,
            ending
        )
    }
}

/// Context attached to a fatal conversion error once the partial timeline
/// has been written
#[derive(Debug, Clone, PartialEq)]
pub struct PartialConversion {
    pub emitted_events: u64,
    pub output_path: PathBuf,
}

impl fmt::Display for PartialConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trace partially converted; {} events written to {}",
            self.emitted_events,
            self.output_path.display()
        )
    }
}
