//! JSON trace output writer.
//!
//! Writes finished Chrome traces to disk.

use super::schema::ChromeTrace;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a trace document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `trace` - Finished trace document
/// * `output_path` - Path to output JSON file
/// * `pretty` - Indent the output instead of writing it compact
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_trace(
    trace: &ChromeTrace,
    output_path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing trace to: {}", output_path.display());

    validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, trace)?;
    } else {
        serde_json::to_writer(&mut writer, trace)?;
    }
    writer.flush()?;

    info!(
        "Trace written successfully ({} events, {} bytes)",
        trace.trace_events.len(),
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Validate that output path is writable
///
/// **Public** - also used by the convert command before reading the trace
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a trace document back from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_trace(input_path: impl AsRef<Path>) -> Result<ChromeTrace, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading trace from: {}", input_path.display());

    let file = File::open(input_path)?;
    let trace: ChromeTrace = serde_json::from_reader(std::io::BufReader::new(file))?;

    debug!("Trace loaded: {} events", trace.trace_events.len());

    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::schema::{Phase, TimelineEvent};
    use serde_json::Map;
    use tempfile::NamedTempFile;

    fn create_test_trace() -> ChromeTrace {
        ChromeTrace::new(vec![
            TimelineEvent::new(1, "isr_active", Phase::Begin, 1.0, Map::new()),
            TimelineEvent::new(1, "isr_active", Phase::End, 2.0, Map::new()),
            TimelineEvent::track_name(1, "ISR context"),
        ])
    }

    #[test]
    fn test_write_and_read_trace() {
        let trace = create_test_trace();
        let temp_file = NamedTempFile::new().unwrap();

        write_trace(&trace, temp_file.path(), false).unwrap();
        let loaded = read_trace(temp_file.path()).unwrap();

        assert_eq!(loaded, trace);
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let temp_file = NamedTempFile::new().unwrap();

        write_trace(&create_test_trace(), temp_file.path(), true).unwrap();
        let text = std::fs::read_to_string(temp_file.path()).unwrap();

        assert!(text.contains("\n  \"traceEvents\""));
    }

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }
}
