//! Raw-event source reading decoded traces.
//!
//! Binary CTF decoding happens upstream; this reads its JSON Lines rendering:
//! one `{"name", "timestamp_ns", "payload"}` object per line.

use super::event::RawEvent;
use crate::utils::config::EVENTS_FILE_NAME;
use crate::utils::error::SourceError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Lazy, non-restartable iterator over raw events
///
/// **Public** - fed to `ConversionSession::run`
///
/// Stops after the first error.
pub struct JsonLinesSource<R> {
    reader: R,
    line_number: usize,
    finished: bool,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            finished: false,
        }
    }

    fn next_event(&mut self) -> Option<Result<RawEvent, SourceError>> {
        let mut line = String::new();

        loop {
            line.clear();
            let read = match self.reader.read_line(&mut line) {
                Ok(read) => read,
                Err(e) => return Some(Err(SourceError::Io(e))),
            };

            if read == 0 {
                return None;
            }

            self.line_number += 1;

            if !line.trim().is_empty() {
                break;
            }
        }

        match serde_json::from_str::<RawEvent>(line.trim()) {
            Ok(event) => Some(Ok(event)),
            // Input ran out mid-record: the recorder stopped while writing
            Err(source) if source.is_eof() && !line.ends_with('\n') => {
                Some(Err(SourceError::Truncated {
                    line: self.line_number,
                }))
            }
            Err(source) => Some(Err(SourceError::Malformed {
                line: self.line_number,
                source,
            })),
        }
    }
}

impl<R: BufRead> Iterator for JsonLinesSource<R> {
    type Item = Result<RawEvent, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.next_event();
        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }
        item
    }
}

/// Open a trace for reading
///
/// **Public** - main entry point for the raw-event source
///
/// # Arguments
/// * `trace_path` - Trace directory (containing `events.jsonl`) or the event file itself
///
/// # Errors
/// * `SourceError::Io` - path missing or unreadable
pub fn open_trace(
    trace_path: impl AsRef<Path>,
) -> Result<JsonLinesSource<BufReader<File>>, SourceError> {
    let events_path = resolve_events_path(trace_path.as_ref());

    info!("Reading events from: {}", events_path.display());

    let file = File::open(&events_path)?;
    Ok(JsonLinesSource::new(BufReader::new(file)))
}

/// Locate the event file for a trace path
///
/// **Private** - internal helper for open_trace
fn resolve_events_path(trace_path: &Path) -> PathBuf {
    if trace_path.is_dir() {
        debug!("Trace path is a directory, looking for {}", EVENTS_FILE_NAME);
        trace_path.join(EVENTS_FILE_NAME)
    } else {
        trace_path.to_path_buf()
    }
}
