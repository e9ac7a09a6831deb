//! Chrome Trace Event format definitions.
//!
//! This module defines the structure of the JSON document we write to disk,
//! as understood by chrome://tracing, Perfetto and friends.

use crate::utils::config::{
    DISPLAY_TIME_UNIT, METADATA_CATEGORY, METADATA_EVENT_NAME, PLACEHOLDER_ARG_KEY,
    PLACEHOLDER_DURATION_US, TRACE_PID,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level document written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromeTrace {
    /// All events, timeline first, then track metadata
    #[serde(rename = "traceEvents")]
    pub trace_events: Vec<TimelineEvent>,

    #[serde(rename = "displayTimeUnit")]
    pub display_time_unit: String,
}

impl ChromeTrace {
    pub fn new(trace_events: Vec<TimelineEvent>) -> Self {
        Self {
            trace_events,
            display_time_unit: DISPLAY_TIME_UNIT.to_string(),
        }
    }
}

/// Event phase (`ph` key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "B")]
    Begin,
    #[serde(rename = "E")]
    End,
    #[serde(rename = "X")]
    Complete,
    #[serde(rename = "i")]
    Instant,
    #[serde(rename = "M")]
    Metadata,
}

/// A single event on the timeline
///
/// Never mutated once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub pid: u64,

    /// Track (lane) id
    #[serde(rename = "tid")]
    pub track_id: u64,

    pub name: String,

    #[serde(rename = "ph")]
    pub phase: Phase,

    #[serde(rename = "cat", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Microseconds; absent on Metadata events
    #[serde(rename = "ts", default, skip_serializing_if = "Option::is_none")]
    pub timestamp_us: Option<f64>,

    /// Fixed placeholder on Complete events
    #[serde(rename = "dur", default, skip_serializing_if = "Option::is_none")]
    pub duration_us: Option<u64>,

    /// Never empty
    pub args: Map<String, Value>,
}

impl TimelineEvent {
    /// Build a timestamped event
    ///
    /// **Public** - used by the session for every emitted event
    ///
    /// Empty `args` get a placeholder key so viewers still show the panel.
    pub fn new(
        track_id: u64,
        name: impl Into<String>,
        phase: Phase,
        timestamp_us: f64,
        args: Map<String, Value>,
    ) -> Self {
        let duration_us = (phase == Phase::Complete).then_some(PLACEHOLDER_DURATION_US);

        Self {
            pid: TRACE_PID,
            track_id,
            name: name.into(),
            phase,
            category: None,
            timestamp_us: Some(timestamp_us),
            duration_us,
            args: with_placeholder(args),
        }
    }

    /// Build a Metadata event naming a track
    pub fn track_name(track_id: u64, display_name: &str) -> Self {
        let mut args = Map::new();
        args.insert("name".to_string(), Value::from(display_name));

        Self {
            pid: TRACE_PID,
            track_id,
            name: METADATA_EVENT_NAME.to_string(),
            phase: Phase::Metadata,
            category: Some(METADATA_CATEGORY.to_string()),
            timestamp_us: None,
            duration_us: None,
            args,
        }
    }
}

/// Insert the placeholder arg into an empty map
///
/// **Private** - internal helper for TimelineEvent::new
fn with_placeholder(mut args: Map<String, Value>) -> Map<String, Value> {
    if args.is_empty() {
        args.insert(PLACEHOLDER_ARG_KEY.to_string(), Value::from(0));
    }
    args
}
