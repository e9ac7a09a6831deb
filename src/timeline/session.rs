//! Conversion session: owns all per-run state and drives the dispatch loop.
//!
//! One session converts one trace. Nothing here is global, so several
//! conversions can run side by side (tests do).

use super::category::{classify, EventCategory};
use super::clock::TimestampNormalizer;
use super::isr::IsrTracker;
use super::track::{FixedTrack, TrackRegistry};
use crate::output::schema::{ChromeTrace, Phase, TimelineEvent};
use crate::parser::RawEvent;
use crate::utils::error::{ConvertError, SourceError};
use log::{debug, warn};
use serde_json::{Map, Value};

/// How a run that did not fail ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Source exhausted normally
    Completed,
    /// Source stopped mid-record; everything before it was converted
    Truncated,
}

/// Counters reported once the run ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub raw_events: u64,
    pub emitted_events: u64,
    pub suppressed_begins: u64,
}

#[derive(Debug, Default)]
pub struct ConversionSession {
    pub(super) registry: TrackRegistry,
    pub(super) isr: IsrTracker,
    pub(super) clock: TimestampNormalizer,
    pub(super) events: Vec<TimelineEvent>,
    pub(super) stats: SessionStats,
}

impl ConversionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert every event the source yields
    ///
    /// **Public** - main entry point for the dispatch loop
    ///
    /// # Arguments
    /// * `source` - Raw events in non-decreasing timestamp order
    ///
    /// # Returns
    /// How the source ended. Emitted events stay in the session either way;
    /// call `finish` to get the document.
    ///
    /// # Errors
    /// * `ConvertError::UnknownCategory` / `UnknownSubKind` - unsupported event
    /// * `ConvertError::MissingField` / `InvalidField` - unusable payload
    /// * `ConvertError::Source` - the source failed with anything but truncation
    pub fn run<I>(&mut self, source: I) -> Result<RunOutcome, ConvertError>
    where
        I: IntoIterator<Item = Result<RawEvent, SourceError>>,
    {
        for item in source {
            let event = match item {
                Ok(event) => event,
                Err(e) if e.is_clean_end() => {
                    warn!("{}", e);
                    return Ok(RunOutcome::Truncated);
                }
                Err(e) => return Err(e.into()),
            };

            self.dispatch(&event)?;
        }

        Ok(RunOutcome::Completed)
    }

    /// Route one raw event to its category handler
    ///
    /// **Public** - also usable for event-at-a-time feeding
    pub fn dispatch(&mut self, event: &RawEvent) -> Result<(), ConvertError> {
        let category = classify(&event.name)?;
        self.stats.raw_events += 1;

        match category {
            EventCategory::Thread => self.handle_thread(event),
            EventCategory::NamedMarker => self.handle_named_marker(event),
            EventCategory::Idle => self.handle_idle(event),
            EventCategory::Isr => self.handle_isr(event),
            EventCategory::Semaphore => self.handle_semaphore(event),
            EventCategory::Gpio => self.handle_gpio(event),
            EventCategory::Mutex => self.handle_generic(event, FixedTrack::Mutex),
            EventCategory::Timer => self.handle_generic(event, FixedTrack::Timer),
            EventCategory::Net => self.handle_generic(event, FixedTrack::Net),
            EventCategory::Socket => self.handle_generic(event, FixedTrack::Socket),
        }
    }

    /// Append a timeline event with a freshly normalized timestamp
    ///
    /// **Private** - every handler emits through here
    pub(super) fn emit(
        &mut self,
        track_id: u64,
        name: impl Into<String>,
        phase: Phase,
        origin_us: f64,
        args: Map<String, Value>,
    ) {
        let timestamp_us = self.clock.normalize(origin_us);
        let event = TimelineEvent::new(track_id, name, phase, timestamp_us, args);

        debug!(
            "{:?} '{}' on track {} at {:.3}us",
            event.phase, event.name, event.track_id, timestamp_us
        );

        self.events.push(event);
        self.stats.emitted_events += 1;
    }

    /// Timeline events emitted so far, in order
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    pub fn isr(&self) -> &IsrTracker {
        &self.isr
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Finalize into the output document
    ///
    /// **Public** - must run exactly once, whether or not `run` failed
    ///
    /// Appends one track-name Metadata event per fixed track, then one per
    /// discovered track in id order.
    pub fn finish(self) -> ChromeTrace {
        let mut trace_events = self.events;
        trace_events.reserve(FixedTrack::ALL.len() + self.registry.len());

        trace_events.extend(
            FixedTrack::ALL
                .iter()
                .map(|track| TimelineEvent::track_name(track.id(), track.display_name())),
        );
        trace_events.extend(
            self.registry
                .iter()
                .map(|track| TimelineEvent::track_name(track.id, &track.display_name)),
        );

        ChromeTrace::new(trace_events)
    }
}
