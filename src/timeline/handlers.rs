//! Category handlers: translate one raw event into timeline events.
//!
//! Begin/End handlers go through the track registry so a lane is never
//! opened twice. A repeated Begin usually means the trace resumed from an
//! interrupt that swallowed the close; emitting it would draw a nested
//! interval, so it is dropped with a warning. Repeated Ends are emitted as-is.

use super::category::{
    gpio_label, gpio_transition, isr_transition, semaphore_transition, thread_transition,
    Transition,
};
use super::session::ConversionSession;
use super::track::FixedTrack;
use crate::output::schema::Phase;
use crate::parser::RawEvent;
use crate::utils::error::ConvertError;
use log::{debug, warn};
use serde_json::{Map, Value};

const THREAD_INTERVAL_NAME: &str = "running";
const SEMAPHORE_INTERVAL_NAME: &str = "taken";
const ISR_INTERVAL_NAME: &str = "isr_active";

impl Transition {
    fn phase(self) -> Phase {
        match self {
            Transition::Instant => Phase::Instant,
            Transition::Begin => Phase::Begin,
            Transition::End => Phase::End,
        }
    }
}

impl ConversionSession {
    /// Thread lifecycle: one lane per thread id, "running" intervals
    pub(super) fn handle_thread(&mut self, event: &RawEvent) -> Result<(), ConvertError> {
        let transition = thread_transition(&event.name)?;
        let track_id = event.require_u64("thread_id")?;

        if transition == Transition::Instant {
            if let Some(name) = event.field("name") {
                self.registry.ensure(track_id, name.to_text());
            }
            let args = event.coerced_payload(&[]);
            self.emit(track_id, &event.name, Phase::Instant, event.timestamp_us(), args);
            return Ok(());
        }

        let display_name = event
            .field("name")
            .map(|name| name.to_text())
            .unwrap_or_else(|| format!("Thread {:#x}", track_id));

        if !self.open_or_close(track_id, display_name, transition) {
            warn!("Ignoring thread begin event for TID {:#x}", track_id);
            return Ok(());
        }

        if transition == Transition::Begin {
            self.close_isr(event);
        }

        self.emit(
            track_id,
            THREAD_INTERVAL_NAME,
            transition.phase(),
            event.timestamp_us(),
            Map::new(),
        );
        Ok(())
    }

    /// Interrupt entry/exit on the fixed ISR lane
    pub(super) fn handle_isr(&mut self, event: &RawEvent) -> Result<(), ConvertError> {
        let transition = isr_transition(&event.name)?;

        let changed = match transition {
            Transition::Begin => self.isr.enter(),
            _ => self.isr.exit(),
        };

        if !changed {
            debug!(
                "Ignoring duplicate {} at {:.3}us",
                event.name,
                event.timestamp_us()
            );
            return Ok(());
        }

        self.emit(
            FixedTrack::Isr.id(),
            ISR_INTERVAL_NAME,
            transition.phase(),
            event.timestamp_us(),
            Map::new(),
        );
        Ok(())
    }

    /// No thread scheduled: leaves interrupt context, then marks the instant
    pub(super) fn handle_idle(&mut self, event: &RawEvent) -> Result<(), ConvertError> {
        self.close_isr(event);
        self.handle_generic(event, FixedTrack::General)
    }

    /// Semaphore ownership: "taken" intervals on a lane per semaphore id
    pub(super) fn handle_semaphore(&mut self, event: &RawEvent) -> Result<(), ConvertError> {
        let transition = semaphore_transition(&event.name)?;
        let track_id = event.require_u64("id")?;
        let display_name = format!("Semaphore {:02x}", track_id);

        if transition == Transition::Instant {
            self.registry.ensure(track_id, display_name);
            let args = event.coerced_payload(&[]);
            self.emit(track_id, &event.name, Phase::Instant, event.timestamp_us(), args);
            return Ok(());
        }

        if !self.open_or_close(track_id, display_name, transition) {
            warn!("Ignoring semaphore begin event for ID {:#x}", track_id);
            return Ok(());
        }

        self.emit(
            track_id,
            SEMAPHORE_INTERVAL_NAME,
            transition.phase(),
            event.timestamp_us(),
            Map::new(),
        );
        Ok(())
    }

    /// GPIO driver calls: `_enter`/`_exit` pairs on a lane per port
    pub(super) fn handle_gpio(&mut self, event: &RawEvent) -> Result<(), ConvertError> {
        let transition = gpio_transition(&event.name)?;
        let port = event.require_u64("port")?;
        let display_name = format!("GPIO{:02x}", port);
        let args = gpio_args(event, port);

        if transition == Transition::Instant {
            self.registry.ensure(port, display_name);
            self.emit(port, &event.name, Phase::Instant, event.timestamp_us(), args);
            return Ok(());
        }

        if !self.open_or_close(port, display_name, transition) {
            warn!("Ignoring GPIO begin event for port {:#x}", port);
            return Ok(());
        }

        self.emit(
            port,
            gpio_label(&event.name),
            transition.phase(),
            event.timestamp_us(),
            args,
        );
        Ok(())
    }

    /// User markers: labelled by `payload.name`, always on the Custom lane
    pub(super) fn handle_named_marker(&mut self, event: &RawEvent) -> Result<(), ConvertError> {
        let label = event
            .field("name")
            .map(|name| name.to_text())
            .ok_or_else(|| ConvertError::MissingField {
                event: event.name.clone(),
                field: "name",
            })?;

        let args = event.coerced_payload(&["name"]);
        self.emit(
            FixedTrack::Custom.id(),
            label,
            Phase::Instant,
            event.timestamp_us(),
            args,
        );
        Ok(())
    }

    /// Everything without interval tracking: an instant on a fixed lane
    pub(super) fn handle_generic(
        &mut self,
        event: &RawEvent,
        track: FixedTrack,
    ) -> Result<(), ConvertError> {
        self.emit(
            track.id(),
            &event.name,
            Phase::Instant,
            event.timestamp_us(),
            Map::new(),
        );
        Ok(())
    }

    /// Apply a Begin/End to the registry
    ///
    /// **Private** - shared by the interval handlers
    ///
    /// Returns false when the event is a Begin on an already open lane and
    /// must not be emitted.
    fn open_or_close(
        &mut self,
        track_id: u64,
        display_name: String,
        transition: Transition,
    ) -> bool {
        let becoming_active = transition == Transition::Begin;
        let was_active = self.registry.observe(track_id, display_name, becoming_active);

        if was_active && becoming_active {
            self.stats.suppressed_begins += 1;
            return false;
        }
        true
    }

    /// Synthesize the ISR End a preempting thread or idle event implies
    fn close_isr(&mut self, event: &RawEvent) {
        if self.isr.force_close() {
            debug!("Closing ISR implicitly on {}", event.name);
            self.emit(
                FixedTrack::Isr.id(),
                ISR_INTERVAL_NAME,
                Phase::End,
                event.timestamp_us(),
                Map::new(),
            );
        }
    }
}

/// GPIO args: integer payload, with the port as a two-digit hex string
fn gpio_args(event: &RawEvent, port: u64) -> Map<String, Value> {
    let mut args = event.coerced_payload(&["port"]);
    args.insert("port".to_string(), Value::from(format!("0x{:02X}", port)));
    args
}
