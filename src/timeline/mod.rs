//! Event classification and timeline synthesis.
//!
//! This module turns raw kernel events into timeline events:
//! - Classifying each event into a category
//! - Tracking lane and interrupt state across events
//! - Inferring interrupt exits the trace does not record
//! - Keeping emitted timestamps strictly increasing

pub mod category;
pub mod clock;
mod handlers;
pub mod isr;
pub mod session;
pub mod track;

// Re-export main types
pub use category::{classify, EventCategory, Transition};
pub use clock::TimestampNormalizer;
pub use isr::{IsrState, IsrTracker};
pub use session::{ConversionSession, RunOutcome, SessionStats};
pub use track::{FixedTrack, Track, TrackRegistry};
