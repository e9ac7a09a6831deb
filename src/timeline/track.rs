//! Track registry: timeline lanes and their running/idle state.

use std::collections::BTreeMap;

/// Built-in lanes with reserved ids 0-7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedTrack {
    General,
    Isr,
    Mutex,
    Semaphore,
    Timer,
    Net,
    Socket,
    Custom,
}

impl FixedTrack {
    /// All fixed tracks, in id order
    pub const ALL: [FixedTrack; 8] = [
        FixedTrack::General,
        FixedTrack::Isr,
        FixedTrack::Mutex,
        FixedTrack::Semaphore,
        FixedTrack::Timer,
        FixedTrack::Net,
        FixedTrack::Socket,
        FixedTrack::Custom,
    ];

    pub fn id(self) -> u64 {
        match self {
            FixedTrack::General => 0,
            FixedTrack::Isr => 1,
            FixedTrack::Mutex => 2,
            FixedTrack::Semaphore => 3,
            FixedTrack::Timer => 4,
            FixedTrack::Net => 5,
            FixedTrack::Socket => 6,
            FixedTrack::Custom => 7,
        }
    }

    /// Canonical lane name shown by viewers
    pub fn display_name(self) -> &'static str {
        match self {
            FixedTrack::General => "general",
            FixedTrack::Isr => "ISR context",
            FixedTrack::Mutex => "Mutex",
            FixedTrack::Semaphore => "Semaphore",
            FixedTrack::Timer => "Timer",
            FixedTrack::Net => "Net",
            FixedTrack::Socket => "Socket",
            FixedTrack::Custom => "Custom",
        }
    }
}

/// A dynamically discovered lane (thread, semaphore, GPIO port)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: u64,

    /// Set on first observation, never updated
    pub display_name: String,

    /// Whether the lane currently holds an open interval
    pub active: bool,
}

/// Registry of discovered tracks, keyed by id
#[derive(Debug, Clone, Default)]
pub struct TrackRegistry {
    tracks: BTreeMap<u64, Track>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a Begin/End transition on a track
    ///
    /// **Public** - called by every Begin/End-producing handler
    ///
    /// # Arguments
    /// * `track_id` - Lane id
    /// * `display_name` - Name used if the lane is unseen
    /// * `becoming_active` - true for Begin, false for End
    ///
    /// # Returns
    /// The lane's previous `active` state; false for an unseen lane
    pub fn observe(
        &mut self,
        track_id: u64,
        display_name: impl Into<String>,
        becoming_active: bool,
    ) -> bool {
        match self.tracks.get_mut(&track_id) {
            Some(track) => std::mem::replace(&mut track.active, becoming_active),
            None => {
                self.tracks.insert(
                    track_id,
                    Track {
                        id: track_id,
                        display_name: display_name.into(),
                        active: becoming_active,
                    },
                );
                false
            }
        }
    }

    /// Register a lane name without touching its state
    ///
    /// Returns true if the lane was unseen. Unseen lanes start inactive.
    pub fn ensure(&mut self, track_id: u64, display_name: impl Into<String>) -> bool {
        if self.tracks.contains_key(&track_id) {
            return false;
        }

        self.tracks.insert(
            track_id,
            Track {
                id: track_id,
                display_name: display_name.into(),
                active: false,
            },
        );
        true
    }

    pub fn get(&self, track_id: u64) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    /// Tracks in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_unseen_track() {
        let mut registry = TrackRegistry::new();

        assert!(!registry.observe(0x2000, "main", true));
        assert!(registry.get(0x2000).unwrap().active);
    }

    #[test]
    fn test_observe_reports_previous_state() {
        let mut registry = TrackRegistry::new();
        registry.observe(5, "worker", true);

        assert!(registry.observe(5, "worker", true));
        assert!(registry.observe(5, "worker", false));
        assert!(!registry.observe(5, "worker", false));
    }

    #[test]
    fn test_display_name_is_immutable() {
        let mut registry = TrackRegistry::new();
        registry.observe(9, "first", true);
        registry.observe(9, "second", false);
        registry.ensure(9, "third");

        assert_eq!(registry.get(9).unwrap().display_name, "first");
    }

    #[test]
    fn test_ensure_keeps_state() {
        let mut registry = TrackRegistry::new();
        assert!(registry.ensure(3, "Semaphore 03"));
        assert!(!registry.get(3).unwrap().active);

        registry.observe(3, "Semaphore 03", true);
        assert!(!registry.ensure(3, "Semaphore 03"));
        assert!(registry.get(3).unwrap().active);
    }

    #[test]
    fn test_fixed_track_ids_are_sequential() {
        for (index, track) in FixedTrack::ALL.iter().enumerate() {
            assert_eq!(track.id(), index as u64);
        }
    }
}
