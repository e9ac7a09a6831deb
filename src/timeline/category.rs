//! Event classification.
//!
//! Raw event names are matched against category substrings in a fixed
//! priority order; the first match wins. Within a category, the name further
//! decides whether the event opens, closes, or marks a point in time.

use crate::utils::error::ConvertError;

/// Event family, one handler each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Thread,
    NamedMarker,
    /// No thread scheduled
    Idle,
    Isr,
    Mutex,
    Semaphore,
    Timer,
    Gpio,
    Net,
    Socket,
}

// Order matters: "idle" must be checked before "isr"
const CATEGORY_PATTERNS: &[(&str, EventCategory)] = &[
    ("thread", EventCategory::Thread),
    ("named_event", EventCategory::NamedMarker),
    ("idle", EventCategory::Idle),
    ("isr", EventCategory::Isr),
    ("mutex", EventCategory::Mutex),
    ("semaphore", EventCategory::Semaphore),
    ("timer", EventCategory::Timer),
    ("gpio", EventCategory::Gpio),
    ("net", EventCategory::Net),
    ("socket", EventCategory::Socket),
];

/// Classify an event by name
///
/// **Public** - used by the dispatcher
///
/// # Errors
/// * `ConvertError::UnknownCategory` - name matches no category
pub fn classify(name: &str) -> Result<EventCategory, ConvertError> {
    CATEGORY_PATTERNS
        .iter()
        .find(|(pattern, _)| name.contains(pattern))
        .map(|(_, category)| *category)
        .ok_or_else(|| ConvertError::UnknownCategory(name.to_string()))
}

impl EventCategory {
    pub fn label(self) -> &'static str {
        match self {
            EventCategory::Thread => "thread",
            EventCategory::NamedMarker => "named marker",
            EventCategory::Idle => "idle",
            EventCategory::Isr => "ISR",
            EventCategory::Mutex => "mutex",
            EventCategory::Semaphore => "semaphore",
            EventCategory::Timer => "timer",
            EventCategory::Gpio => "GPIO",
            EventCategory::Net => "net",
            EventCategory::Socket => "socket",
        }
    }
}

/// What an event does to its lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Instant,
    Begin,
    End,
}

const THREAD_INSTANTS: &[&str] = &[
    "info",
    "create",
    "name_set",
    "wakeup",
    "priority_set",
    "pending",
];
const THREAD_BEGINS: &[&str] = &["thread_switched_in", "thread_resume"];
const THREAD_ENDS: &[&str] = &["thread_switched_out", "thread_abort", "thread_suspend"];

const SEMAPHORE_INSTANTS: &[&str] = &["take_blocking", "take_enter", "give_enter"];
const SEMAPHORE_BEGINS: &[&str] = &["take_exit"];
const SEMAPHORE_ENDS: &[&str] = &["give_exit", "reset"];

const GPIO_INSTANT: &str = "file_callback";
const GPIO_BEGIN_SUFFIX: &str = "_enter";
const GPIO_END_SUFFIX: &str = "_exit";

fn contains_any(name: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| name.contains(pattern))
}

/// Instants are checked first, then Begin, then End
fn transition_by_patterns(
    category: EventCategory,
    name: &str,
    instants: &[&str],
    begins: &[&str],
    ends: &[&str],
) -> Result<Transition, ConvertError> {
    if contains_any(name, instants) {
        Ok(Transition::Instant)
    } else if contains_any(name, begins) {
        Ok(Transition::Begin)
    } else if contains_any(name, ends) {
        Ok(Transition::End)
    } else {
        Err(unknown_sub_kind(category, name))
    }
}

pub fn thread_transition(name: &str) -> Result<Transition, ConvertError> {
    transition_by_patterns(
        EventCategory::Thread,
        name,
        THREAD_INSTANTS,
        THREAD_BEGINS,
        THREAD_ENDS,
    )
}

pub fn semaphore_transition(name: &str) -> Result<Transition, ConvertError> {
    transition_by_patterns(
        EventCategory::Semaphore,
        name,
        SEMAPHORE_INSTANTS,
        SEMAPHORE_BEGINS,
        SEMAPHORE_ENDS,
    )
}

pub fn gpio_transition(name: &str) -> Result<Transition, ConvertError> {
    if name.contains(GPIO_INSTANT) {
        Ok(Transition::Instant)
    } else if name.ends_with(GPIO_BEGIN_SUFFIX) {
        Ok(Transition::Begin)
    } else if name.ends_with(GPIO_END_SUFFIX) {
        Ok(Transition::End)
    } else {
        Err(unknown_sub_kind(EventCategory::Gpio, name))
    }
}

/// `isr_enter` opens, `isr_exit` (and `isr_exit_to_scheduler`) closes
pub fn isr_transition(name: &str) -> Result<Transition, ConvertError> {
    if name.contains("isr_enter") {
        Ok(Transition::Begin)
    } else if name.contains("isr_exit") {
        Ok(Transition::End)
    } else {
        Err(unknown_sub_kind(EventCategory::Isr, name))
    }
}

/// Lane label for a GPIO interval: `gpio_pin_toggle_enter` -> `pin_toggle`
pub fn gpio_label(name: &str) -> String {
    name.replace("gpio_", "")
        .replace(GPIO_BEGIN_SUFFIX, "")
        .replace(GPIO_END_SUFFIX, "")
}

fn unknown_sub_kind(category: EventCategory, name: &str) -> ConvertError {
    ConvertError::UnknownSubKind {
        category: category.label(),
        name: name.to_string(),
    }
}
