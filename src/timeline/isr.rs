//! Interrupt-context state machine.
//!
//! There is a single ISR lane: at most one interrupt interval is open at a
//! time. Transitions report whether they happened so the caller knows to emit
//! the matching Begin/End.

/// Whether interrupt context is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsrState {
    #[default]
    Inactive,
    Active,
}

#[derive(Debug, Clone, Default)]
pub struct IsrTracker {
    state: IsrState,
}

impl IsrTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> IsrState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == IsrState::Active
    }

    /// Interrupt entry; false if already inside an interrupt
    pub fn enter(&mut self) -> bool {
        self.transition(IsrState::Inactive, IsrState::Active)
    }

    /// Explicit interrupt exit; false if no interrupt was active
    pub fn exit(&mut self) -> bool {
        self.transition(IsrState::Active, IsrState::Inactive)
    }

    /// Implicit exit when a thread resumes or the CPU goes idle
    ///
    /// **Public** - called by the thread-Begin and idle handlers
    ///
    /// Some instrumentation drops the exit event, but the kernel always
    /// leaves interrupt context before running a thread again.
    pub fn force_close(&mut self) -> bool {
        self.exit()
    }

    fn transition(&mut self, from: IsrState, to: IsrState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = to;
        true
    }
}
