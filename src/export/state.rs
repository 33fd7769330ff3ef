use std::fmt;

/// Progress of one export invocation.
///
/// ```text
/// Idle -> Exporting -> Downloaded -> Persisting -> Persisted
///            |                           \-> PersistFailed
///            \-> Idle (serializer error)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportState {
    Idle,
    Exporting,
    Downloaded,
    Persisting,
    Persisted,
    PersistFailed,
}

impl ExportState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: ExportState) -> bool {
        use ExportState::*;
        matches!(
            (self, next),
            (Idle, Exporting)
                | (Exporting, Downloaded)
                | (Exporting, Idle)
                | (Downloaded, Persisting)
                | (Persisting, Persisted)
                | (Persisting, PersistFailed)
        )
    }

    /// No further transitions happen from this state within an invocation.
    pub fn is_terminal(self) -> bool {
        matches!(self, ExportState::Persisted | ExportState::PersistFailed)
    }
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportState::Idle => "idle",
            ExportState::Exporting => "exporting",
            ExportState::Downloaded => "downloaded",
            ExportState::Persisting => "persisting",
            ExportState::Persisted => "persisted",
            ExportState::PersistFailed => "persist-failed",
        };
        f.write_str(name)
    }
}

/// The states one invocation passed through, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTrail {
    states: Vec<ExportState>,
}

impl Default for StateTrail {
    fn default() -> Self {
        Self {
            states: vec![ExportState::Idle],
        }
    }
}

impl StateTrail {
    #[inline]
    pub fn current(&self) -> ExportState {
        self.states.last().copied().unwrap_or(ExportState::Idle)
    }

    /// Move to `next`; illegal transitions are a programming error.
    pub(crate) fn advance(&mut self, next: ExportState) {
        debug_assert!(
            self.current().can_transition_to(next),
            "illegal export transition {} -> {}",
            self.current(),
            next
        );
        tracing::trace!(from = %self.current(), to = %next, "export state");
        self.states.push(next);
    }

    #[inline]
    pub fn states(&self) -> &[ExportState] {
        &self.states
    }
}
