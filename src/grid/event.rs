//! Grid lifecycle events.
//!
//! The grid emits four kinds of event: `reset`, `start`, `try` and `end`.
//! Each kind has at most one subscriber; registering again replaces the
//! previous callback.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Event kind, used as the subscription key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridEventKind {
    /// The grid was dealt again.
    Reset,
    /// First card flipped since the last reset.
    Start,
    /// A second card was flipped and compared.
    Try,
    /// The last pair was matched.
    End,
}

impl GridEventKind {
    /// All kinds, in table order.
    pub const ALL: [GridEventKind; 4] = [Self::Reset, Self::Start, Self::Try, Self::End];

    const fn slot(self) -> usize {
        match self {
            Self::Reset => 0,
            Self::Start => 1,
            Self::Try => 2,
            Self::End => 3,
        }
    }

    /// Lowercase event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Start => "start",
            Self::Try => "try",
            Self::End => "end",
        }
    }

    /// Parse a lowercase event name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl std::fmt::Display for GridEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An emitted grid event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridEvent {
    Reset,
    Start,
    Try { is_match: bool },
    End,
}

impl GridEvent {
    /// The subscription key for this event.
    #[must_use]
    pub const fn kind(&self) -> GridEventKind {
        match self {
            Self::Reset => GridEventKind::Reset,
            Self::Start => GridEventKind::Start,
            Self::Try { .. } => GridEventKind::Try,
            Self::End => GridEventKind::End,
        }
    }
}

/// Events emitted by one engine call, in order. Never more than three
/// (`start`, `try`, `end`).
pub type Emitted = SmallVec<[GridEvent; 3]>;

/// Callback invoked with each emitted event of its kind.
pub type EventCallback = Box<dyn FnMut(&GridEvent)>;

/// One optional callback per event kind.
#[derive(Default)]
pub struct EventTable {
    slots: [Option<EventCallback>; 4],
}

impl EventTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback, replacing any previous one for the same kind.
    pub fn set(&mut self, kind: GridEventKind, callback: EventCallback) {
        self.slots[kind.slot()] = Some(callback);
    }

    /// Remove the callback for a kind.
    pub fn clear(&mut self, kind: GridEventKind) -> Option<EventCallback> {
        self.slots[kind.slot()].take()
    }

    /// Is a callback registered for this kind?
    #[must_use]
    pub fn has(&self, kind: GridEventKind) -> bool {
        self.slots[kind.slot()].is_some()
    }

    /// Deliver an event to its subscriber, if any.
    pub fn emit(&mut self, event: &GridEvent) {
        if let Some(callback) = self.slots[event.kind().slot()].as_mut() {
            callback(event);
        }
    }
}

impl std::fmt::Debug for EventTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subscribed: Vec<_> = GridEventKind::ALL
            .into_iter()
            .filter(|kind| self.has(*kind))
            .collect();
        f.debug_struct("EventTable")
            .field("subscribed", &subscribed)
            .finish()
    }
}
