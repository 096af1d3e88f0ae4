//! # memo-grid
//!
//! The core of a memory-matching card game: a grid of face-down cards,
//! pick-two matching, and single- or multi-player scoring.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: Nothing runs on its own. The host calls methods in
//!    response to input and calls `tick()` to let time-based work happen.
//!
//! 2. **Injected Time and Randomness**: Every delay reads an injected
//!    [`Clock`](core::Clock) and every shuffle draws from a seedable
//!    [`GameRng`](core::GameRng), so whole games replay exactly in tests.
//!
//! 3. **Events as Values**: Grid operations return the events they emit.
//!    The game controller routes them to the active session controller
//!    without callback cycles.
//!
//! ## Modules
//!
//! - `core`: RNG, shuffle, card values, clocks, player ids, errors
//! - `grid`: dimensions, cells, card renderers and the matching engine
//! - `timer`: restartable stopwatch with pattern formatting
//! - `session`: single- and multi-player session controllers, ranking
//! - `game`: the game controller, settings and commands

pub mod core;
pub mod game;
pub mod grid;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{
    CardValue, Clock, GameRng, ManualClock, MemoError, Millis, PlayerId, PlayerMap, Result,
    SharedClock, SystemClock,
};

pub use crate::grid::{
    CardRenderer, CardVisual, CellId, CellState, Dimensions, GridConfig, GridEngine, GridEvent,
    GridEventKind, GridView, SymbolRenderer,
};

pub use crate::timer::{Timer, TimerState};

pub use crate::session::{
    GameOutcome, MultiPlayerController, RankedScore, SessionConfig, SessionController,
    SessionSnapshot, SinglePlayerController,
};

pub use crate::game::{CommandPayload, GameController, Settings, SettingsUpdate};
