//! The card grid: dimensions, cells, renderers and the matching engine.
//!
//! ## Key Components
//!
//! - [`Dimensions`]: validated rows and columns
//! - [`CellId`] / [`Cell`]: flat arena of cards, addressed by index
//! - [`CardRenderer`]: capability that turns values into visuals
//! - [`GridEngine`]: the pick-two state machine and its events
//!
//! ## Example Usage
//!
//! ```
//! use memo_grid::core::ManualClock;
//! use memo_grid::grid::{CellId, GridConfig, GridEngine, GridEvent, SymbolRenderer};
//!
//! let clock = ManualClock::shared();
//! let mut grid = GridEngine::new(
//!     GridConfig::new().with_dimensions(2, 2).with_seed(7),
//!     Box::new(SymbolRenderer::numbers()),
//!     clock.clone(),
//! )
//! .unwrap();
//!
//! let events = grid.on_card_interaction(CellId::new(0));
//! assert_eq!(events.as_slice(), &[GridEvent::Start]);
//! ```

mod cell;
mod dimensions;
mod engine;
mod event;
mod renderer;
mod themes;

pub use cell::{Cell, CellId, CellState};
pub use dimensions::{Dimensions, Viewport};
pub use engine::{CellView, GridConfig, GridEngine, GridView, FLIP_BACK_DELAY_MS};
pub use event::{Emitted, EventCallback, EventTable, GridEvent, GridEventKind};
pub use renderer::{CardFace, CardRenderer, CardVisual};
pub use themes::{renderer_for_theme, SymbolRenderer, BACK_LABEL, COLORS_THEME, NUMBERS_THEME};
