//! The grid-matching engine.
//!
//! Owns every card on the board and runs the pick-two state machine:
//!
//! ```text
//!   Hidden --click--> Open --(second pick matches)--> Matched
//!                       \--(second pick differs)--> Open until the
//!                            flip-back delay elapses --> Hidden
//! ```
//!
//! At most one cell is *selected* (open and waiting for its partner). Cells
//! that are open or matched ignore clicks, so the two cards of a failed try
//! cannot be picked again until they have flipped back.
//!
//! Every call that emits events both delivers them to the subscribed
//! callbacks and returns them, in emission order, so an owner can route them
//! without holding a reference back into itself.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{pair_values, CardValue, GameRng, Millis, Result, SharedClock, SystemClock};

use super::cell::{Cell, CellId, CellState};
use super::dimensions::Dimensions;
use super::event::{Emitted, EventCallback, EventTable, GridEvent, GridEventKind};
use super::renderer::{CardRenderer, CardVisual};
use super::themes::SymbolRenderer;

/// Default delay before a mismatched pair flips back.
pub const FLIP_BACK_DELAY_MS: Millis = 800;

/// Configuration for a [`GridEngine`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Initial board size.
    pub dimensions: Dimensions,

    /// How long a mismatched pair stays face up.
    pub flip_back_delay: Millis,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            flip_back_delay: FLIP_BACK_DELAY_MS,
            seed: None,
        }
    }
}

impl GridConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial dimensions (validated when the engine is built).
    #[must_use]
    pub fn with_dimensions(mut self, rows: usize, columns: usize) -> Self {
        self.dimensions = Dimensions { rows, columns };
        self
    }

    /// Set the flip-back delay.
    #[must_use]
    pub fn with_flip_back_delay(mut self, delay: Millis) -> Self {
        self.flip_back_delay = delay;
        self
    }

    /// Seed the RNG for a reproducible deal.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A mismatched pair waiting to flip back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingFlip {
    cells: [CellId; 2],
    due_at: Millis,
}

/// Read-only view of one cell for presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub id: CellId,
    pub state: CellState,
    pub face: CardVisual,
}

/// Serializable snapshot of the whole board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridView {
    pub dimensions: Dimensions,
    pub cells: Vec<CellView>,
    pub unmatched_pairs: usize,
    pub started: bool,
}

/// The grid-matching engine.
#[derive(Debug)]
pub struct GridEngine {
    dimensions: Dimensions,
    cells: Vec<Cell>,
    selected: Option<CellId>,
    unmatched_pairs: usize,
    started: bool,
    renderer: Box<dyn CardRenderer>,
    clock: SharedClock,
    rng: GameRng,
    /// Stream for renderer pool shuffles; independent of the value deal.
    symbol_rng: GameRng,
    flip_back_delay: Millis,
    pending: SmallVec<[PendingFlip; 4]>,
    events: EventTable,
}

impl GridEngine {
    /// Build an engine and deal the first board.
    ///
    /// No `reset` event is emitted for the initial deal since nothing can be
    /// subscribed yet.
    pub fn new(config: GridConfig, renderer: Box<dyn CardRenderer>, clock: SharedClock) -> Result<Self> {
        config.dimensions.validate()?;

        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };

        let mut engine = Self {
            dimensions: config.dimensions,
            cells: Vec::new(),
            selected: None,
            unmatched_pairs: 0,
            started: false,
            renderer,
            clock,
            symbol_rng: rng.for_context("symbols"),
            rng,
            flip_back_delay: config.flip_back_delay,
            pending: SmallVec::new(),
            events: EventTable::new(),
        };
        engine.deal()?;
        Ok(engine)
    }

    /// Engine with the default config, the `numbers` theme and the wall clock.
    pub fn with_defaults() -> Result<Self> {
        Self::new(
            GridConfig::default(),
            Box::new(SymbolRenderer::numbers()),
            SystemClock::shared(),
        )
    }

    // === Configuration ===

    /// Change the board size.
    ///
    /// Fails with `InvalidDimensions` without touching any state. Setting the
    /// current size again is a no-op. With `reset_after` the board is dealt
    /// again and the `reset` event returned.
    pub fn set_dimensions(&mut self, rows: usize, columns: usize, reset_after: bool) -> Result<Emitted> {
        let dimensions = Dimensions::new(rows, columns)?;
        if dimensions == self.dimensions {
            return Ok(Emitted::new());
        }

        debug!(from = %self.dimensions, to = %dimensions, "grid resized");
        self.dimensions = dimensions;

        if reset_after {
            self.reset()
        } else {
            Ok(Emitted::new())
        }
    }

    /// Swap the renderer and re-skin the current board in place.
    ///
    /// Values and cell states are kept.
    pub fn set_card_renderer(&mut self, renderer: Box<dyn CardRenderer>) {
        debug!(theme = renderer.theme(), "card renderer replaced");
        self.renderer = renderer;
        self.renderer.reset(&mut self.symbol_rng);

        let back = self.renderer.create_card_visual(None);
        for cell in &mut self.cells {
            cell.front = self.renderer.create_card_visual(Some(cell.value));
            cell.back = back.clone();
        }
    }

    /// Subscribe to an event kind. Replaces any previous subscriber.
    pub fn on(&mut self, kind: GridEventKind, callback: impl FnMut(&GridEvent) + 'static) -> &mut Self {
        let callback: EventCallback = Box::new(callback);
        self.events.set(kind, callback);
        self
    }

    /// Subscribe by event name. Unknown names are ignored.
    pub fn on_named(&mut self, name: &str, callback: impl FnMut(&GridEvent) + 'static) -> &mut Self {
        if let Some(kind) = GridEventKind::from_name(name) {
            self.on(kind, callback);
        }
        self
    }

    // === Game flow ===

    /// Deal a fresh board and emit `reset`.
    ///
    /// Pending flip-backs from the previous board are cancelled.
    pub fn reset(&mut self) -> Result<Emitted> {
        self.deal()?;
        debug!(dimensions = %self.dimensions, pairs = self.unmatched_pairs, "grid reset");

        let mut emitted = Emitted::new();
        self.emit(GridEvent::Reset, &mut emitted);
        Ok(emitted)
    }

    /// Handle a click on a cell.
    ///
    /// Clicks on open or matched cells, and on ids outside the board, are
    /// ignored and return no events.
    pub fn on_card_interaction(&mut self, id: CellId) -> Emitted {
        let mut emitted = Emitted::new();

        match self.cells.get(id.index()) {
            Some(cell) if cell.is_hidden() => {}
            _ => return emitted,
        }

        self.cells[id.index()].state = CellState::Open;
        trace!(cell = %id, "card opened");

        if !self.started {
            self.started = true;
            self.emit(GridEvent::Start, &mut emitted);
        }

        let Some(selected) = self.selected.take() else {
            self.selected = Some(id);
            return emitted;
        };

        let is_match = self.cells[selected.index()].value == self.cells[id.index()].value;
        if is_match {
            self.cells[selected.index()].state = CellState::Matched;
            self.cells[id.index()].state = CellState::Matched;
            self.unmatched_pairs -= 1;
            debug!(first = %selected, second = %id, remaining = self.unmatched_pairs, "pair matched");

            self.emit(GridEvent::Try { is_match: true }, &mut emitted);
            if self.unmatched_pairs == 0 {
                debug!("grid solved");
                self.emit(GridEvent::End, &mut emitted);
            }
        } else {
            let due_at = self.clock.now().saturating_add(self.flip_back_delay);
            self.pending.push(PendingFlip {
                cells: [selected, id],
                due_at,
            });
            debug!(first = %selected, second = %id, due_at, "pair mismatched");

            self.emit(GridEvent::Try { is_match: false }, &mut emitted);
        }

        emitted
    }

    /// Flip back every mismatched pair whose delay has elapsed.
    ///
    /// Returns the number of pairs flipped back.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.pending.len();
        let cells = &mut self.cells;

        self.pending.retain(|flip| {
            if flip.due_at > now {
                return true;
            }
            for id in flip.cells {
                if let Some(cell) = cells.get_mut(id.index()) {
                    if cell.state == CellState::Open {
                        cell.state = CellState::Hidden;
                    }
                }
            }
            false
        });

        before - self.pending.len()
    }

    // === Queries ===

    /// Current board size.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A single cell.
    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// State of a cell.
    #[must_use]
    pub fn cell_state(&self, id: CellId) -> Option<CellState> {
        self.cell(id).map(|c| c.state)
    }

    /// Value of a cell.
    #[must_use]
    pub fn cell_value(&self, id: CellId) -> Option<CardValue> {
        self.cell(id).map(|c| c.value)
    }

    /// The open cell waiting for its partner.
    #[must_use]
    pub fn selected(&self) -> Option<CellId> {
        self.selected
    }

    /// Pairs not yet matched.
    #[must_use]
    pub fn unmatched_pairs(&self) -> usize {
        self.unmatched_pairs
    }

    /// Has a card been flipped since the last reset?
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Are all cells matched?
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.unmatched_pairs == 0
    }

    /// Mismatched pairs still waiting to flip back.
    #[must_use]
    pub fn pending_flip_backs(&self) -> usize {
        self.pending.len()
    }

    /// Theme of the current renderer.
    #[must_use]
    pub fn theme(&self) -> &str {
        self.renderer.theme()
    }

    /// Snapshot for presentation.
    #[must_use]
    pub fn view(&self) -> GridView {
        GridView {
            dimensions: self.dimensions,
            cells: self
                .cells
                .iter()
                .enumerate()
                .map(|(index, cell)| CellView {
                    id: CellId::new(index),
                    state: cell.state,
                    face: cell.visible_face().clone(),
                })
                .collect(),
            unmatched_pairs: self.unmatched_pairs,
            started: self.started,
        }
    }

    // === Internals ===

    fn deal(&mut self) -> Result<()> {
        let cell_count = self.dimensions.cell_count();
        let values = pair_values(cell_count, &mut self.rng)?;

        self.renderer.reset(&mut self.symbol_rng);
        let back = self.renderer.create_card_visual(None);

        self.cells = values
            .into_iter()
            .map(|value| Cell {
                value,
                state: CellState::Hidden,
                front: self.renderer.create_card_visual(Some(value)),
                back: back.clone(),
            })
            .collect();

        self.unmatched_pairs = cell_count / 2;
        self.selected = None;
        self.started = false;
        self.pending.clear();
        Ok(())
    }

    fn emit(&mut self, event: GridEvent, emitted: &mut Emitted) {
        self.events.emit(&event);
        emitted.push(event);
    }
}
