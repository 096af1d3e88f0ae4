//! Cells: the arena records behind each grid position.

use serde::{Deserialize, Serialize};

use crate::core::CardValue;

use super::renderer::CardVisual;

/// Index of a cell in the grid's flat, row-major arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub usize);

impl CellId {
    /// Create a new cell ID.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Cell at `(row, column)` in a grid with `columns` columns.
    #[must_use]
    pub const fn at(row: usize, column: usize, columns: usize) -> Self {
        Self(row * columns + column)
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Visual and interaction state of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Face down, clickable.
    #[default]
    Hidden,
    /// Face up, either selected or waiting to flip back.
    Open,
    /// Part of a found pair.
    Matched,
}

/// A card on the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CardValue,
    pub state: CellState,
    /// Visual for the value side.
    pub front: CardVisual,
    /// Visual for the face-down side.
    pub back: CardVisual,
}

impl Cell {
    /// Is this cell face down and clickable?
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == CellState::Hidden
    }

    /// The visual currently showing.
    #[must_use]
    pub fn visible_face(&self) -> &CardVisual {
        match self.state {
            CellState::Hidden => &self.back,
            CellState::Open | CellState::Matched => &self.front,
        }
    }
}
