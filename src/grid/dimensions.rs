//! Grid dimensions and their validation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{MemoError, Result};

/// Rows and columns of a card grid.
///
/// A valid grid has each side in [`Dimensions::MIN`]..=[`Dimensions::MAX`]
/// and an even number of cells, so every card has a partner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    /// Smallest allowed side.
    pub const MIN: usize = 2;
    /// Largest allowed side.
    pub const MAX: usize = 8;

    /// Create validated dimensions.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        let dims = Self { rows, columns };
        dims.validate()?;
        Ok(dims)
    }

    /// Check the side range and cell parity.
    pub fn validate(&self) -> Result<()> {
        let in_range = |n: usize| (Self::MIN..=Self::MAX).contains(&n);
        if !in_range(self.rows) || !in_range(self.columns) || self.cell_count() % 2 != 0 {
            return Err(MemoError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Number of pairs on a full grid.
    #[must_use]
    pub const fn pair_count(&self) -> usize {
        self.cell_count() / 2
    }

    /// Orient for a portrait viewport: when the viewport is taller than wide,
    /// the longer side becomes the rows.
    #[must_use]
    pub fn oriented_for(self, viewport: Viewport) -> Self {
        if viewport.is_portrait() {
            Self {
                rows: self.rows.max(self.columns),
                columns: self.rows.min(self.columns),
            }
        } else {
            self
        }
    }

    /// The orientation-free label used by the settings dialog: `"{short}x{long}"`.
    #[must_use]
    pub fn dialog_label(&self) -> String {
        format!("{}x{}", self.rows.min(self.columns), self.rows.max(self.columns))
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { rows: 4, columns: 5 }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Parses `"ROWSxCOLUMNS"` and validates the result.
impl FromStr for Dimensions {
    type Err = MemoError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || MemoError::InvalidDimensionsFormat(s.to_string());
        let (rows, columns) = s.trim().split_once(['x', 'X']).ok_or_else(malformed)?;
        let rows = rows.trim().parse().map_err(|_| malformed())?;
        let columns = columns.trim().parse().map_err(|_| malformed())?;
        Self::new(rows, columns)
    }
}

/// Viewport size as reported by the host shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Taller than wide.
    #[must_use]
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}
