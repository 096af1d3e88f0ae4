//! Card value generation.

use serde::{Deserialize, Serialize};

use super::error::{MemoError, Result};
use super::rng::GameRng;
use super::shuffle::shuffle_in_place;

/// The hidden value of a card. Two cells with equal values form a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardValue(pub u16);

impl CardValue {
    /// Create a new card value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Get the raw value as an index into a symbol pool.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deal a shuffled sequence of `cell_count` values where every value in
/// `0..cell_count / 2` appears exactly twice.
///
/// ```
/// use memo_grid::core::{pair_values, GameRng};
///
/// let values = pair_values(6, &mut GameRng::new(1)).unwrap();
/// assert_eq!(values.len(), 6);
/// ```
pub fn pair_values(cell_count: usize, rng: &mut GameRng) -> Result<Vec<CardValue>> {
    if cell_count < 4 || cell_count % 2 != 0 || cell_count / 2 > usize::from(u16::MAX) {
        return Err(MemoError::InvalidCellCount(cell_count));
    }

    let mut values: Vec<CardValue> = (0..cell_count)
        .map(|index| CardValue((index / 2) as u16))
        .collect();
    shuffle_in_place(&mut values, rng);
    Ok(values)
}
