//! Seats at a same-screen multi-player table.
//!
//! [`PlayerId`] is a 0-based seat index; people see it 1-based. [`PlayerMap`]
//! holds one value per seat in seating order.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat index, 0-based. Up to 255 seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The number shown to players (1-based).
    #[must_use]
    pub const fn number(self) -> u16 {
        self.0 as u16 + 1
    }

    /// The next seat at a table of `player_count`, wrapping after the last.
    #[must_use]
    pub const fn next(self, player_count: usize) -> Self {
        if self.index() + 1 >= player_count {
            Self(0)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Every seat at a table of `player_count`.
    ///
    /// ```
    /// use memo_grid::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).map(PlayerId::number).collect();
    /// assert_eq!(seats, vec![1, 2, 3]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(256)).map(|i| PlayerId(i as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// One value per seat, indexed by [`PlayerId`].
///
/// ```
/// use memo_grid::core::{PlayerId, PlayerMap};
///
/// let mut tries = PlayerMap::new(2, |_| 0u32);
/// tries[PlayerId::new(1)] += 1;
/// assert_eq!(tries.values().copied().collect::<Vec<_>>(), vec![0, 1]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build a map, filling each seat from `factory`.
    ///
    /// Callers validate `player_count` before building a map.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        debug_assert!((1..=255).contains(&player_count), "player count out of range");
        Self {
            seats: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.seats.get(player.index())
    }

    /// Seats with their values, in seating order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.seats.iter().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Values in seating order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.seats.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }
}
