//! Core building blocks: RNG, shuffling, card values, clocks, errors.
//!
//! Nothing in here knows about grids or sessions; the higher layers are
//! built on top of these.

pub mod clock;
pub mod error;
pub mod player;
pub mod rng;
pub mod shuffle;
pub mod values;

pub use clock::{Clock, ManualClock, Millis, SharedClock, SystemClock};
pub use error::{MemoError, Result};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use shuffle::{shuffle_in_place, shuffled};
pub use values::{pair_values, CardValue};
