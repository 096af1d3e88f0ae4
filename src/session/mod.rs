//! Session controllers: turn grid events into player-facing results.
//!
//! A session controller never sees the grid itself. The game controller feeds
//! it the grid's events through the [`SessionController`] trait:
//!
//! | grid event          | controller call |
//! |---------------------|-----------------|
//! | `reset`             | `on_reset`      |
//! | `start`             | `on_start`      |
//! | `try`, no match     | `on_try`        |
//! | `try`, match        | `on_match`      |
//! | `end`               | `on_end`        |
//!
//! Two implementations ship with the crate:
//!
//! - [`SinglePlayerController`]: stopwatch plus try counter
//! - [`MultiPlayerController`]: turn rotation, per-player scores, ranking

mod multi;
mod score;
mod single;

pub use multi::{MultiPlayerController, MAX_PLAYERS, MIN_PLAYERS, MULTI_CONTROLLER};
pub use score::{
    rank_scores, GameOutcome, PlayerScore, PlayerStanding, RankedScore, SessionSnapshot, SingleResult,
};
pub use single::{SinglePlayerController, SINGLE_CONTROLLER, TIME_PATTERN};

use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Presentation callback, invoked with a fresh snapshot on every change.
pub type Presenter = Box<dyn FnMut(&SessionSnapshot)>;

/// Configuration passed to [`SessionController::activate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Player count. `None` keeps the controller's current count.
    pub players: Option<usize>,
}

impl SessionConfig {
    /// Configuration for a given player count.
    #[must_use]
    pub const fn players(players: usize) -> Self {
        Self {
            players: Some(players),
        }
    }
}

/// Mode-specific session logic.
///
/// ## Implementation Notes
///
/// - `activate`: called when the controller becomes the active one; must
///   leave the controller in its reset state
/// - `on_end`: called once when the last pair is found
/// - `tick`: called whenever the host polls; controllers without
///   time-dependent state can keep the default
pub trait SessionController {
    /// Registry name.
    fn name(&self) -> &str;

    /// Configured player count.
    fn players(&self) -> usize;

    /// Become the active controller.
    fn activate(&mut self, config: &SessionConfig) -> Result<()>;

    /// First card of the game was flipped.
    fn on_start(&mut self);

    /// A pick-pair attempt did not match.
    fn on_try(&mut self);

    /// A pick-pair attempt matched.
    fn on_match(&mut self);

    /// The grid is solved.
    fn on_end(&mut self) -> GameOutcome;

    /// The grid was dealt again.
    fn on_reset(&mut self);

    /// Live snapshot of the session.
    fn result(&self) -> SessionSnapshot;

    /// Deliver time-based updates.
    fn tick(&mut self) {}
}

impl std::fmt::Debug for dyn SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("name", &self.name())
            .field("players", &self.players())
            .finish()
    }
}
