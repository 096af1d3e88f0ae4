//! Game orchestration.
//!
//! ## Key Components
//!
//! - [`GameController`]: owns the grid and the session controller registry,
//!   routes grid events to the active controller
//! - [`Settings`] / [`SettingsUpdate`]: full and partial session settings
//! - Commands: `play`, `settings` and `game-over`, invoked through
//!   [`GameController::exec`]
//!
//! ## Example Usage
//!
//! ```
//! use memo_grid::core::ManualClock;
//! use memo_grid::game::{CommandPayload, GameController, PLAY, SETTINGS};
//! use memo_grid::grid::{GridConfig, GridEngine, SymbolRenderer};
//!
//! let clock = ManualClock::shared();
//! let grid = GridEngine::new(GridConfig::new().with_seed(1), Box::new(SymbolRenderer::numbers()), clock.clone())
//!     .unwrap();
//! let mut game = GameController::standard(grid, clock).unwrap();
//!
//! game.exec(SETTINGS, &CommandPayload::None).unwrap();
//! let mut settings = game.settings();
//! settings.players = 3;
//! assert!(game.submit_settings(Some(settings)).unwrap());
//! assert_eq!(game.active_name(), Some("multi"));
//!
//! assert!(game.exec(PLAY, &CommandPayload::None).unwrap());
//! ```

mod command;
mod controller;
mod settings;

pub use command::{CommandHandler, CommandPayload, GAME_OVER, PLAY, SETTINGS};
pub use controller::{GameController, OutcomePresenter};
pub use settings::{DimensionsUpdate, Settings, SettingsForm, SettingsUpdate};
