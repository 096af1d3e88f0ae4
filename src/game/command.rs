//! Named commands exposed to the host shell.

use std::rc::Rc;

use crate::core::Result;
use crate::session::GameOutcome;

use super::controller::GameController;

/// Start a new game.
pub const PLAY: &str = "play";
/// Open the settings flow.
pub const SETTINGS: &str = "settings";
/// Fired internally when the grid is solved.
pub const GAME_OVER: &str = "game-over";

/// Argument passed to a command handler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CommandPayload {
    #[default]
    None,
    Outcome(GameOutcome),
}

/// A command handler. Receives the game controller and the payload.
pub type CommandHandler = Rc<dyn Fn(&mut GameController, &CommandPayload) -> Result<()>>;

/// Handlers for `play`, `settings` and `game-over`.
pub(super) fn default_commands() -> [(&'static str, CommandHandler); 3] {
    [
        (PLAY, Rc::new(|game: &mut GameController, _: &CommandPayload| game.new_game())),
        (
            SETTINGS,
            Rc::new(|game: &mut GameController, _: &CommandPayload| {
                game.request_settings();
                Ok(())
            }),
        ),
        (
            GAME_OVER,
            Rc::new(|game: &mut GameController, payload: &CommandPayload| {
                if let CommandPayload::Outcome(outcome) = payload {
                    game.record_outcome(outcome.clone());
                }
                Ok(())
            }),
        ),
    ]
}
