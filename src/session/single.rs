//! Single-player session: a stopwatch and a try counter.

use tracing::debug;

use crate::core::{Result, SharedClock};
use crate::timer::Timer;

use super::score::{GameOutcome, SessionSnapshot, SingleResult};
use super::{Presenter, SessionConfig, SessionController};

/// Pattern used for the elapsed time shown to the player.
pub const TIME_PATTERN: &str = "M:ss";

/// Registry name of the single-player controller.
pub const SINGLE_CONTROLLER: &str = "single";

/// Times the session from the first flip to the last match and counts tries.
///
/// A match counts as a try too.
pub struct SinglePlayerController {
    timer: Timer,
    tries: u32,
    presenter: Option<Presenter>,
}

impl SinglePlayerController {
    /// Create a controller timing with `clock`.
    pub fn new(clock: SharedClock) -> Self {
        Self {
            timer: Timer::new(clock),
            tries: 0,
            presenter: None,
        }
    }

    /// Bind the presentation callback (builder pattern).
    #[must_use]
    pub fn with_presenter(mut self, presenter: impl FnMut(&SessionSnapshot) + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    /// Bind or replace the presentation callback.
    pub fn set_presenter(&mut self, presenter: impl FnMut(&SessionSnapshot) + 'static) {
        self.presenter = Some(Box::new(presenter));
    }

    /// Current result.
    #[must_use]
    pub fn current(&self) -> SingleResult {
        SingleResult {
            elapsed_ms: self.timer.value(),
            time: self.timer.format(TIME_PATTERN, 0),
            tries: self.tries,
        }
    }

    /// Tries so far.
    #[must_use]
    pub fn tries(&self) -> u32 {
        self.tries
    }

    /// The session stopwatch.
    #[must_use]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    fn render(&mut self) {
        let snapshot = SessionSnapshot::Single(self.current());
        if let Some(presenter) = self.presenter.as_mut() {
            presenter(&snapshot);
        }
    }
}

impl SessionController for SinglePlayerController {
    fn name(&self) -> &str {
        SINGLE_CONTROLLER
    }

    fn players(&self) -> usize {
        1
    }

    fn activate(&mut self, _config: &SessionConfig) -> Result<()> {
        self.on_reset();
        Ok(())
    }

    fn on_start(&mut self) {
        self.timer.start();
        self.tries = 0;
        self.render();
    }

    fn on_try(&mut self) {
        self.tries += 1;
        self.render();
    }

    fn on_match(&mut self) {
        self.on_try();
    }

    fn on_end(&mut self) -> GameOutcome {
        self.timer.stop();
        self.render();
        let result = self.current();
        debug!(time = %result.time, tries = result.tries, "single-player game over");
        GameOutcome::Single(result)
    }

    fn on_reset(&mut self) {
        self.timer.reset();
        self.tries = 0;
        self.render();
    }

    fn result(&self) -> SessionSnapshot {
        SessionSnapshot::Single(self.current())
    }

    fn tick(&mut self) {
        if self.timer.poll() > 0 {
            self.render();
        }
    }
}

impl std::fmt::Debug for SinglePlayerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinglePlayerController")
            .field("timer", &self.timer)
            .field("tries", &self.tries)
            .finish()
    }
}
