//! The game controller: owns the grid and routes its events.

use rustc_hash::FxHashMap;
use tracing::{debug, instrument, trace};

use crate::core::{MemoError, Result, SharedClock};
use crate::grid::{renderer_for_theme, CellId, Emitted, GridEngine, GridEvent, Viewport};
use crate::session::{
    GameOutcome, MultiPlayerController, SessionConfig, SessionController, SinglePlayerController,
    MULTI_CONTROLLER, SINGLE_CONTROLLER,
};

use super::command::{default_commands, CommandHandler, CommandPayload, GAME_OVER};
use super::settings::{Settings, SettingsUpdate};

/// Callback receiving the outcome of a finished game.
pub type OutcomePresenter = Box<dyn FnMut(&GameOutcome)>;

/// Orchestrates one grid engine and a registry of session controllers.
///
/// Exactly one controller is active at a time. Grid events produced by
/// [`new_game`](Self::new_game), [`on_card_interaction`](Self::on_card_interaction)
/// and settings updates are routed to it.
pub struct GameController {
    grid: GridEngine,
    controllers: FxHashMap<String, Box<dyn SessionController>>,
    commands: FxHashMap<String, CommandHandler>,
    active: Option<String>,
    viewport: Option<Viewport>,
    settings_pending: bool,
    last_outcome: Option<GameOutcome>,
    game_over: Option<OutcomePresenter>,
}

impl GameController {
    /// Wrap a grid engine. No controllers or commands are registered.
    pub fn new(grid: GridEngine) -> Self {
        Self {
            grid,
            controllers: FxHashMap::default(),
            commands: FxHashMap::default(),
            active: None,
            viewport: None,
            settings_pending: false,
            last_outcome: None,
            game_over: None,
        }
    }

    /// A controller with both session controllers registered, the built-in
    /// commands installed and the single-player controller active.
    pub fn standard(grid: GridEngine, clock: SharedClock) -> Result<Self> {
        let mut game = Self::new(grid).with_default_commands();
        game.register_controller(SINGLE_CONTROLLER, Box::new(SinglePlayerController::new(clock)));
        game.register_controller(MULTI_CONTROLLER, Box::new(MultiPlayerController::new()));
        game.set_active_controller(SINGLE_CONTROLLER, &SessionConfig::default())?;
        Ok(game)
    }

    /// Install the `play`, `settings` and `game-over` commands (builder pattern).
    #[must_use]
    pub fn with_default_commands(mut self) -> Self {
        for (name, handler) in default_commands() {
            self.commands.insert(name.to_string(), handler);
        }
        self
    }

    /// Bind the game-over presenter (builder pattern).
    #[must_use]
    pub fn with_game_over_presenter(mut self, presenter: impl FnMut(&GameOutcome) + 'static) -> Self {
        self.game_over = Some(Box::new(presenter));
        self
    }

    // === Registries ===

    /// Register a session controller under `name`.
    ///
    /// Returns `false` and leaves the registry untouched if the name is taken.
    pub fn register_controller(&mut self, name: &str, controller: Box<dyn SessionController>) -> bool {
        if self.controllers.contains_key(name) {
            return false;
        }
        self.controllers.insert(name.to_string(), controller);
        true
    }

    /// Register a command. An existing command with the same name is replaced.
    pub fn register_command(
        &mut self,
        name: &str,
        handler: impl Fn(&mut GameController, &CommandPayload) -> Result<()> + 'static,
    ) {
        let handler: CommandHandler = std::rc::Rc::new(handler);
        self.commands.insert(name.to_string(), handler);
    }

    /// Make `name` the active controller and activate it with `config`.
    ///
    /// If activation fails the previous controller stays active.
    #[instrument(skip(self))]
    pub fn set_active_controller(&mut self, name: &str, config: &SessionConfig) -> Result<()> {
        let controller = self
            .controllers
            .get_mut(name)
            .ok_or_else(|| MemoError::UnregisteredController(name.to_string()))?;
        controller.activate(config)?;

        debug!(controller = name, players = controller.players(), "controller activated");
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Run a registered command. Returns `Ok(false)` if none is registered.
    #[instrument(skip(self, payload))]
    pub fn exec(&mut self, name: &str, payload: &CommandPayload) -> Result<bool> {
        let Some(handler) = self.commands.get(name).cloned() else {
            trace!(command = name, "unknown command ignored");
            return Ok(false);
        };
        handler(self, payload)?;
        Ok(true)
    }

    // === Settings ===

    /// Apply a partial settings change.
    ///
    /// Theme, dimensions and controller are checked before anything is
    /// changed; on error the game is untouched. With `restart` a dimension
    /// change deals a new board.
    #[instrument(skip(self))]
    pub fn update_settings(&mut self, update: &SettingsUpdate, restart: bool) -> Result<()> {
        let renderer = match &update.theme {
            Some(theme) if theme != self.grid.theme() => Some(renderer_for_theme(theme)?),
            _ => None,
        };

        let dimensions = match &update.dimensions {
            Some(partial) => {
                let mut merged = partial.merge(self.grid.dimensions());
                if let Some(viewport) = self.viewport {
                    merged = merged.oriented_for(viewport);
                }
                merged.validate()?;
                Some(merged)
            }
            None => None,
        };

        if let Some(name) = &update.controller {
            if !self.controllers.contains_key(name) {
                return Err(MemoError::UnregisteredController(name.clone()));
            }
            self.set_active_controller(name, &SessionConfig { players: update.players })?;
        }

        if let Some(renderer) = renderer {
            self.grid.set_card_renderer(renderer);
        }

        if let Some(dims) = dimensions {
            let emitted = self.grid.set_dimensions(dims.rows, dims.columns, restart)?;
            self.dispatch(emitted)?;
        }

        debug!(settings = ?self.settings(), "settings applied");
        Ok(())
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            dimensions: self.grid.dimensions(),
            theme: self.grid.theme().to_string(),
            players: self.active_controller().map_or(1, |c| c.players()),
        }
    }

    /// Open the settings flow and return the settings to show in the dialog.
    pub fn request_settings(&mut self) -> Settings {
        self.settings_pending = true;
        self.settings()
    }

    /// Whether a settings request is waiting for an answer.
    #[must_use]
    pub fn settings_pending(&self) -> bool {
        self.settings_pending
    }

    /// Answer the pending settings request.
    ///
    /// `None` cancels the dialog. Submitted settings are applied with a
    /// restart, activating the multi-player controller when more than one
    /// player is configured, and a new game is started. Returns whether
    /// anything was applied.
    pub fn submit_settings(&mut self, settings: Option<Settings>) -> Result<bool> {
        if !std::mem::take(&mut self.settings_pending) {
            return Ok(false);
        }
        let Some(settings) = settings else {
            trace!("settings dialog cancelled");
            return Ok(false);
        };

        self.update_settings(&SettingsUpdate::from(settings), true)?;
        self.new_game()?;
        Ok(true)
    }

    /// Report the host viewport size. Used to orient new dimensions.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Some(Viewport::new(width, height));
    }

    // === Game flow ===

    /// Deal a new board.
    pub fn new_game(&mut self) -> Result<()> {
        let emitted = self.grid.reset()?;
        self.dispatch(emitted)
    }

    /// Forward a click to the grid and route the resulting events.
    pub fn on_card_interaction(&mut self, cell: CellId) -> Result<()> {
        let emitted = self.grid.on_card_interaction(cell);
        self.dispatch(emitted)
    }

    /// Apply due flip-backs and deliver timer ticks.
    pub fn tick(&mut self) {
        self.grid.tick();
        if let Some(controller) = self.active_controller_mut() {
            controller.tick();
        }
    }

    /// Store a finished game's outcome and hand it to the presenter.
    pub fn record_outcome(&mut self, outcome: GameOutcome) {
        debug!(headline = %outcome.headline(), "game over");
        if let Some(presenter) = self.game_over.as_mut() {
            presenter(&outcome);
        }
        self.last_outcome = Some(outcome);
    }

    /// Bind or replace the game-over presenter.
    pub fn set_game_over_presenter(&mut self, presenter: impl FnMut(&GameOutcome) + 'static) {
        self.game_over = Some(Box::new(presenter));
    }

    // === Queries ===

    /// Outcome of the most recently finished game.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&GameOutcome> {
        self.last_outcome.as_ref()
    }

    /// The grid engine.
    #[must_use]
    pub fn grid(&self) -> &GridEngine {
        &self.grid
    }

    /// The grid engine, for subscribing to its events directly.
    pub fn grid_mut(&mut self) -> &mut GridEngine {
        &mut self.grid
    }

    /// Name of the active controller.
    #[must_use]
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active controller.
    #[must_use]
    pub fn active_controller(&self) -> Option<&dyn SessionController> {
        let controller = self.controllers.get(self.active.as_deref()?)?;
        Some(controller.as_ref())
    }

    /// The controller registered under `name`.
    #[must_use]
    pub fn controller(&self, name: &str) -> Option<&dyn SessionController> {
        Some(self.controllers.get(name)?.as_ref())
    }

    fn active_controller_mut(&mut self) -> Option<&mut Box<dyn SessionController>> {
        let name = self.active.as_deref()?;
        self.controllers.get_mut(name)
    }

    fn dispatch(&mut self, emitted: Emitted) -> Result<()> {
        for event in emitted {
            let Some(controller) = self.active_controller_mut() else {
                return Ok(());
            };
            match event {
                GridEvent::Reset => controller.on_reset(),
                GridEvent::Start => controller.on_start(),
                GridEvent::Try { is_match: true } => controller.on_match(),
                GridEvent::Try { is_match: false } => controller.on_try(),
                GridEvent::End => {
                    let outcome = controller.on_end();
                    self.exec(GAME_OVER, &CommandPayload::Outcome(outcome))?;
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut controllers: Vec<_> = self.controllers.keys().collect();
        controllers.sort();
        let mut commands: Vec<_> = self.commands.keys().collect();
        commands.sort();

        f.debug_struct("GameController")
            .field("grid", &self.grid)
            .field("controllers", &controllers)
            .field("commands", &commands)
            .field("active", &self.active)
            .field("viewport", &self.viewport)
            .field("settings_pending", &self.settings_pending)
            .finish()
    }
}
