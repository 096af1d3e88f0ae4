//! Session settings and partial updates.
//!
//! [`Settings`] is the full picture shown to the settings dialog.
//! [`SettingsUpdate`] is a partial change: every field is optional and only
//! the fields present are applied.

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::grid::{Dimensions, NUMBERS_THEME};
use crate::session::{MULTI_CONTROLLER, SINGLE_CONTROLLER};

/// Complete session settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub dimensions: Dimensions,
    pub theme: String,
    pub players: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            theme: NUMBERS_THEME.to_string(),
            players: 1,
        }
    }
}

impl Settings {
    /// Name of the controller that runs a session with this many players.
    #[must_use]
    pub fn controller_name(&self) -> &'static str {
        if self.players > 1 {
            MULTI_CONTROLLER
        } else {
            SINGLE_CONTROLLER
        }
    }
}

/// Partial dimension change; missing sides keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionsUpdate {
    pub rows: Option<usize>,
    pub columns: Option<usize>,
}

impl DimensionsUpdate {
    /// Merge over the current dimensions. The result is not validated.
    #[must_use]
    pub fn merge(&self, current: Dimensions) -> Dimensions {
        Dimensions {
            rows: self.rows.unwrap_or(current.rows),
            columns: self.columns.unwrap_or(current.columns),
        }
    }
}

impl From<Dimensions> for DimensionsUpdate {
    fn from(dims: Dimensions) -> Self {
        Self {
            rows: Some(dims.rows),
            columns: Some(dims.columns),
        }
    }
}

/// A partial settings change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub dimensions: Option<DimensionsUpdate>,
    pub theme: Option<String>,
    /// Controller to activate.
    pub controller: Option<String>,
    /// Player count handed to the activated controller.
    pub players: Option<usize>,
}

impl SettingsUpdate {
    /// An empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change both sides (builder pattern).
    #[must_use]
    pub fn with_dimensions(mut self, rows: usize, columns: usize) -> Self {
        self.dimensions = Some(DimensionsUpdate {
            rows: Some(rows),
            columns: Some(columns),
        });
        self
    }

    /// Change only the row count (builder pattern).
    #[must_use]
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.dimensions.get_or_insert_with(DimensionsUpdate::default).rows = Some(rows);
        self
    }

    /// Change only the column count (builder pattern).
    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.dimensions.get_or_insert_with(DimensionsUpdate::default).columns = Some(columns);
        self
    }

    /// Change the theme (builder pattern).
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Switch controller (builder pattern).
    #[must_use]
    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    /// Set the player count (builder pattern).
    #[must_use]
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = Some(players);
        self
    }
}

/// A full settings object becomes an update that also picks the controller
/// matching its player count.
impl From<Settings> for SettingsUpdate {
    fn from(settings: Settings) -> Self {
        Self {
            dimensions: Some(settings.dimensions.into()),
            controller: Some(settings.controller_name().to_string()),
            theme: Some(settings.theme),
            players: Some(settings.players),
        }
    }
}

/// Settings as the dialog form holds them: dimensions as `"RxC"` text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsForm {
    pub dimensions: String,
    pub theme: String,
    pub players: usize,
}

impl SettingsForm {
    /// Parse the form back into settings.
    pub fn parse(&self) -> Result<Settings> {
        Ok(Settings {
            dimensions: self.dimensions.parse()?,
            theme: self.theme.clone(),
            players: self.players,
        })
    }
}

impl From<&Settings> for SettingsForm {
    fn from(settings: &Settings) -> Self {
        Self {
            dimensions: settings.dimensions.dialog_label(),
            theme: settings.theme.clone(),
            players: settings.players,
        }
    }
}
