//! The renderer capability consumed by the grid engine.
//!
//! A renderer turns card values into something a front end can draw. The
//! engine never looks inside a [`CardVisual`]; it only stores them per cell
//! and reports which face is showing.

use serde::{Deserialize, Serialize};

use crate::core::{CardValue, GameRng};

/// What one side of a card shows.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    /// The face-down side.
    Back { label: String },
    /// A printed symbol (digit, glyph, emoji).
    Symbol(String),
    /// A solid color, named the way the front end understands it.
    Color(String),
}

/// One rendered card side.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardVisual {
    /// Theme that produced this visual.
    pub theme: String,
    pub face: CardFace,
}

impl CardVisual {
    /// Create a visual.
    pub fn new(theme: impl Into<String>, face: CardFace) -> Self {
        Self {
            theme: theme.into(),
            face,
        }
    }

    /// Is this the face-down side?
    #[must_use]
    pub fn is_back(&self) -> bool {
        matches!(self.face, CardFace::Back { .. })
    }
}

/// Renderer capability.
///
/// ## Implementation Notes
///
/// - `reset`: reshuffle any internal symbol pool so that the same value maps
///   to a different symbol from one game to the next
/// - `create_card_visual`: `None` asks for the back face
pub trait CardRenderer {
    /// Theme identifier, e.g. `"numbers"`.
    fn theme(&self) -> &str;

    /// Called once per grid reset, before any visual is created.
    fn reset(&mut self, rng: &mut GameRng);

    /// Produce the visual for a value, or the back face for `None`.
    fn create_card_visual(&mut self, value: Option<CardValue>) -> CardVisual;
}

impl std::fmt::Debug for dyn CardRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardRenderer")
            .field("theme", &self.theme())
            .finish()
    }
}
