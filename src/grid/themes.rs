//! Built-in card themes.
//!
//! - `numbers`: each value is printed as a 1-based number
//! - `colors`: each value is a named color drawn from a pool that is
//!   reshuffled on every reset; values past the pool fall back to numbers

use crate::core::{shuffle_in_place, CardValue, GameRng, MemoError, Result};

use super::renderer::{CardFace, CardRenderer, CardVisual};

/// Theme id of the numeric renderer.
pub const NUMBERS_THEME: &str = "numbers";
/// Theme id of the color renderer.
pub const COLORS_THEME: &str = "colors";

/// Label printed on the back of every built-in card.
pub const BACK_LABEL: &str = "?";

const CARD_COLORS: [&str; 20] = [
    "FloralWhite",
    "Silver",
    "Gray",
    "Black",
    "LightPink",
    "DarkRed",
    "MediumVioletRed",
    "BlueViolet",
    "DodgerBlue",
    "DarkSteelBlue",
    "DarkBlue",
    "LightGreen",
    "LimeGreen",
    "DarkGreen",
    "Moccasin",
    "Yellow",
    "Tan",
    "Crimson",
    "Cyan",
    "DarkMagenta",
];

/// How a [`SymbolRenderer`] draws the front of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrontStyle {
    Symbol,
    Color,
}

/// Renderer backed by an optional symbol pool.
///
/// Without a pool every value is printed as `value + 1`.
#[derive(Clone, Debug)]
pub struct SymbolRenderer {
    theme: String,
    symbols: Vec<String>,
    style: FrontStyle,
}

impl SymbolRenderer {
    /// The numeric theme.
    #[must_use]
    pub fn numbers() -> Self {
        Self {
            theme: NUMBERS_THEME.to_string(),
            symbols: Vec::new(),
            style: FrontStyle::Symbol,
        }
    }

    /// The color theme.
    #[must_use]
    pub fn colors() -> Self {
        Self {
            theme: COLORS_THEME.to_string(),
            symbols: CARD_COLORS.iter().map(|c| (*c).to_string()).collect(),
            style: FrontStyle::Color,
        }
    }

    /// A custom theme printing symbols from `symbols`.
    pub fn with_symbols(theme: impl Into<String>, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            theme: theme.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            style: FrontStyle::Symbol,
        }
    }

    /// The current symbol pool order.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

impl CardRenderer for SymbolRenderer {
    fn theme(&self) -> &str {
        &self.theme
    }

    fn reset(&mut self, rng: &mut GameRng) {
        shuffle_in_place(&mut self.symbols, rng);
    }

    fn create_card_visual(&mut self, value: Option<CardValue>) -> CardVisual {
        let face = match value {
            None => CardFace::Back {
                label: BACK_LABEL.to_string(),
            },
            Some(value) => match self.symbols.get(value.index()) {
                Some(symbol) if self.style == FrontStyle::Color => CardFace::Color(symbol.clone()),
                Some(symbol) => CardFace::Symbol(symbol.clone()),
                None => CardFace::Symbol((value.index() + 1).to_string()),
            },
        };
        CardVisual::new(self.theme.clone(), face)
    }
}

/// Look up a built-in renderer by theme id.
pub fn renderer_for_theme(theme: &str) -> Result<Box<dyn CardRenderer>> {
    match theme {
        NUMBERS_THEME => Ok(Box::new(SymbolRenderer::numbers())),
        COLORS_THEME => Ok(Box::new(SymbolRenderer::colors())),
        other => Err(MemoError::UnknownTheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_are_one_based() {
        let mut renderer = SymbolRenderer::numbers();
        let visual = renderer.create_card_visual(Some(CardValue::new(0)));

        assert_eq!(visual.face, CardFace::Symbol("1".to_string()));
        assert_eq!(visual.theme, NUMBERS_THEME);
    }

    #[test]
    fn test_back_face() {
        let mut renderer = SymbolRenderer::colors();
        let back = renderer.create_card_visual(None);

        assert!(back.is_back());
        assert_eq!(back.face, CardFace::Back { label: "?".to_string() });
    }

    #[test]
    fn test_colors_fall_back_to_numbers() {
        let mut renderer = SymbolRenderer::colors();

        assert!(matches!(
            renderer.create_card_visual(Some(CardValue::new(3))).face,
            CardFace::Color(_)
        ));
        assert_eq!(
            renderer.create_card_visual(Some(CardValue::new(25))).face,
            CardFace::Symbol("26".to_string())
        );
    }

    #[test]
    fn test_reset_reshuffles_pool() {
        let mut renderer = SymbolRenderer::colors();
        let before = renderer.symbols().to_vec();

        renderer.reset(&mut GameRng::new(42));

        let mut after = renderer.symbols().to_vec();
        assert_ne!(after, before);
        after.sort();
        let mut sorted_before = before;
        sorted_before.sort();
        assert_eq!(after, sorted_before);
    }

    #[test]
    fn test_custom_symbols() {
        let mut renderer = SymbolRenderer::with_symbols("animals", ["cat", "dog"]);

        assert_eq!(renderer.theme(), "animals");
        assert_eq!(
            renderer.create_card_visual(Some(CardValue::new(1))).face,
            CardFace::Symbol("dog".to_string())
        );
        assert_eq!(
            renderer.create_card_visual(Some(CardValue::new(2))).face,
            CardFace::Symbol("3".to_string())
        );
    }

    #[test]
    fn test_lookup() {
        assert_eq!(renderer_for_theme("colors").unwrap().theme(), COLORS_THEME);
        assert_eq!(
            renderer_for_theme("emoji").unwrap_err(),
            MemoError::UnknownTheme("emoji".to_string())
        );
    }
}
