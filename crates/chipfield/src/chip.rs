#![forbid(unsafe_code)]

//! Chips: the per-token visual state.
//!
//! A chip pairs a [`Token`] with its measured block size and its selection
//! state. Chips are `unselected` when created; the owning field arbitrates
//! the single-selection invariant, so nothing here flips another chip's
//! state.

use chipfield_core::{FontMetrics, Rgb, Size, TextMeasurer, Token};

use crate::config::FieldConfig;

/// Horizontal padding inside a chip, around the text.
pub const CHIP_PADDING_X: f32 = 4.0;
/// Vertical padding inside a chip, around the text.
pub const CHIP_PADDING_Y: f32 = 2.0;

/// A token plus its transient visual state.
#[derive(Debug, Clone)]
pub struct Chip {
    /// The underlying token.
    pub token: Token,
    /// Measured chip block size (text size plus chip padding).
    pub size: Size,
    /// Whether this chip is the selected one.
    pub selected: bool,
}

impl Chip {
    /// Create an unselected chip, measuring the token's display text.
    pub fn new(token: Token, measurer: &dyn TextMeasurer, font: &FontMetrics) -> Self {
        let size = Self::measure(&token, measurer, font);
        Self {
            token,
            size,
            selected: false,
        }
    }

    /// Measure the chip block for a token: text size plus chip padding.
    pub fn measure(token: &Token, measurer: &dyn TextMeasurer, font: &FontMetrics) -> Size {
        let text = measurer.measure(token.display_text(), font);
        Size::new(
            text.width + 2.0 * CHIP_PADDING_X,
            text.height + 2.0 * CHIP_PADDING_Y,
        )
    }

    /// Re-measure after a font change.
    pub fn remeasure(&mut self, measurer: &dyn TextMeasurer, font: &FontMetrics) {
        self.size = Self::measure(&self.token, measurer, font);
    }
}

/// Fully resolved chip colors: token overrides, then field defaults, then
/// the built-in tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipColors {
    /// Text color while unselected.
    pub text: Rgb,
    /// Text color while selected.
    pub selected_text: Rgb,
    /// Background color while selected.
    pub selected_background: Rgb,
}

impl ChipColors {
    /// Resolve the colors for a token under a field configuration.
    pub fn resolve(token: &Token, config: &FieldConfig) -> Self {
        let style = token.style();
        Self {
            text: style
                .text_color
                .or(config.text_color)
                .unwrap_or(Rgb::DEFAULT_TINT),
            selected_text: style
                .selected_text_color
                .or(config.selected_text_color)
                .unwrap_or(Rgb::WHITE),
            selected_background: style
                .selected_background_color
                .or(config.selected_background_color)
                .unwrap_or(Rgb::DEFAULT_TINT),
        }
    }
}
