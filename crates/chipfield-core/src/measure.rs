#![forbid(unsafe_code)]

//! Text measurement.
//!
//! The layout engine treats every piece of text as an opaque measured block,
//! so the only font capability it needs is "how big is this string". Hosts
//! with real font metrics implement [`TextMeasurer`]; [`MonospaceMeasurer`]
//! is a deterministic fallback good enough for tests and fixed-pitch
//! surfaces.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::geometry::Size;

/// Font metrics the layout engine needs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    /// Nominal point size.
    pub point_size: f32,
    /// Height of a single line of this font.
    pub line_height: f32,
}

impl FontMetrics {
    /// Create font metrics with explicit values.
    pub const fn new(point_size: f32, line_height: f32) -> Self {
        Self {
            point_size,
            line_height,
        }
    }

    /// Create font metrics for a point size with a conventional 1.2x
    /// line height.
    pub fn of_size(point_size: f32) -> Self {
        Self::new(point_size, point_size * 1.2)
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::of_size(17.0)
    }
}

/// Measure-text capability contract.
///
/// Implementations must be pure: the same text and font always measure to
/// the same size, or layout recomputation stops being idempotent.
pub trait TextMeasurer {
    /// Measure the rendered size of a single line of text.
    fn measure(&self, text: &str, font: &FontMetrics) -> Size;
}

/// Fixed-advance measurer.
///
/// Width is the text's display width in cells (grapheme-cluster aware,
/// wide glyphs count double) times a fraction of the point size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Glyph advance as a fraction of the font point size.
    pub advance_ratio: f32,
}

impl MonospaceMeasurer {
    /// Create a measurer with an explicit advance ratio.
    pub const fn new(advance_ratio: f32) -> Self {
        Self { advance_ratio }
    }

    fn display_cells(text: &str) -> usize {
        text.graphemes(true).map(|g| g.width()).sum()
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &FontMetrics) -> Size {
        let cells = Self::display_cells(text) as f32;
        Size::new(cells * font.point_size * self.advance_ratio, font.line_height)
    }
}
