#![forbid(unsafe_code)]

//! Field configuration.
//!
//! Every knob is settable at any time; the owning [`TokenField`] re-runs
//! layout after a change. Defaults match the conventional email "To:" field
//! proportions.
//!
//! [`TokenField`]: crate::field::TokenField

use ahash::HashSet;

use chipfield_core::{EdgeInsets, FontMetrics, Rgb};

/// Whether the field accepts edits or only displays its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayMode {
    /// Editable: the text-entry surface is live.
    #[default]
    Edit,
    /// Display-only: the text-entry surface collapses to zero size.
    View,
}

/// Layout and behavior configuration for a token field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldConfig {
    /// Padding between the field bounds and its content.
    pub padding: EdgeInsets,
    /// Minimum field height, applied after layout.
    pub min_height: f32,
    /// Height of one row; chips center vertically within it.
    pub standard_row_height: f32,
    /// Vertical space between rows.
    pub rows_spacing: f32,
    /// Horizontal space between adjacent chips.
    pub token_spacing: f32,
    /// Indent between the last chip and the text-entry surface.
    pub text_field_indent: f32,
    /// Minimum text-entry width before it wraps to its own row.
    pub minimum_text_field_width: f32,
    /// Horizontal margin around the decoration view and field label.
    pub field_margin_x: f32,
    /// Font used for chips, the label, and the text-entry surface.
    pub font: FontMetrics,
    /// Field-name label text ("To:", "Cc:", ...). Empty or `None` hides it.
    pub field_name: Option<String>,
    /// Field-name label color.
    pub field_name_color: Rgb,
    /// Placeholder for the text-entry surface, shown while no token exists.
    pub placeholder: Option<String>,
    /// Default chip text color; token-level overrides win.
    pub text_color: Option<Rgb>,
    /// Default selected chip text color; token-level overrides win.
    pub selected_text_color: Option<Rgb>,
    /// Default selected chip background color; token-level overrides win.
    pub selected_background_color: Option<Rgb>,
    /// Editable vs. display-only mode.
    pub mode: DisplayMode,
    /// Characters that commit the typed text as a token instead of being
    /// inserted.
    pub delimiters: HashSet<char>,
    /// Whether ending an edit session commits pending typed text.
    pub tokenize_on_end_editing: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        let mut delimiters = HashSet::default();
        delimiters.insert(',');
        Self {
            padding: EdgeInsets::new(10.0, 8.0, 10.0, 8.0),
            min_height: 45.0,
            standard_row_height: 25.0,
            rows_spacing: 4.0,
            token_spacing: 0.0,
            text_field_indent: 4.0,
            minimum_text_field_width: 10.0,
            field_margin_x: 4.0,
            font: FontMetrics::default(),
            field_name: None,
            field_name_color: Rgb::LIGHT_GRAY,
            placeholder: None,
            text_color: None,
            selected_text_color: None,
            selected_background_color: None,
            mode: DisplayMode::Edit,
            delimiters,
            tokenize_on_end_editing: true,
        }
    }
}

impl FieldConfig {
    /// Set the content padding (builder).
    #[must_use]
    pub fn with_padding(mut self, padding: impl Into<EdgeInsets>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Set the minimum field height (builder).
    #[must_use]
    pub fn with_min_height(mut self, min_height: f32) -> Self {
        self.min_height = min_height;
        self
    }

    /// Set the display mode (builder).
    #[must_use]
    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the field-name label (builder).
    #[must_use]
    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = Some(name.into());
        self
    }

    /// Set the placeholder text (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the font (builder).
    #[must_use]
    pub fn with_font(mut self, font: FontMetrics) -> Self {
        self.font = font;
        self
    }

    /// Replace the delimiter set (builder).
    #[must_use]
    pub fn with_delimiters(mut self, delimiters: impl IntoIterator<Item = char>) -> Self {
        self.delimiters = delimiters.into_iter().collect();
        self
    }

    /// The widest a single chip may be: the container width minus the
    /// horizontal padding. Wider chips are clamped, never rejected.
    #[inline]
    pub fn max_line_width(&self, bounds_width: f32) -> f32 {
        bounds_width - self.padding.horizontal_sum()
    }

    /// Whether the field-name label should be laid out.
    #[inline]
    pub fn has_field_name(&self) -> bool {
        self.field_name.as_deref().is_some_and(|name| !name.is_empty())
    }
}
