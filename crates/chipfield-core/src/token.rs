#![forbid(unsafe_code)]

//! The token model.
//!
//! A [`Token`] is an atomic chip: a display string, an opaque payload owned
//! by the caller, and optional per-token style overrides. Two tokens compare
//! equal iff their display text matches; the payload and style never
//! participate in equality. Display text and payload are fixed at
//! construction; only the style may be replaced afterwards.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::color::Rgb;

/// Per-token style overrides.
///
/// Unset fields fall back to the field-level defaults, and from there to the
/// built-in tint colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenStyle {
    /// Chip text color while unselected.
    pub text_color: Option<Rgb>,
    /// Chip text color while selected.
    pub selected_text_color: Option<Rgb>,
    /// Chip background color while selected.
    pub selected_background_color: Option<Rgb>,
}

/// One selected item, rendered as a chip.
#[derive(Clone)]
pub struct Token {
    display_text: String,
    context: Arc<dyn Any + Send + Sync>,
    style: TokenStyle,
}

impl Token {
    /// Create a token with a display text and an opaque payload.
    ///
    /// The payload is never interpreted; it rides along for the host to
    /// recover via [`Token::context_as`].
    pub fn new(display_text: impl Into<String>, context: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            display_text: display_text.into(),
            context,
            style: TokenStyle::default(),
        }
    }

    /// Create a token with no payload.
    pub fn text(display_text: impl Into<String>) -> Self {
        Self::new(display_text, Arc::new(()))
    }

    /// Set the per-token style overrides (builder).
    #[must_use]
    pub fn with_style(mut self, style: TokenStyle) -> Self {
        self.style = style;
        self
    }

    /// The display text. This is the token's equality key.
    #[inline]
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// The opaque payload.
    #[inline]
    pub fn context(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.context
    }

    /// Downcast the payload to a concrete type.
    pub fn context_as<T: 'static>(&self) -> Option<&T> {
        self.context.downcast_ref()
    }

    /// The style overrides.
    #[inline]
    pub fn style(&self) -> TokenStyle {
        self.style
    }

    /// Replace the style overrides.
    ///
    /// Style is the only mutable part of a token; display text and payload
    /// are fixed at construction.
    pub fn set_style(&mut self, style: TokenStyle) {
        self.style = style;
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.display_text == other.display_text
    }
}

impl Eq for Token {}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("display_text", &self.display_text)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}
