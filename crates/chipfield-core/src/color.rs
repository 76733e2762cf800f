#![forbid(unsafe_code)]

//! Color primitives.
//!
//! Chips carry optional per-token color overrides; everything else about
//! theming lives in the host renderer. A bare RGB triple is enough vocabulary
//! for that contract.

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// White, the default selected-text color.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Light gray, used for separators and the field-name label.
    pub const LIGHT_GRAY: Self = Self::new(170, 170, 170);

    /// The default tint applied to chip text and selection backgrounds
    /// when neither the token nor the field overrides it.
    pub const DEFAULT_TINT: Self = Self::new(21, 126, 251);

    /// Create a new color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}
