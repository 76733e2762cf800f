#![forbid(unsafe_code)]

//! Token input field: delimiter-triggered tokenization, chip flow layout,
//! and single-selection state, decoupled from any rendering surface.
//!
//! The crate models the familiar email "To:" field. Typed text lives in a
//! free-text buffer until a delimiter character commits it; the host's
//! [`FieldObserver::token_for_text`] resolves the text into a [`Token`],
//! which joins the collection as a removable chip. Chips and the text-entry
//! surface pack left to right into rows, wrapping like words in a
//! paragraph, and the field reports its content height whenever the row
//! count changes.
//!
//! # Architecture
//!
//! - [`TokenField`] is the controller. It owns the collection, the text
//!   buffer, and the edit state, and it is the only place mutation happens.
//! - [`layout::solve`] is a pure function from field state to a [`Layout`]:
//!   a frame for every visual element. Rendering is the host's job; the
//!   field computes geometry and nothing else.
//! - [`FieldObserver`] is the host's half of the conversation: resolution
//!   of typed text, selection vetoes, and change notifications.
//!
//! # Example
//!
//! ```
//! use chipfield::{FieldObserver, Token, TokenField};
//!
//! struct Emails;
//!
//! impl FieldObserver for Emails {
//!     fn token_for_text(&mut self, text: &str) -> Option<Token> {
//!         Some(Token::text(text.trim()))
//!     }
//! }
//!
//! let mut field = TokenField::new().with_observer(Box::new(Emails));
//! field.set_bounds_width(320.0);
//! field.insert_text("alice@example.com,");
//!
//! assert_eq!(field.token_count(), 1);
//! assert!(field.content_height() >= 45.0);
//! for (element, frame) in field.layout().placements() {
//!     // hand each frame to the rendering layer
//!     let _ = (element, frame);
//! }
//! ```

pub mod chip;
pub mod config;
pub mod field;
pub mod layout;
pub mod observer;

pub use chip::{CHIP_PADDING_X, CHIP_PADDING_Y, Chip, ChipColors};
pub use config::{DisplayMode, FieldConfig};
pub use field::TokenField;
pub use layout::{ChipMetrics, ChipPlacement, Element, Layout, LayoutRequest, solve};
pub use observer::{FieldObserver, MenuItem, NoopObserver};

pub use chipfield_core::{
    EdgeInsets, FontMetrics, MonospaceMeasurer, Rect, Rgb, Size, TextMeasurer, Token, TokenStyle,
};
