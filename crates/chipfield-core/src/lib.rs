#![forbid(unsafe_code)]

//! Shared vocabulary for the chipfield token input field.
//!
//! # Role in chipfield
//! `chipfield-core` holds the small leaf types the widget core builds on,
//! with no opinions about rendering or event delivery: geometry in UI
//! points, colors, the token model, and the measure-text capability
//! contract.
//!
//! # This crate provides
//! - [`Size`], [`Rect`], [`EdgeInsets`] geometry in fractional points.
//! - [`Rgb`] color triples for chip style overrides.
//! - [`Token`] and [`TokenStyle`], the chip data model.
//! - [`TextMeasurer`] and [`MonospaceMeasurer`] for text sizing.
//!
//! # How it fits in the system
//! The `chipfield` crate consumes these types to pack chips into rows and to
//! arbitrate selection; host renderers consume them to draw the result. This
//! crate keeps that vocabulary dependency-light and deterministic.

pub mod color;
pub mod geometry;
pub mod measure;
pub mod token;

pub use color::Rgb;
pub use geometry::{EdgeInsets, Rect, Size};
pub use measure::{FontMetrics, MonospaceMeasurer, TextMeasurer};
pub use token::{Token, TokenStyle};
