#![forbid(unsafe_code)]

//! The flow layout engine.
//!
//! Packs a variable number of variable-width chip blocks, an optional
//! decoration view, an optional field-name label, an optional trailing
//! accessory, and the text-entry surface into rows, left to right, top to
//! bottom. Whole blocks never split across rows: a chip that does not fit
//! the remaining width wraps to a new row, unless it is the only block on
//! its row, in which case it is clamped to the maximum line width instead.
//!
//! [`solve`] is pure: identical inputs always produce an identical
//! [`Layout`]. The owning field compares content heights across passes and
//! notifies its observer on change.

use chipfield_core::{Rect, Size};

use crate::config::{DisplayMode, FieldConfig};

/// Per-chip solver input: the measured block plus its selection flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipMetrics {
    /// Measured chip block size.
    pub size: Size,
    /// Whether the chip is currently selected.
    pub selected: bool,
}

/// Inputs for one layout pass.
#[derive(Debug, Clone)]
pub struct LayoutRequest<'a> {
    /// Field configuration (padding, row metrics, mode).
    pub config: &'a FieldConfig,
    /// Chips in collection order.
    pub chips: &'a [ChipMetrics],
    /// Measured decoration view, placed before the label on row one.
    pub field_view: Option<Size>,
    /// Measured field-name label.
    pub field_label: Option<Size>,
    /// Measured accessory view, pinned to the top-right corner.
    pub accessory: Option<Size>,
    /// Container width.
    pub bounds_width: f32,
    /// Whether the field is in an edit session.
    pub editing: bool,
}

/// A placed chip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipPlacement {
    /// Placement rectangle, vertically centered in its row.
    pub rect: Rect,
    /// Whether the chip is the selected one.
    pub selected: bool,
    /// Whether the trailing separator glyph should be drawn. Hidden on the
    /// last chip while the field is not editing, to read as "closed".
    pub separator_visible: bool,
}

/// Identifies a placed element in [`Layout::placements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// The decoration view.
    FieldView,
    /// The field-name label.
    FieldLabel,
    /// The trailing accessory view.
    Accessory,
    /// The chip at this collection index.
    Chip(usize),
    /// The text-entry surface.
    TextField,
}

/// The derived placement state for one layout pass.
///
/// Owned by the layout engine, read-only to everything else; a renderer can
/// apply it verbatim to a concrete UI surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Decoration view placement, if one is installed.
    pub field_view: Option<Rect>,
    /// Field-name label placement, if a name is set.
    pub field_label: Option<Rect>,
    /// Accessory view placement, if one is installed.
    pub accessory: Option<Rect>,
    /// Accessory views only show during an edit session.
    pub accessory_visible: bool,
    /// Chip placements in collection order.
    pub chips: Vec<ChipPlacement>,
    /// Text-entry surface placement. Zero-sized in display-only mode.
    pub text_field: Rect,
    /// False in display-only mode.
    pub text_field_visible: bool,
    /// Placeholder text shows only while the collection is empty.
    pub show_placeholder: bool,
    /// Number of rows the content occupies.
    pub rows: usize,
    /// Total content height, clamped to the configured minimum.
    pub content_height: f32,
}

impl Layout {
    /// The degenerate layout used before the container has a width: every
    /// element collapses to zero size rather than running the packing
    /// algorithm against a zero boundary.
    pub fn zeroed(chip_count: usize) -> Self {
        Self {
            field_view: None,
            field_label: None,
            accessory: None,
            accessory_visible: false,
            chips: vec![
                ChipPlacement {
                    rect: Rect::ZERO,
                    selected: false,
                    separator_visible: true,
                };
                chip_count
            ],
            text_field: Rect::ZERO,
            text_field_visible: false,
            show_placeholder: chip_count == 0,
            rows: 0,
            content_height: 0.0,
        }
    }

    /// All placements in order. The text-entry surface is always last,
    /// zero-sized in display-only mode.
    pub fn placements(&self) -> Vec<(Element, Rect)> {
        let mut out = Vec::with_capacity(self.chips.len() + 4);
        if let Some(rect) = self.field_view {
            out.push((Element::FieldView, rect));
        }
        if let Some(rect) = self.field_label {
            out.push((Element::FieldLabel, rect));
        }
        if let Some(rect) = self.accessory {
            out.push((Element::Accessory, rect));
        }
        for (index, chip) in self.chips.iter().enumerate() {
            out.push((Element::Chip(index), chip.rect));
        }
        out.push((Element::TextField, self.text_field));
        out
    }
}

/// Run one layout pass.
///
/// Callers must short-circuit a zero container width to [`Layout::zeroed`];
/// the packing algorithm assumes a positive boundary.
pub fn solve(req: &LayoutRequest<'_>) -> Layout {
    let config = req.config;
    let padding = config.padding;
    let row_height = config.standard_row_height;
    let row_advance = row_height + config.rows_spacing;

    let right_boundary = req.bounds_width - padding.right;
    let mut first_line_right = right_boundary;

    let mut cur_x = padding.left;
    let mut cur_y = padding.top;
    let mut line = 0usize;
    let mut last_chip_line = 0usize;

    // Decoration view, vertically centered in the first row.
    let field_view = req.field_view.map(|size| {
        let rect = Rect::from_origin_size(
            cur_x + config.field_margin_x,
            cur_y + (row_height - size.height) / 2.0,
            size,
        );
        cur_x = rect.right() + config.field_margin_x;
        rect
    });

    // Field-name label, likewise.
    let field_label = req.field_label.map(|size| {
        let rect = Rect::from_origin_size(
            cur_x + config.field_margin_x,
            cur_y + (row_height - size.height) / 2.0,
            size,
        );
        cur_x = rect.right() + config.field_margin_x;
        rect
    });

    // Accessory pinned to the top-right; it shortens the first row only.
    let accessory = req.accessory.map(|size| {
        let rect = Rect::from_origin_size(
            req.bounds_width - padding.right - size.width,
            cur_y,
            size,
        );
        first_line_right = rect.left() - config.token_spacing;
        rect
    });

    // Pack chips.
    let max_line_width = config.max_line_width(req.bounds_width);
    let mut chips = Vec::with_capacity(req.chips.len());
    let mut chips_on_line = 0usize;
    for (index, chip) in req.chips.iter().enumerate() {
        let mut size = chip.size;
        let boundary = if line == 0 {
            first_line_right
        } else {
            right_boundary
        };
        if cur_x + size.width > boundary && chips_on_line > 0 {
            line += 1;
            chips_on_line = 0;
            cur_x = padding.left;
            cur_y += row_advance;
        }
        chips_on_line += 1;

        // A chip wider than the line is clamped, never rejected.
        if size.width > max_line_width {
            size.width = max_line_width;
        }

        let rect = Rect::from_origin_size(
            cur_x,
            cur_y + (row_height - size.height) / 2.0,
            size,
        );
        cur_x = rect.right() + config.token_spacing;
        last_chip_line = line;

        chips.push(ChipPlacement {
            rect,
            selected: chip.selected,
            separator_visible: index + 1 != req.chips.len() || req.editing,
        });
    }

    // Text-entry surface: indented when sharing a row with earlier content,
    // wrapped to its own row when the remaining width is too small.
    let mut text_x = if cur_x > padding.left {
        cur_x + config.text_field_indent
    } else {
        cur_x
    };
    let mut text_y = cur_y;
    let boundary = if line == 0 {
        first_line_right
    } else {
        right_boundary
    };
    let mut text_width = boundary - text_x;
    if text_width < config.minimum_text_field_width {
        text_x = padding.left;
        text_y += row_advance;
        line += 1;
        text_width = right_boundary - text_x;
    }

    // An empty trailing edit row must not inflate the height while idle.
    if !req.editing && line > last_chip_line && !chips.is_empty() {
        text_y -= row_advance;
        line -= 1;
    }

    let editing = req.editing && config.mode == DisplayMode::Edit;
    let (text_field, text_field_visible) = match config.mode {
        DisplayMode::Edit => (Rect::new(text_x, text_y, text_width, row_height), true),
        DisplayMode::View => (Rect::ZERO, false),
    };

    // Height always counts whole rows; chips shorter than the row center
    // within it without shrinking it.
    let raw_height = if editing {
        text_field.bottom() + padding.bottom
    } else if chips.is_empty() {
        0.0
    } else {
        cur_y + row_height + padding.bottom
    };
    let content_height = raw_height.max(config.min_height);

    let layout = Layout {
        field_view,
        field_label,
        accessory,
        accessory_visible: editing,
        chips,
        text_field,
        text_field_visible,
        show_placeholder: req.chips.is_empty(),
        rows: line + 1,
        content_height,
    };
    tracing::trace!(
        chips = layout.chips.len(),
        rows = layout.rows,
        content_height = f64::from(layout.content_height),
        "layout solved"
    );
    layout
}
