#![forbid(unsafe_code)]

//! The token field controller.
//!
//! [`TokenField`] owns the ordered chip collection, the free-text buffer,
//! and the edit state; it mediates every mutation, arbitrates the
//! single-selection invariant, re-runs the flow layout after each relevant
//! change, and notifies its [`FieldObserver`] of what happened.
//!
//! All mutation is synchronous and must happen on the thread that created
//! the field; debug builds assert this. The field never touches a UI
//! surface itself: each pass leaves a complete [`Layout`] for a renderer to
//! apply.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use chipfield_core::{FontMetrics, MonospaceMeasurer, Rgb, Size, TextMeasurer, Token};

use crate::chip::{Chip, ChipColors};
use crate::config::{DisplayMode, FieldConfig};
use crate::layout::{ChipMetrics, Layout, LayoutRequest, solve};
use crate::observer::{FieldObserver, MenuItem, NoopObserver};

/// A token input field: chips plus an inline text-entry surface.
pub struct TokenField {
    config: FieldConfig,
    chips: Vec<Chip>,
    text: String,
    editing: bool,
    collapsed: bool,
    bounds_width: f32,
    field_view: Option<Size>,
    accessory: Option<Size>,
    input_accessory: Option<Arc<dyn Any + Send + Sync>>,
    observer: Box<dyn FieldObserver>,
    measurer: Box<dyn TextMeasurer>,
    layout: Layout,
    last_height: f32,
    #[cfg(debug_assertions)]
    owner_thread: std::thread::ThreadId,
}

impl TokenField {
    /// Create an empty editable field with default configuration.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            chips: Vec::new(),
            text: String::new(),
            editing: false,
            collapsed: false,
            bounds_width: 0.0,
            field_view: None,
            accessory: None,
            input_accessory: None,
            observer: Box::new(NoopObserver),
            measurer: Box::new(MonospaceMeasurer::default()),
            layout: Layout::zeroed(0),
            last_height: 0.0,
            #[cfg(debug_assertions)]
            owner_thread: std::thread::current().id(),
        }
    }

    /// Replace the configuration (builder).
    #[must_use]
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self.remeasure_all();
        self
    }

    /// Install the observer (builder).
    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn FieldObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Install the text measurer (builder).
    #[must_use]
    pub fn with_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self.remeasure_all();
        self
    }

    /// Replace the observer.
    pub fn set_observer(&mut self, observer: Box<dyn FieldObserver>) {
        self.observer = observer;
    }

    // --- Collection ---

    /// Append a token, unless an equal token is already present.
    ///
    /// Fires `did_add_token`, clears the free-text buffer (firing
    /// `did_change_text`), and re-runs layout.
    pub fn add_token(&mut self, token: Token) {
        self.assert_owner_thread();
        if self.chips.iter().any(|c| c.token == token) {
            tracing::trace!(text = token.display_text(), "duplicate token ignored");
            return;
        }
        let chip = Chip::new(token.clone(), self.measurer.as_ref(), &self.config.font);
        self.chips.push(chip);
        self.text.clear();
        self.deselect_all_quiet();
        tracing::debug!(
            text = token.display_text(),
            count = self.chips.len(),
            "token added"
        );
        self.observer.did_add_token(&token);
        // Clearing the buffer programmatically still counts as a change.
        self.observer.did_change_text(&self.text);
        self.reposition();
    }

    /// Remove the first token equal to `token`. Absent tokens are a no-op.
    pub fn remove_token(&mut self, token: &Token) {
        self.assert_owner_thread();
        if let Some(index) = self.chips.iter().position(|c| &c.token == token) {
            self.remove_chip_at(index);
        }
    }

    /// Remove every token, firing `did_remove_token` per token in original
    /// order, then re-running layout once.
    pub fn remove_all_tokens(&mut self) {
        self.assert_owner_thread();
        let removed = std::mem::take(&mut self.chips);
        for chip in &removed {
            self.observer.did_remove_token(&chip.token);
        }
        tracing::debug!(count = removed.len(), "collection cleared");
        self.reposition();
    }

    /// Restyle the chip holding `previous` with `replacement`'s style
    /// overrides. Identity is untouched and no add/remove events fire;
    /// absent tokens are a no-op.
    pub fn replace_token(&mut self, previous: &Token, replacement: &Token) {
        self.assert_owner_thread();
        if let Some(chip) = self.chips.iter_mut().find(|c| &c.token == previous) {
            chip.token.set_style(replacement.style());
        }
    }

    /// Resolve the free-text buffer into a token and commit it.
    ///
    /// Asks the observer's `token_for_text`; a declined resolution leaves
    /// the buffer as it was and produces nothing.
    pub fn tokenize_text(&mut self) -> Option<Token> {
        self.assert_owner_thread();
        if self.text.is_empty() {
            return None;
        }
        let token = self.observer.token_for_text(&self.text)?;
        self.add_token(token.clone());
        Some(token)
    }

    // --- Text entry ---

    /// Feed typed text into the field.
    ///
    /// Delimiter characters commit the buffer instead of being inserted.
    /// If a chip is selected, typing deletes it and the typed text becomes
    /// the new buffer.
    pub fn insert_text(&mut self, input: &str) {
        self.assert_owner_thread();
        if self.config.mode == DisplayMode::View {
            return;
        }
        if self.selected_index().is_some() {
            self.delete_selected(Some(input));
            return;
        }
        let mut changed = false;
        for ch in input.chars() {
            if self.config.delimiters.contains(&ch) {
                if changed {
                    self.observer.did_change_text(&self.text);
                    changed = false;
                }
                self.tokenize_text();
            } else {
                self.text.push(ch);
                changed = true;
            }
        }
        if changed {
            self.observer.did_change_text(&self.text);
        }
    }

    /// Handle a backward delete.
    ///
    /// A selected chip consumes the delete; a non-empty buffer pops one
    /// grapheme; an empty buffer reaches back and selects the last chip,
    /// so the next backspace removes it. The reach-back selection skips
    /// the observer's veto and fires no selection event.
    pub fn backspace(&mut self) {
        self.assert_owner_thread();
        if self.config.mode == DisplayMode::View {
            return;
        }
        if self.selected_index().is_some() {
            self.delete_selected(None);
            return;
        }
        if !self.text.is_empty() {
            if let Some((offset, _)) = self.text.grapheme_indices(true).last() {
                self.text.truncate(offset);
            }
            self.observer.did_change_text(&self.text);
            return;
        }
        if !self.chips.is_empty() {
            let last = self.chips.len() - 1;
            self.select_chip_unchecked(last);
        }
    }

    /// Delete the selected chip, optionally seeding the buffer with
    /// replacement text. No-op when nothing is selected.
    pub fn delete_selected(&mut self, replacement: Option<&str>) {
        self.assert_owner_thread();
        if self.config.mode == DisplayMode::View {
            return;
        }
        let Some(index) = self.selected_index() else {
            return;
        };
        if let Some(text) = replacement.filter(|t| !t.is_empty()) {
            self.text = text.to_owned();
            self.observer.did_change_text(&self.text);
        }
        self.remove_chip_at(index);
    }

    // --- Selection ---

    /// Request selection of the chip holding `token`, subject to the
    /// observer's veto.
    pub fn select_token(&mut self, token: &Token) {
        self.assert_owner_thread();
        if let Some(index) = self.chips.iter().position(|c| &c.token == token) {
            self.request_selection(index);
        }
    }

    /// Request selection of the chip at `index`, subject to the observer's
    /// veto. Selecting one chip deselects every other.
    pub fn select_token_at(&mut self, index: usize) {
        self.assert_owner_thread();
        self.request_selection(index);
    }

    /// Deselect every chip. Unconditional; the veto is not consulted.
    pub fn deselect_all(&mut self) {
        self.assert_owner_thread();
        self.deselect_all_quiet();
        self.reposition();
    }

    /// A tap on a chip: notify, then request selection.
    pub fn tap_token(&mut self, index: usize) {
        self.assert_owner_thread();
        let Some(chip) = self.chips.get(index) else {
            return;
        };
        let token = chip.token.clone();
        self.observer.did_tap_token(&token);
        self.request_selection(index);
    }

    /// A tap on the field background: deselect everything and, in edit
    /// mode, begin editing.
    pub fn tap_background(&mut self) {
        self.assert_owner_thread();
        self.deselect_all();
        if self.config.mode == DisplayMode::View {
            return;
        }
        self.begin_editing();
    }

    /// A long-press on a chip: ask the observer for context-menu actions.
    ///
    /// Returns the actions for the host to present; empty when the
    /// observer declines. Offering a menu selects the chip first.
    pub fn long_press_token(&mut self, index: usize) -> Vec<MenuItem> {
        self.assert_owner_thread();
        let Some(chip) = self.chips.get(index) else {
            return Vec::new();
        };
        if !self.observer.should_display_menu() {
            return Vec::new();
        }
        let token = chip.token.clone();
        let items = self.observer.menu_items_for_token(&token);
        if items.is_empty() {
            return items;
        }
        self.request_selection(index);
        items
    }

    // --- Editing lifecycle ---

    /// Enter an edit session. No-op in display-only mode.
    pub fn begin_editing(&mut self) {
        self.assert_owner_thread();
        if self.config.mode == DisplayMode::View || self.editing {
            return;
        }
        self.editing = true;
        self.observer.did_begin_editing();
        self.deselect_all_quiet();
        self.reposition();
    }

    /// Leave the edit session, committing pending typed text when
    /// `tokenize_on_end_editing` is set.
    pub fn end_editing(&mut self) {
        self.assert_owner_thread();
        if !self.editing {
            return;
        }
        self.editing = false;
        self.observer.did_end_editing();
        if self.config.tokenize_on_end_editing {
            self.tokenize_text();
        }
        self.reposition();
    }

    // --- Host geometry and attachments ---

    /// Tell the field how wide its container is. Zero width collapses the
    /// layout instead of packing against a degenerate boundary.
    pub fn set_bounds_width(&mut self, width: f32) {
        self.assert_owner_thread();
        self.bounds_width = width.max(0.0);
        self.reposition();
    }

    /// Collapse the field to zero height, or restore automatic height.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.assert_owner_thread();
        if self.collapsed == collapsed {
            return;
        }
        self.collapsed = collapsed;
        self.reposition();
    }

    /// Install (or remove) the decoration view by its measured size.
    pub fn set_field_view(&mut self, size: Option<Size>) {
        self.assert_owner_thread();
        self.field_view = size;
        self.reposition();
    }

    /// Install (or remove) the trailing accessory view by its measured
    /// size.
    pub fn set_accessory_view(&mut self, size: Option<Size>) {
        self.assert_owner_thread();
        self.accessory = size;
        self.reposition();
    }

    /// Attach an opaque input-accessory surface for the host to install on
    /// its native text-entry view. The core only records it.
    pub fn set_input_accessory(&mut self, surface: Option<Arc<dyn Any + Send + Sync>>) {
        self.assert_owner_thread();
        self.input_accessory = surface;
    }

    /// The attached input-accessory surface, if any.
    pub fn input_accessory(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.input_accessory.as_ref()
    }

    // --- Configuration ---

    /// Set the field-name label text. Relayouts only on change.
    pub fn set_field_name(&mut self, name: Option<String>) {
        self.assert_owner_thread();
        if self.config.field_name == name {
            return;
        }
        self.config.field_name = name;
        self.reposition();
    }

    /// Set the placeholder text. Visibility still follows the collection.
    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.assert_owner_thread();
        self.config.placeholder = placeholder;
    }

    /// Change the font, re-measuring every chip.
    pub fn set_font(&mut self, font: FontMetrics) {
        self.assert_owner_thread();
        self.config.font = font;
        self.remeasure_all();
        self.reposition();
    }

    /// Set the field-level default chip colors.
    pub fn set_colors(
        &mut self,
        text: Option<Rgb>,
        selected_text: Option<Rgb>,
        selected_background: Option<Rgb>,
    ) {
        self.assert_owner_thread();
        self.config.text_color = text;
        self.config.selected_text_color = selected_text;
        self.config.selected_background_color = selected_background;
    }

    /// Switch between editable and display-only mode.
    pub fn set_editable(&mut self, editable: bool) {
        self.assert_owner_thread();
        let mode = if editable {
            DisplayMode::Edit
        } else {
            DisplayMode::View
        };
        if self.config.mode == mode {
            return;
        }
        self.config.mode = mode;
        if mode == DisplayMode::View {
            self.editing = false;
        }
        self.reposition();
    }

    /// Edit the configuration in place, then re-measure and relayout.
    pub fn update_config(&mut self, edit: impl FnOnce(&mut FieldConfig)) {
        self.assert_owner_thread();
        edit(&mut self.config);
        self.remeasure_all();
        self.reposition();
    }

    // --- Queries ---

    /// The tokens, in collection (and row-fill) order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.chips.iter().map(|c| &c.token)
    }

    /// Number of tokens in the collection.
    pub fn token_count(&self) -> usize {
        self.chips.len()
    }

    /// The free-text buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether an edit session is active.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The selected token, if any.
    pub fn selected_token(&self) -> Option<&Token> {
        self.chips.iter().find(|c| c.selected).map(|c| &c.token)
    }

    /// The most recent layout pass.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The current content height.
    pub fn content_height(&self) -> f32 {
        self.layout.content_height
    }

    /// Whether the placeholder should be shown.
    pub fn placeholder_visible(&self) -> bool {
        self.chips.is_empty()
    }

    /// The current configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Fully resolved colors for the chip at `index`.
    pub fn chip_colors(&self, index: usize) -> Option<ChipColors> {
        self.chips
            .get(index)
            .map(|c| ChipColors::resolve(&c.token, &self.config))
    }

    // --- Internals ---

    fn selected_index(&self) -> Option<usize> {
        self.chips.iter().position(|c| c.selected)
    }

    fn remove_chip_at(&mut self, index: usize) {
        let chip = self.chips.remove(index);
        self.deselect_all_quiet();
        tracing::debug!(
            text = chip.token.display_text(),
            count = self.chips.len(),
            "token removed"
        );
        self.observer.did_remove_token(&chip.token);
        self.reposition();
    }

    fn request_selection(&mut self, index: usize) {
        let Some(chip) = self.chips.get(index) else {
            return;
        };
        let token = chip.token.clone();
        if !self.observer.can_select_token(&token) {
            return;
        }
        self.select_chip_unchecked(index);
        self.observer.did_select_token(&token);
    }

    fn select_chip_unchecked(&mut self, index: usize) {
        for (i, chip) in self.chips.iter_mut().enumerate() {
            chip.selected = i == index;
        }
        self.reposition();
    }

    fn deselect_all_quiet(&mut self) {
        for chip in &mut self.chips {
            chip.selected = false;
        }
    }

    fn remeasure_all(&mut self) {
        let font = self.config.font;
        for chip in &mut self.chips {
            chip.remeasure(self.measurer.as_ref(), &font);
        }
    }

    fn reposition(&mut self) {
        if self.collapsed {
            self.layout = Layout::zeroed(self.chips.len());
            self.note_height(0.0);
            return;
        }
        if self.bounds_width <= 0.0 {
            // Not laid out yet: collapse rather than pack against a zero
            // boundary. Height notifications wait for a real width.
            self.layout = Layout::zeroed(self.chips.len());
            return;
        }
        let metrics: Vec<ChipMetrics> = self
            .chips
            .iter()
            .map(|c| ChipMetrics {
                size: c.size,
                selected: c.selected,
            })
            .collect();
        let field_label = if self.config.has_field_name() {
            self.config
                .field_name
                .as_deref()
                .map(|name| self.measurer.measure(name, &self.config.font))
        } else {
            None
        };
        let request = LayoutRequest {
            config: &self.config,
            chips: &metrics,
            field_view: self.field_view,
            field_label,
            accessory: self.accessory,
            bounds_width: self.bounds_width,
            editing: self.editing,
        };
        let layout = solve(&request);
        let height = layout.content_height;
        self.layout = layout;
        self.note_height(height);
    }

    fn note_height(&mut self, height: f32) {
        if (height - self.last_height).abs() > f32::EPSILON {
            self.last_height = height;
            tracing::debug!(height = f64::from(height), "content height changed");
            self.observer.did_change_height(height);
        }
    }

    fn assert_owner_thread(&self) {
        #[cfg(debug_assertions)]
        debug_assert_eq!(
            std::thread::current().id(),
            self.owner_thread,
            "TokenField must only be used from the thread that created it"
        );
    }
}

impl Default for TokenField {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TokenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenField")
            .field("tokens", &self.chips.len())
            .field("text", &self.text)
            .field("editing", &self.editing)
            .field("collapsed", &self.collapsed)
            .field("bounds_width", &self.bounds_width)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::TokenField;
    use crate::config::FieldConfig;
    use crate::observer::{FieldObserver, MenuItem};
    use chipfield_core::{FontMetrics, Rgb, Size, TextMeasurer, Token, TokenStyle};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Recorded {
        Added(String),
        Removed(String),
        Selected(String),
        Tapped(String),
        TextChanged(String),
        HeightChanged(f32),
        BeganEditing,
        EndedEditing,
    }

    #[derive(Default)]
    struct Recording {
        events: Rc<RefCell<Vec<Recorded>>>,
        resolve_text: bool,
        allow_select: bool,
        menu: Vec<MenuItem>,
    }

    impl FieldObserver for Recording {
        fn can_select_token(&mut self, _token: &Token) -> bool {
            self.allow_select
        }
        fn did_select_token(&mut self, token: &Token) {
            self.events
                .borrow_mut()
                .push(Recorded::Selected(token.display_text().to_owned()));
        }
        fn did_tap_token(&mut self, token: &Token) {
            self.events
                .borrow_mut()
                .push(Recorded::Tapped(token.display_text().to_owned()));
        }
        fn did_begin_editing(&mut self) {
            self.events.borrow_mut().push(Recorded::BeganEditing);
        }
        fn did_end_editing(&mut self) {
            self.events.borrow_mut().push(Recorded::EndedEditing);
        }
        fn did_change_text(&mut self, text: &str) {
            self.events
                .borrow_mut()
                .push(Recorded::TextChanged(text.to_owned()));
        }
        fn did_add_token(&mut self, token: &Token) {
            self.events
                .borrow_mut()
                .push(Recorded::Added(token.display_text().to_owned()));
        }
        fn did_remove_token(&mut self, token: &Token) {
            self.events
                .borrow_mut()
                .push(Recorded::Removed(token.display_text().to_owned()));
        }
        fn token_for_text(&mut self, text: &str) -> Option<Token> {
            self.resolve_text.then(|| Token::text(text))
        }
        fn did_change_height(&mut self, height: f32) {
            self.events
                .borrow_mut()
                .push(Recorded::HeightChanged(height));
        }
        fn should_display_menu(&mut self) -> bool {
            !self.menu.is_empty()
        }
        fn menu_items_for_token(&mut self, _token: &Token) -> Vec<MenuItem> {
            self.menu.clone()
        }
    }

    /// Every chip measures 60x25 regardless of text.
    struct FixedChip;

    impl TextMeasurer for FixedChip {
        fn measure(&self, _text: &str, _font: &FontMetrics) -> Size {
            Size::new(52.0, 21.0)
        }
    }

    fn recording_field() -> (TokenField, Rc<RefCell<Vec<Recorded>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let observer = Recording {
            events: Rc::clone(&events),
            resolve_text: true,
            allow_select: true,
            menu: Vec::new(),
        };
        let field = TokenField::new()
            .with_observer(Box::new(observer))
            .with_measurer(Box::new(FixedChip));
        (field, events)
    }

    fn added_count(events: &Rc<RefCell<Vec<Recorded>>>) -> usize {
        events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Recorded::Added(_)))
            .count()
    }

    #[test]
    fn duplicate_add_is_idempotent() {
        let (mut field, events) = recording_field();
        field.add_token(Token::text("x"));
        field.add_token(Token::text("x"));
        assert_eq!(field.token_count(), 1);
        assert_eq!(added_count(&events), 1);
    }

    #[test]
    fn remove_absent_token_is_a_noop() {
        let (mut field, events) = recording_field();
        field.add_token(Token::text("a"));
        events.borrow_mut().clear();
        field.remove_token(&Token::text("missing"));
        assert_eq!(field.token_count(), 1);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn remove_preserves_order() {
        let (mut field, _) = recording_field();
        for name in ["a", "b", "c"] {
            field.add_token(Token::text(name));
        }
        field.remove_token(&Token::text("b"));
        let names: Vec<_> = field.tokens().map(|t| t.display_text().to_owned()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn remove_all_fires_per_token_in_order() {
        let (mut field, events) = recording_field();
        for name in ["a", "b", "c"] {
            field.add_token(Token::text(name));
        }
        events.borrow_mut().clear();
        field.remove_all_tokens();
        let removed: Vec<_> = events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Recorded::Removed(name) => Some(name.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(removed, ["a", "b", "c"]);
        assert_eq!(field.token_count(), 0);
    }

    #[test]
    fn replace_restyles_without_events() {
        let (mut field, events) = recording_field();
        field.add_token(Token::text("a"));
        events.borrow_mut().clear();

        let restyled = Token::text("a").with_style(TokenStyle {
            text_color: Some(Rgb::new(1, 2, 3)),
            ..TokenStyle::default()
        });
        field.replace_token(&Token::text("a"), &restyled);

        let token = field.tokens().next().unwrap();
        assert_eq!(token.style().text_color, Some(Rgb::new(1, 2, 3)));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn replace_absent_token_is_a_noop() {
        let (mut field, events) = recording_field();
        field.replace_token(&Token::text("ghost"), &Token::text("ghost"));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn at_most_one_chip_selected() {
        let (mut field, _) = recording_field();
        for name in ["a", "b", "c"] {
            field.add_token(Token::text(name));
        }
        field.select_token_at(0);
        field.select_token_at(2);
        field.select_token_at(1);
        let selected: Vec<_> = field
            .layout()
            .chips
            .iter()
            .filter(|c| c.selected)
            .collect();
        assert!(selected.len() <= 1);
        assert_eq!(field.selected_token().unwrap().display_text(), "b");
    }

    #[test]
    fn selection_veto_blocks_selection() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let observer = Recording {
            events: Rc::clone(&events),
            resolve_text: false,
            allow_select: false,
            menu: Vec::new(),
        };
        let mut field = TokenField::new().with_observer(Box::new(observer));
        field.add_token(Token::text("a"));
        field.select_token_at(0);
        assert!(field.selected_token().is_none());
        assert!(
            !events
                .borrow()
                .iter()
                .any(|e| matches!(e, Recorded::Selected(_)))
        );
    }

    #[test]
    fn tap_notifies_then_selects() {
        let (mut field, events) = recording_field();
        field.add_token(Token::text("a"));
        events.borrow_mut().clear();
        field.tap_token(0);
        let recorded = events.borrow();
        assert_eq!(recorded[0], Recorded::Tapped("a".into()));
        assert_eq!(recorded[1], Recorded::Selected("a".into()));
    }

    #[test]
    fn backspace_selects_last_then_deletes() {
        let (mut field, events) = recording_field();
        field.add_token(Token::text("a"));
        field.add_token(Token::text("b"));
        events.borrow_mut().clear();

        field.backspace();
        assert_eq!(field.selected_token().unwrap().display_text(), "b");
        // The reach-back selection fires no selection event.
        assert!(
            !events
                .borrow()
                .iter()
                .any(|e| matches!(e, Recorded::Selected(_)))
        );

        field.backspace();
        assert_eq!(field.token_count(), 1);
        assert!(
            events
                .borrow()
                .iter()
                .any(|e| *e == Recorded::Removed("b".into()))
        );
    }

    #[test]
    fn backspace_pops_one_grapheme() {
        let (mut field, _) = recording_field();
        field.insert_text("ab");
        field.backspace();
        assert_eq!(field.text(), "a");
        field.backspace();
        assert_eq!(field.text(), "");
    }

    #[test]
    fn typing_over_selected_chip_seeds_buffer() {
        let (mut field, _) = recording_field();
        field.add_token(Token::text("alice"));
        field.backspace(); // select the chip
        field.insert_text("z");
        assert_eq!(field.token_count(), 0);
        assert_eq!(field.text(), "z");
    }

    #[test]
    fn delimiter_commits_typed_text() {
        let (mut field, events) = recording_field();
        field.insert_text("bob,");
        assert_eq!(field.token_count(), 1);
        assert_eq!(field.tokens().next().unwrap().display_text(), "bob");
        assert_eq!(field.text(), "");
        assert_eq!(added_count(&events), 1);
    }

    #[test]
    fn declined_resolution_keeps_text() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let observer = Recording {
            events: Rc::clone(&events),
            resolve_text: false,
            allow_select: true,
            menu: Vec::new(),
        };
        let mut field = TokenField::new().with_observer(Box::new(observer));
        field.insert_text("bob");
        assert!(field.tokenize_text().is_none());
        assert_eq!(field.text(), "bob");
        assert_eq!(field.token_count(), 0);
    }

    #[test]
    fn end_editing_commits_pending_text_by_default() {
        let (mut field, _) = recording_field();
        field.begin_editing();
        field.insert_text("carol");
        field.end_editing();
        assert_eq!(field.token_count(), 1);
        assert_eq!(field.text(), "");
    }

    #[test]
    fn end_editing_keeps_text_when_tokenization_disabled() {
        let (mut field, _) = recording_field();
        field.update_config(|config| config.tokenize_on_end_editing = false);
        field.begin_editing();
        field.insert_text("carol");
        field.end_editing();
        assert_eq!(field.token_count(), 0);
        assert_eq!(field.text(), "carol");
    }

    #[test]
    fn begin_editing_notifies_then_clears_selection() {
        let (mut field, events) = recording_field();
        field.add_token(Token::text("a"));
        field.select_token_at(0);
        events.borrow_mut().clear();

        field.begin_editing();
        assert!(field.selected_token().is_none());
        // The lifecycle notification precedes the silent deselection.
        assert_eq!(events.borrow().first(), Some(&Recorded::BeganEditing));
    }

    #[test]
    fn editing_lifecycle_notifies() {
        let (mut field, events) = recording_field();
        field.begin_editing();
        field.begin_editing(); // second call is a no-op
        field.end_editing();
        let lifecycle: Vec<_> = events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Recorded::BeganEditing | Recorded::EndedEditing))
            .cloned()
            .collect();
        assert_eq!(lifecycle, [Recorded::BeganEditing, Recorded::EndedEditing]);
    }

    #[test]
    fn fourth_token_wrapping_fires_larger_height() {
        let (mut field, events) = recording_field();
        field.begin_editing();
        // 234pt row region; chips are 60pt, so three fit and a fourth wraps.
        field.set_bounds_width(250.0);
        for name in ["a", "b", "c"] {
            field.add_token(Token::text(name));
        }
        let before = field.content_height();
        assert_eq!(field.layout().rows, 1);

        events.borrow_mut().clear();
        field.add_token(Token::text("d"));
        let after = field.content_height();
        assert_eq!(field.layout().rows, 2);
        assert!(after > before);
        assert!(
            events
                .borrow()
                .iter()
                .any(|e| matches!(e, Recorded::HeightChanged(h) if *h == after))
        );
    }

    #[test]
    fn no_height_event_before_bounds_are_known() {
        let (mut field, events) = recording_field();
        field.add_token(Token::text("a"));
        assert!(
            !events
                .borrow()
                .iter()
                .any(|e| matches!(e, Recorded::HeightChanged(_)))
        );
    }

    #[test]
    fn collapse_and_restore_height() {
        let (mut field, events) = recording_field();
        field.set_bounds_width(300.0);
        let auto_height = field.content_height();
        assert!(auto_height > 0.0);

        field.set_collapsed(true);
        assert_eq!(field.content_height(), 0.0);
        assert!(
            events
                .borrow()
                .iter()
                .any(|e| matches!(e, Recorded::HeightChanged(h) if *h == 0.0))
        );

        field.set_collapsed(false);
        assert_eq!(field.content_height(), auto_height);
    }

    #[test]
    fn view_mode_rejects_edits() {
        let (mut field, events) = recording_field();
        field.add_token(Token::text("a"));
        field.set_editable(false);
        events.borrow_mut().clear();

        field.insert_text("zzz");
        field.backspace();
        field.begin_editing();

        assert_eq!(field.text(), "");
        assert_eq!(field.token_count(), 1);
        assert!(!field.is_editing());
        assert!(
            !events
                .borrow()
                .iter()
                .any(|e| matches!(e, Recorded::BeganEditing))
        );
    }

    #[test]
    fn long_press_offers_menu_and_selects() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let observer = Recording {
            events: Rc::clone(&events),
            resolve_text: false,
            allow_select: true,
            menu: vec![MenuItem::new("Delete")],
        };
        let mut field = TokenField::new().with_observer(Box::new(observer));
        field.add_token(Token::text("a"));

        let items = field.long_press_token(0);
        assert_eq!(items, vec![MenuItem::new("Delete")]);
        assert!(field.selected_token().is_some());
    }

    #[test]
    fn long_press_without_menu_is_silent() {
        let (mut field, _) = recording_field();
        field.add_token(Token::text("a"));
        assert!(field.long_press_token(0).is_empty());
        assert!(field.selected_token().is_none());
    }

    #[test]
    fn placeholder_follows_collection() {
        let (mut field, _) = recording_field();
        field.set_bounds_width(300.0);
        assert!(field.placeholder_visible());
        assert!(field.layout().show_placeholder);
        field.add_token(Token::text("a"));
        assert!(!field.placeholder_visible());
        assert!(!field.layout().show_placeholder);
    }

    #[test]
    fn collection_change_clears_selection() {
        let (mut field, _) = recording_field();
        field.add_token(Token::text("a"));
        field.select_token_at(0);
        assert!(field.selected_token().is_some());
        field.add_token(Token::text("b"));
        assert!(field.selected_token().is_none());
    }

    #[test]
    fn presentation_setters_apply() {
        let (mut field, _) = recording_field();
        field.add_token(Token::text("a"));
        field.set_placeholder(Some("Add people".into()));
        field.set_colors(Some(Rgb::new(1, 1, 1)), None, Some(Rgb::new(2, 2, 2)));
        field.set_input_accessory(Some(std::sync::Arc::new(7u8)));

        assert_eq!(field.config().placeholder.as_deref(), Some("Add people"));
        let colors = field.chip_colors(0).unwrap();
        assert_eq!(colors.text, Rgb::new(1, 1, 1));
        assert_eq!(colors.selected_text, Rgb::WHITE);
        assert_eq!(colors.selected_background, Rgb::new(2, 2, 2));
        let accessory = field.input_accessory().unwrap();
        assert_eq!(accessory.downcast_ref::<u8>(), Some(&7));
    }

    #[test]
    fn with_config_applies_builder() {
        let config = FieldConfig::default().with_min_height(60.0);
        let mut field = TokenField::new().with_config(config);
        field.set_bounds_width(300.0);
        assert_eq!(field.content_height(), 60.0);
    }
}
