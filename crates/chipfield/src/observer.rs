#![forbid(unsafe_code)]

//! The observer protocol.
//!
//! A single observer object with every hook individually defaulted: hosts
//! implement only what they care about. Notifications are fire-and-forget
//! and synchronous.
//!
//! Re-entrancy: observer callbacks run while the field is mid-mutation, so
//! mutating the same [`TokenField`] from inside a callback is unsupported.
//! Record what you need and act after the call returns.
//!
//! [`TokenField`]: crate::field::TokenField

use chipfield_core::Token;

/// One action offered in a chip's context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Action title shown to the user.
    pub title: String,
}

impl MenuItem {
    /// Create a menu item.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Field lifecycle and interaction hooks. Every method has a no-op (or
/// permissive) default.
pub trait FieldObserver {
    /// Asked before a chip is selected. Return `false` to veto.
    ///
    /// Not consulted for unconditional deselection (edit commit, collection
    /// change).
    fn can_select_token(&mut self, _token: &Token) -> bool {
        true
    }

    /// A chip became the selected chip.
    fn did_select_token(&mut self, _token: &Token) {}

    /// A chip was tapped (fires before the selection request).
    fn did_tap_token(&mut self, _token: &Token) {}

    /// The field entered editing.
    fn did_begin_editing(&mut self) {}

    /// The field left editing.
    fn did_end_editing(&mut self) {}

    /// The free-text buffer changed.
    fn did_change_text(&mut self, _text: &str) {}

    /// A token joined the collection.
    fn did_add_token(&mut self, _token: &Token) {}

    /// A token left the collection.
    fn did_remove_token(&mut self, _token: &Token) {}

    /// Resolve typed text into a token. Returning `None` declines; the
    /// typed text then produces no token.
    fn token_for_text(&mut self, _text: &str) -> Option<Token> {
        None
    }

    /// The computed content height changed.
    fn did_change_height(&mut self, _height: f32) {}

    /// Whether a long-press on a chip should offer a context menu.
    fn should_display_menu(&mut self) -> bool {
        false
    }

    /// The context-menu actions for a chip. Only consulted after
    /// [`FieldObserver::should_display_menu`] returned `true`.
    fn menu_items_for_token(&mut self, _token: &Token) -> Vec<MenuItem> {
        Vec::new()
    }
}

/// Observer that ignores everything; the default for a fresh field.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FieldObserver for NoopObserver {}

#[cfg(test)]
mod tests {
    use super::{FieldObserver, NoopObserver};
    use chipfield_core::Token;

    #[test]
    fn defaults_are_permissive() {
        let mut observer = NoopObserver;
        let token = Token::text("x");
        assert!(observer.can_select_token(&token));
        assert!(observer.token_for_text("x").is_none());
        assert!(!observer.should_display_menu());
        assert!(observer.menu_items_for_token(&token).is_empty());
    }
}
