//! Keyboard navigation core: item selection, link focus and the quick-jump
//! overlay, driven one key at a time through [`handle_key`].
//!
//! Nothing here touches the terminal. Link geometry comes in through
//! [`LinkLayout`], the one persisted flag through [`SessionFlags`], and every
//! outward action goes back to the host as an [`Effect`].

mod dispatch;
mod flags;
mod links;
mod quick_jump;
mod selection;
mod state;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use dispatch::{Context, FocusTarget, KeyClass, Outcome, classify, handle_key};
pub use flags::{MemoryFlags, SessionFlags};
pub use links::LinkFocus;
pub use quick_jump::QuickJump;
pub use state::Navigator;

pub use crate::ops::rows::{LinkLayout, LinkPosition, LinkRow};

/// Something the host must do after a key is handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load another page in place of the current one
    Navigate(String),
    /// Return to the previous page
    GoBack,
    /// Open a URL outside the browser
    OpenExternal(String),
    /// Smoothly scroll so the item sits in the middle of the viewport
    ScrollIntoView { item: usize },
}

/// Which component owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving between items, no link focused
    Browsing,
    /// A link of the selected item is focused
    LinkFocused,
    /// Quick-jump overlay open; it takes every key
    OverlayOpen,
}
