//! Input intents for waypoint.
//!
//! The key-decoding boundary translates raw terminal events into this closed
//! union; the session consumes it exhaustively. Keeping the union closed
//! means a new intent fails to compile until every consumer handles it.

use crate::core::pipeline::SortKey;

use std::collections::HashSet;

/// One user intention, already decoded from whatever input produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    EnterSelected,
    GoToParent,
    /// Re-read the current directory, bypassing the cache.
    Refresh,
    /// Sort by this key; selecting the active key flips the order.
    SortBy(SortKey),
    ToggleHidden,
    ToggleDirectoriesFirst,
    /// Filter files to this lowercase extension allow-list; None clears it.
    SetExtensionFilter(Option<HashSet<String>>),
    /// Live search edit; applied after the trailing-edge debounce.
    SetSearch(String),
    ClearSearch,
    PreviewScrollUp,
    PreviewScrollDown,
    Quit,
}

/// Result of dispatching one intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    Continue,
    Quit,
}
