//! Virtual scroll window for waypoint.
//!
//! Given the total entry count, the selection and the viewport height, the
//! window tracks the half-open index range `[start, end)` that is allowed to
//! reach the renderer. Recomputation is incremental: the window only moves
//! when the selection leaves it, so a selection change is O(1) regardless of
//! directory size.

/// The visible slice of a listing, recomputed on every selection or viewport
/// change and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollWindow {
    start: usize,
    end: usize,
    total_items: usize,
    viewport_height: usize,
}

impl ScrollWindow {
    /// Computes the next window from the previous one.
    ///
    /// The start only moves when the selection falls outside the current
    /// window, then clamps so the window never runs past the list.
    pub fn recompute(
        previous: ScrollWindow,
        selected: usize,
        total_items: usize,
        viewport_height: usize,
    ) -> ScrollWindow {
        if total_items == 0 || viewport_height == 0 {
            return ScrollWindow {
                start: 0,
                end: 0,
                total_items,
                viewport_height,
            };
        }

        let mut start = if selected < previous.start {
            selected
        } else if selected >= previous.start + viewport_height {
            selected + 1 - viewport_height
        } else {
            previous.start
        };

        start = start.min(total_items.saturating_sub(viewport_height));
        let end = total_items.min(start + viewport_height);

        ScrollWindow {
            start,
            end,
            total_items,
            viewport_height,
        }
    }

    // Accessors

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    #[inline]
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// True when entries exist above the window.
    #[inline]
    pub fn more_above(&self) -> bool {
        self.start > 0
    }

    /// True when entries exist below the window.
    #[inline]
    pub fn more_below(&self) -> bool {
        self.end < self.total_items
    }
}
