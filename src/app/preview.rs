//! File preview sub-controller for waypoint.
//!
//! Smaller sibling of the navigation state: load, cap, paginate. Content is
//! size-gated before reading by the provider, split into lines capped at a
//! configured maximum, and scrolled through an offset that is independent of
//! the navigation selection. Preview failures never touch navigation state.

use crate::core::error::NavError;
use crate::core::format::sanitize_line;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Loaded preview content: capped lines plus how many were cut off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreview {
    lines: Vec<String>,
    total_lines: usize,
}

impl FilePreview {
    /// Splits raw content into display lines, keeping at most `max_lines`
    /// and sanitizing each to the given display width.
    pub fn build(content: &str, max_lines: usize, max_width: usize) -> Self {
        let total_lines = content.lines().count();
        let lines = content
            .lines()
            .take(max_lines)
            .map(|l| sanitize_line(l, max_width))
            .collect();
        FilePreview { lines, total_lines }
    }

    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[inline]
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Number of lines dropped by the cap.
    #[inline]
    pub fn omitted_lines(&self) -> usize {
        self.total_lines - self.lines.len()
    }

    /// Trailing marker for the render boundary, present when lines were cut.
    pub fn truncation_marker(&self) -> Option<String> {
        match self.omitted_lines() {
            0 => None,
            n => Some(format!("[{} more lines]", n)),
        }
    }
}

/// State of the preview pane: loaded content or error, the path it belongs
/// to, an independent scroll offset and debounce bookkeeping.
pub struct PreviewState {
    content: Option<FilePreview>,
    error: Option<NavError>,
    current_path: Option<PathBuf>,
    scroll_offset: usize,
    viewport_lines: usize,
    pending: bool,
    last_input_time: Instant,
    requested_at: Option<Instant>,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            content: None,
            error: None,
            current_path: None,
            scroll_offset: 0,
            viewport_lines: 0,
            pending: false,
            last_input_time: Instant::now(),
            requested_at: None,
        }
    }
}

impl PreviewState {
    // Getters / accessors

    #[inline]
    pub fn content(&self) -> Option<&FilePreview> {
        self.content.as_ref()
    }

    #[inline]
    pub fn error(&self) -> Option<&NavError> {
        self.error.as_ref()
    }

    #[inline]
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    #[inline]
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    // Debounce

    /// Marks the preview as wanted and restarts the debounce timer. Any
    /// earlier in-flight request is superseded; its timeout clock stops.
    pub fn mark_pending(&mut self, path: PathBuf) {
        self.pending = true;
        self.current_path = Some(path);
        self.last_input_time = Instant::now();
        self.requested_at = None;
    }

    /// True once the debounce delay has passed for a pending request.
    pub fn should_trigger(&self, debounce: Duration) -> bool {
        self.pending && self.last_input_time.elapsed() >= debounce
    }

    /// Takes the pending path, clearing the pending flag.
    pub fn take_pending(&mut self) -> Option<PathBuf> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.current_path.clone()
    }

    /// Starts the timeout clock for a request handed to the worker.
    pub fn mark_requested(&mut self) {
        self.requested_at = Some(Instant::now());
    }

    /// True once an in-flight request has outlived `timeout`.
    pub fn request_timed_out(&self, timeout: Duration) -> bool {
        self.requested_at.is_some_and(|at| at.elapsed() >= timeout)
    }

    // Content updates; each is guarded by the path the response was for.

    pub fn set_viewport_lines(&mut self, lines: usize) {
        self.viewport_lines = lines;
        self.clamp_offset();
    }

    /// Installs loaded content if the response still matches the current
    /// path; a stale preview is dropped silently.
    pub fn update_content(&mut self, path: &Path, preview: FilePreview) {
        if self.current_path.as_deref() != Some(path) {
            log::debug!("discarding stale preview of {}", path.display());
            return;
        }
        self.content = Some(preview);
        self.error = None;
        self.scroll_offset = 0;
        self.requested_at = None;
    }

    /// Installs a preview failure under the same staleness guard.
    pub fn set_error(&mut self, path: &Path, error: NavError) {
        if self.current_path.as_deref() != Some(path) {
            return;
        }
        self.content = None;
        self.error = Some(error);
        self.scroll_offset = 0;
        self.requested_at = None;
    }

    pub fn clear(&mut self) {
        self.content = None;
        self.error = None;
        self.current_path = None;
        self.scroll_offset = 0;
        self.pending = false;
        self.requested_at = None;
    }

    // Scrolling

    /// Moves the scroll offset, clamped to `[0, total - viewport]` with the
    /// same incremental technique as the listing scroll window.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
        self.clamp_offset();
    }

    fn clamp_offset(&mut self) {
        let total = self.content.as_ref().map_or(0, |c| c.lines().len());
        let max = total.saturating_sub(self.viewport_lines);
        self.scroll_offset = self.scroll_offset.min(max);
    }

    /// The slice of preview lines currently in view.
    pub fn visible_lines(&self) -> &[String] {
        let Some(content) = &self.content else {
            return &[];
        };
        let lines = content.lines();
        let start = self.scroll_offset.min(lines.len());
        let end = (start + self.viewport_lines).min(lines.len());
        &lines[start..end]
    }
}
