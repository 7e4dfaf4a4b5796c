//! Navigation state machine for waypoint.
//!
//! [NavState] owns the current path, the raw and derived entry lists, the
//! selection and the sort/filter configuration. All mutation goes through
//! [NavState::handle], which consumes the closed [NavEvent] union and returns
//! an optional [NavEffect] for the session to perform; the state itself never
//! does I/O. Asynchronous completions are accepted only while their path is
//! still the pending one, so responses superseded by later navigation fall on
//! the floor.

use crate::core::entry::Entry;
use crate::core::error::NavError;
use crate::core::pipeline::{self, FilterOptions, SortConfig};

use std::path::{Path, PathBuf};

/// Lifecycle phase of the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    /// No directory loaded yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// Entries are available.
    Ready,
    /// The last request failed; a new navigation action recovers.
    Error,
}

/// Events consumed by the navigation state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    RequestDirectory(PathBuf),
    DirectoryLoaded {
        path: PathBuf,
        entries: Vec<Entry>,
    },
    DirectoryFailed {
        path: PathBuf,
        error: NavError,
    },
    MoveSelection(isize),
    ChangeSortConfig(SortConfig),
    ChangeFilterOptions(FilterOptions),
    EnterSelected,
}

/// Side effect a transition asks the session to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEffect {
    /// Load the directory at this path (cache first, then worker).
    Load(PathBuf),
}

/// Navigation, selection and listing state of a session.
pub struct NavState {
    current_path: PathBuf,
    pending_path: Option<PathBuf>,
    raw_entries: Vec<Entry>,
    visible_entries: Vec<Entry>,
    selected: usize,
    sort: SortConfig,
    filter: FilterOptions,
    phase: NavPhase,
    error: Option<String>,
}

impl NavState {
    pub fn new(initial_path: PathBuf, sort: SortConfig, filter: FilterOptions) -> Self {
        Self {
            current_path: initial_path,
            pending_path: None,
            raw_entries: Vec::new(),
            visible_entries: Vec::new(),
            selected: 0,
            sort,
            filter,
            phase: NavPhase::Idle,
            error: None,
        }
    }

    // Getters / accessors

    #[inline]
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    #[inline]
    pub fn pending_path(&self) -> Option<&Path> {
        self.pending_path.as_deref()
    }

    #[inline]
    pub fn visible_entries(&self) -> &[Entry] {
        &self.visible_entries
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn sort_config(&self) -> SortConfig {
        self.sort
    }

    #[inline]
    pub fn filter_options(&self) -> &FilterOptions {
        &self.filter
    }

    #[inline]
    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    #[inline]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.visible_entries.get(self.selected)
    }

    /// Applies one event to the state.
    ///
    /// This is the single transition function; nothing else mutates the
    /// state. Returns the effect the session must perform, if any.
    pub fn handle(&mut self, event: NavEvent) -> Option<NavEffect> {
        match event {
            NavEvent::RequestDirectory(path) => self.request_directory(path),
            NavEvent::DirectoryLoaded { path, entries } => {
                self.directory_loaded(path, entries);
                None
            }
            NavEvent::DirectoryFailed { path, error } => {
                self.directory_failed(path, error);
                None
            }
            NavEvent::MoveSelection(delta) => {
                self.move_selection(delta);
                None
            }
            NavEvent::ChangeSortConfig(sort) => {
                self.change_sort(sort);
                None
            }
            NavEvent::ChangeFilterOptions(filter) => {
                self.change_filter(filter);
                None
            }
            NavEvent::EnterSelected => self.enter_selected(),
        }
    }

    /// Valid from any phase. A response to a previously pending path becomes
    /// stale the moment a new request is recorded.
    fn request_directory(&mut self, path: PathBuf) -> Option<NavEffect> {
        if let Some(old) = &self.pending_path {
            log::debug!("superseding pending load of {}", old.display());
        }
        self.pending_path = Some(path.clone());
        self.phase = NavPhase::Loading;
        Some(NavEffect::Load(path))
    }

    fn directory_loaded(&mut self, path: PathBuf, entries: Vec<Entry>) {
        if self.pending_path.as_deref() != Some(path.as_path()) {
            log::debug!("discarding stale load of {}", path.display());
            return;
        }

        self.visible_entries = pipeline::process(&entries, &self.filter, self.sort, &path);
        self.raw_entries = entries;
        self.current_path = path;
        self.pending_path = None;
        self.selected = 0;
        self.error = None;
        self.phase = NavPhase::Ready;
    }

    fn directory_failed(&mut self, path: PathBuf, error: NavError) {
        if self.pending_path.as_deref() != Some(path.as_path()) {
            log::debug!("discarding stale failure of {}", path.display());
            return;
        }

        self.pending_path = None;
        self.raw_entries.clear();
        self.visible_entries.clear();
        self.selected = 0;
        self.error = Some(error.to_string());
        self.phase = NavPhase::Error;
    }

    /// Clamps to the listing bounds; no wraparound.
    fn move_selection(&mut self, delta: isize) {
        if self.phase != NavPhase::Ready || self.visible_entries.is_empty() {
            return;
        }
        let max = self.visible_entries.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(max);
    }

    fn change_sort(&mut self, sort: SortConfig) {
        if self.phase != NavPhase::Ready {
            return;
        }
        self.sort = sort;
        self.reprocess();
    }

    fn change_filter(&mut self, filter: FilterOptions) {
        if self.phase != NavPhase::Ready {
            return;
        }
        self.filter = filter;
        self.reprocess();
    }

    /// Re-runs the pipeline against the already-loaded raw entries (no I/O)
    /// and keeps the selection in place when it is still in range.
    fn reprocess(&mut self) {
        self.visible_entries = pipeline::process(
            &self.raw_entries,
            &self.filter,
            self.sort,
            &self.current_path,
        );
        self.selected = self
            .selected
            .min(self.visible_entries.len().saturating_sub(1));
    }

    fn enter_selected(&mut self) -> Option<NavEffect> {
        if self.phase != NavPhase::Ready {
            return None;
        }
        let entry = self.selected_entry()?;

        if entry.is_parent() {
            let parent = self.current_path.parent()?.to_path_buf();
            return self.request_directory(parent);
        }
        if entry.is_dir() {
            let child = self.current_path.join(entry.name());
            return self.request_directory(child);
        }
        // Files are the preview sub-controller's business.
        None
    }
}
