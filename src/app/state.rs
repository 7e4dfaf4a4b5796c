//! Session orchestration for waypoint.
//!
//! [Session] is the single owner of the directory cache, the navigation
//! state, the preview state and the worker channels. Input intents come in
//! through [Session::dispatch]; worker responses, debounced search edits and
//! I/O timeouts are folded in by [Session::tick]; the render boundary reads
//! the result through [Session::snapshot]. All mutation happens on the one
//! control flow that owns the session, so nothing here needs locking.

use crate::app::cache::DirCache;
use crate::app::intent::{DispatchResult, Intent};
use crate::app::nav::{NavEffect, NavEvent, NavPhase, NavState};
use crate::app::preview::{FilePreview, PreviewState};
use crate::app::scroll::ScrollWindow;
use crate::config::Config;
use crate::core::entry::{Entry, EntryKind};
use crate::core::error::NavError;
use crate::core::pipeline::{FilterOptions, SortConfig, SortOrder};
use crate::core::provider::{EnvironmentProvider, FileSystemProvider};
use crate::core::worker::{WorkerResponse, WorkerTask, Workers};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Read-only view handed to the render boundary: the navigation state, the
/// scroll window and only the visible slice of the listing.
pub struct Snapshot<'a> {
    nav: &'a NavState,
    window: ScrollWindow,
    preview: &'a PreviewState,
}

impl<'a> Snapshot<'a> {
    #[inline]
    pub fn nav(&self) -> &'a NavState {
        self.nav
    }

    #[inline]
    pub fn window(&self) -> ScrollWindow {
        self.window
    }

    #[inline]
    pub fn preview(&self) -> &'a PreviewState {
        self.preview
    }

    /// The `[start, end)` slice of the listing; the renderer never sees more.
    pub fn visible_slice(&self) -> &'a [Entry] {
        &self.nav.visible_entries()[self.window.start()..self.window.end()]
    }
}

/// One browsing session: state, cache and workers behind a dispatch/tick API.
pub struct Session {
    config: Config,
    cache: DirCache,
    nav: NavState,
    preview: PreviewState,
    workers: Workers,
    window: ScrollWindow,
    viewport_height: usize,
    viewport_width: usize,
    pending_since: Option<Instant>,
    search_edit: Option<(String, Instant)>,
}

impl Session {
    /// Creates a session rooted at the provider environment's working
    /// directory and immediately requests its listing.
    pub fn new(
        config: Config,
        provider: Arc<dyn FileSystemProvider>,
        env: &dyn EnvironmentProvider,
    ) -> Self {
        let initial_path = env.current_working_directory();
        let (cols, rows) = env.terminal_size();

        let mut session = Self {
            cache: DirCache::new(config.cache_capacity(), config.cache_max_bytes()),
            nav: NavState::new(
                initial_path.clone(),
                config.sort(),
                FilterOptions {
                    show_hidden: config.show_hidden(),
                    directories_first: config.dirs_first(),
                    extensions: None,
                    search_query: None,
                },
            ),
            preview: PreviewState::default(),
            workers: Workers::spawn(provider),
            window: ScrollWindow::default(),
            viewport_height: rows as usize,
            viewport_width: cols as usize,
            pending_since: None,
            search_edit: None,
            config,
        };

        session.preview.set_viewport_lines(session.viewport_height);
        session.navigate_to(initial_path);
        session
    }

    // Getters / accessors

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    #[inline]
    pub fn cache(&self) -> &DirCache {
        &self.cache
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            nav: &self.nav,
            window: self.window,
            preview: &self.preview,
        }
    }

    /// Tells the session the terminal was resized.
    pub fn set_viewport(&mut self, cols: u16, rows: u16) {
        self.viewport_width = cols as usize;
        self.viewport_height = rows as usize;
        self.preview.set_viewport_lines(self.viewport_height);
        self.sync_window();
    }

    /// Requests navigation to an absolute path.
    pub fn navigate_to(&mut self, path: PathBuf) {
        self.apply(NavEvent::RequestDirectory(path), true);
    }

    /// Handles one decoded input intent.
    pub fn dispatch(&mut self, intent: Intent) -> DispatchResult {
        match intent {
            Intent::MoveUp => self.apply(NavEvent::MoveSelection(-1), true),
            Intent::MoveDown => self.apply(NavEvent::MoveSelection(1), true),
            Intent::PageUp => {
                let page = self.viewport_height.max(1) as isize;
                self.apply(NavEvent::MoveSelection(-page), true)
            }
            Intent::PageDown => {
                let page = self.viewport_height.max(1) as isize;
                self.apply(NavEvent::MoveSelection(page), true)
            }
            Intent::EnterSelected => self.apply(NavEvent::EnterSelected, true),
            Intent::GoToParent => {
                if let Some(parent) = self.nav.current_path().parent() {
                    let parent = parent.to_path_buf();
                    self.apply(NavEvent::RequestDirectory(parent), true);
                }
            }
            Intent::Refresh => {
                let path = self.nav.current_path().to_path_buf();
                self.apply(NavEvent::RequestDirectory(path), false);
            }
            Intent::SortBy(key) => {
                let current = self.nav.sort_config();
                let order = if current.key == key {
                    match current.order {
                        SortOrder::Asc => SortOrder::Desc,
                        SortOrder::Desc => SortOrder::Asc,
                    }
                } else {
                    SortOrder::Asc
                };
                self.apply(NavEvent::ChangeSortConfig(SortConfig { key, order }), true);
            }
            Intent::ToggleHidden => {
                let mut filter = self.nav.filter_options().clone();
                filter.show_hidden = !filter.show_hidden;
                self.apply(NavEvent::ChangeFilterOptions(filter), true);
            }
            Intent::ToggleDirectoriesFirst => {
                let mut filter = self.nav.filter_options().clone();
                filter.directories_first = !filter.directories_first;
                self.apply(NavEvent::ChangeFilterOptions(filter), true);
            }
            Intent::SetExtensionFilter(extensions) => {
                let mut filter = self.nav.filter_options().clone();
                filter.extensions = extensions;
                self.apply(NavEvent::ChangeFilterOptions(filter), true);
            }
            Intent::SetSearch(query) => {
                // Trailing-edge debounce; the edit lands in tick().
                self.search_edit = Some((query, Instant::now()));
            }
            Intent::ClearSearch => {
                self.search_edit = None;
                self.apply_search(String::new());
            }
            Intent::PreviewScrollUp => self.preview.scroll_by(-1),
            Intent::PreviewScrollDown => self.preview.scroll_by(1),
            Intent::Quit => {
                self.flush_search();
                return DispatchResult::Quit;
            }
        }
        DispatchResult::Continue
    }

    /// Folds in worker responses, expired debounces and I/O timeouts.
    /// # Returns
    /// true when any state changed and the UI should redraw.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        // Trailing edge of the search debounce.
        let search_due = self
            .search_edit
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() >= self.config.debounce());
        if search_due {
            self.flush_search();
            changed = true;
        }

        // An in-flight load past the timeout fails like any other read.
        if let Some(since) = self.pending_since
            && since.elapsed() >= self.config.io_timeout()
            && let Some(pending) = self.nav.pending_path().map(PathBuf::from)
        {
            log::warn!("directory load timed out: {}", pending.display());
            self.pending_since = None;
            self.apply(
                NavEvent::DirectoryFailed {
                    path: pending,
                    error: NavError::OperationTimedOut,
                },
                true,
            );
            changed = true;
        }

        // An in-flight preview read past the timeout fails the same way.
        if self.preview.request_timed_out(self.config.io_timeout())
            && let Some(path) = self.preview.current_path().map(PathBuf::from)
        {
            log::warn!("preview load timed out: {}", path.display());
            self.preview.set_error(&path, NavError::OperationTimedOut);
            changed = true;
        }

        // Debounced preview request for the currently selected file.
        if self.preview.should_trigger(self.config.preview_debounce())
            && let Some(path) = self.preview.take_pending()
        {
            let _ = self.workers.preview_tx().send(WorkerTask::LoadPreview {
                path,
                max_bytes: self.config.preview_max_bytes(),
            });
            self.preview.mark_requested();
            changed = true;
        }

        let response_rx = self.workers.response_rx().clone();
        while let Ok(response) = response_rx.try_recv() {
            changed = true;
            match response {
                WorkerResponse::DirectoryLoaded { path, result } => {
                    let accepted = self.nav.pending_path() == Some(path.as_path());
                    match result {
                        Ok(entries) => {
                            if accepted {
                                self.cache.put(path.clone(), entries.clone());
                                self.pending_since = None;
                            }
                            self.apply(NavEvent::DirectoryLoaded { path, entries }, true);
                        }
                        Err(error) => {
                            if accepted {
                                self.pending_since = None;
                            }
                            self.apply(NavEvent::DirectoryFailed { path, error }, true);
                        }
                    }
                }
                WorkerResponse::PreviewLoaded { path, result } => match result {
                    Ok(content) => {
                        let preview = FilePreview::build(
                            &content,
                            self.config.preview_max_lines(),
                            self.viewport_width,
                        );
                        self.preview.update_content(&path, preview);
                    }
                    Err(error) => self.preview.set_error(&path, error),
                },
            }
        }

        changed
    }

    /// Runs one event through the state machine and performs its effect,
    /// then keeps the scroll window and preview in step with the result.
    fn apply(&mut self, event: NavEvent, use_cache: bool) {
        if let Some(NavEffect::Load(path)) = self.nav.handle(event) {
            self.perform_load(path, use_cache);
        }
        self.sync_window();
        self.sync_preview();
    }

    fn perform_load(&mut self, path: PathBuf, use_cache: bool) {
        if use_cache
            && let Some(entries) = self.cache.get(&path, self.config.cache_ttl())
        {
            self.pending_since = None;
            // A hit settles the request synchronously; the pipeline still
            // runs so the listing reflects the current sort and filter.
            self.nav.handle(NavEvent::DirectoryLoaded { path, entries });
            return;
        }

        log::debug!("requesting load of {}", path.display());
        self.pending_since = Some(Instant::now());
        let _ = self
            .workers
            .io_tx()
            .send(WorkerTask::LoadDirectory { path });
    }

    fn apply_search(&mut self, query: String) {
        let mut filter = self.nav.filter_options().clone();
        filter.search_query = if query.is_empty() { None } else { Some(query) };
        self.apply(NavEvent::ChangeFilterOptions(filter), true);
    }

    /// Applies a pending search edit immediately, debounce or not.
    fn flush_search(&mut self) {
        if let Some((query, _)) = self.search_edit.take() {
            self.apply_search(query);
        }
    }

    fn sync_window(&mut self) {
        self.window = ScrollWindow::recompute(
            self.window,
            self.nav.selected_idx(),
            self.nav.visible_entries().len(),
            self.viewport_height,
        );
    }

    /// Points the preview at the selected file, or clears it for anything
    /// that is not a plain file.
    fn sync_preview(&mut self) {
        if self.nav.phase() != NavPhase::Ready {
            self.preview.clear();
            return;
        }
        match self.nav.selected_entry() {
            Some(entry) if entry.kind() == EntryKind::File => {
                let path = self.nav.current_path().join(entry.name());
                if self.preview.current_path() != Some(path.as_path()) {
                    self.preview.mark_pending(path);
                }
            }
            _ => self.preview.clear(),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // The debounce must flush on teardown so no edit is silently lost.
        self.flush_search();
    }
}
