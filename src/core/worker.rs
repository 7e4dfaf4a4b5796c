//! Background I/O workers for waypoint.
//!
//! Directory reads and file previews run on dedicated threads so the control
//! loop never blocks on the filesystem. Requests ([WorkerTask]) come in from
//! the session via channels and results ([WorkerResponse]) go back the same
//! way, each tagged with the path it was requested for. The session accepts a
//! response only while that path is still the pending one; supersession is
//! the sole cancellation mechanism, in-flight reads are never interrupted.

use crate::core::entry::Entry;
use crate::core::error::NavError;
use crate::core::provider::FileSystemProvider;

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

/// Manages the worker threads and their channels.
///
/// Directory I/O and previews each get a dedicated thread. The preview worker
/// drains its queue before acting so that only the latest request from
/// rapid-fire selection changes is actually read.
pub struct Workers {
    io_tx: Sender<WorkerTask>,
    preview_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
}

impl Workers {
    /// Create the worker set against the given provider.
    pub fn spawn(provider: Arc<dyn FileSystemProvider>) -> Self {
        let (io_tx, io_rx) = unbounded::<WorkerTask>();
        let (preview_tx, preview_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();

        start_io_worker(Arc::clone(&provider), io_rx, res_tx.clone());
        start_preview_worker(provider, preview_rx, res_tx);

        Self {
            io_tx,
            preview_tx,
            response_rx,
        }
    }

    /// Accessor for the directory I/O task sender.
    pub fn io_tx(&self) -> &Sender<WorkerTask> {
        &self.io_tx
    }

    /// Accessor for the preview task sender.
    pub fn preview_tx(&self) -> &Sender<WorkerTask> {
        &self.preview_tx
    }

    /// Accessor for the worker response receiver.
    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }
}

/// Tasks sent to the worker threads.
pub enum WorkerTask {
    LoadDirectory {
        path: PathBuf,
    },
    LoadPreview {
        path: PathBuf,
        max_bytes: u64,
    },
}

/// Responses sent from the worker threads back to the session.
///
/// Each variant carries the request path; the session matches it against its
/// pending path to discard responses superseded by later navigation.
#[derive(Debug)]
pub enum WorkerResponse {
    DirectoryLoaded {
        path: PathBuf,
        result: Result<Vec<Entry>, NavError>,
    },
    PreviewLoaded {
        path: PathBuf,
        result: Result<String, NavError>,
    },
}

fn start_io_worker(
    provider: Arc<dyn FileSystemProvider>,
    task_rx: Receiver<WorkerTask>,
    res_tx: Sender<WorkerResponse>,
) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let WorkerTask::LoadDirectory { path } = task else {
                continue;
            };
            let result = provider.read_directory(&path);
            if res_tx
                .send(WorkerResponse::DirectoryLoaded { path, result })
                .is_err()
            {
                break;
            }
        }
    });
}

fn start_preview_worker(
    provider: Arc<dyn FileSystemProvider>,
    task_rx: Receiver<WorkerTask>,
    res_tx: Sender<WorkerResponse>,
) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let WorkerTask::LoadPreview {
                mut path,
                mut max_bytes,
            } = task
            else {
                continue;
            };

            // Coalesce queued preview tasks to only process the latest.
            while let Ok(next) = task_rx.try_recv() {
                if let WorkerTask::LoadPreview {
                    path: p,
                    max_bytes: m,
                } = next
                {
                    path = p;
                    max_bytes = m;
                }
            }

            let result = provider.read_file_preview(&path, max_bytes);
            if res_tx
                .send(WorkerResponse::PreviewLoaded { path, result })
                .is_err()
            {
                break;
            }
        }
    });
}
