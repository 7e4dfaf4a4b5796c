//! Filesystem and environment access for waypoint.
//!
//! The core never touches the filesystem directly; it goes through the
//! [FileSystemProvider] and [EnvironmentProvider] traits. There is exactly one
//! production implementation ([OsFileSystem]/[OsEnvironment]) and one
//! deterministic in-memory double ([MemoryFileSystem]) used by the test suite,
//! both satisfying the same contract.

use crate::core::entry::{Entry, EntryKind};
use crate::core::error::NavError;

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read access to directory listings and file previews.
pub trait FileSystemProvider: Send + Sync {
    /// Reads a directory listing. Entries whose metadata cannot be read are
    /// skipped; only a whole-directory failure is an error.
    fn read_directory(&self, path: &Path) -> Result<Vec<Entry>, NavError>;

    /// Reads the start of a file for previewing. Files larger than
    /// `max_bytes` are rejected before any content is read.
    fn read_file_preview(&self, path: &Path, max_bytes: u64) -> Result<String, NavError>;

    fn path_exists(&self, path: &Path) -> bool;
    fn is_directory(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
}

/// Ambient process environment consumed by the session.
pub trait EnvironmentProvider {
    fn current_working_directory(&self) -> PathBuf;
    /// Terminal size as (columns, rows).
    fn terminal_size(&self) -> (u16, u16);
}

/// Production provider backed by std::fs.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystemProvider for OsFileSystem {
    fn read_directory(&self, path: &Path) -> Result<Vec<Entry>, NavError> {
        let read = fs::read_dir(path)
            .map_err(|e| NavError::DirectoryReadFailed(e.to_string()))?;

        let mut entries = Vec::with_capacity(256);
        for dirent in read {
            let dirent = match dirent {
                Ok(d) => d,
                Err(e) => {
                    log::warn!("skipping unreadable entry in {}: {}", path.display(), e);
                    continue;
                }
            };

            let name = dirent.file_name().to_string_lossy().into_owned();
            let ft = match dirent.file_type() {
                Ok(ft) => ft,
                Err(e) => {
                    log::warn!("skipping {}: {}", name, e);
                    continue;
                }
            };

            let kind = if ft.is_dir() {
                EntryKind::Directory
            } else if ft.is_file() {
                EntryKind::File
            } else if ft.is_symlink() {
                // Symlinks to directories browse like directories.
                if fs::metadata(dirent.path()).map(|m| m.is_dir()).unwrap_or(false) {
                    EntryKind::Directory
                } else {
                    EntryKind::Symlink
                }
            } else {
                EntryKind::Unknown
            };

            let (size, modified) = match dirent.metadata() {
                Ok(md) => (md.len(), md.modified().ok()),
                Err(_) => (0, None),
            };
            let size = if kind == EntryKind::Directory { 0 } else { size };
            let hidden = name.starts_with('.');

            entries.push(Entry::new(name, kind, size, modified, hidden));
        }
        Ok(entries)
    }

    fn read_file_preview(&self, path: &Path, max_bytes: u64) -> Result<String, NavError> {
        let meta =
            fs::metadata(path).map_err(|e| NavError::PreviewReadFailed(e.to_string()))?;

        if !meta.is_file() {
            return Err(NavError::PreviewNotAFile);
        }
        if meta.len() > max_bytes {
            return Err(NavError::PreviewTooLarge {
                size: meta.len(),
                limit: max_bytes,
            });
        }

        let mut buf = String::new();
        let file = fs::File::open(path).map_err(|e| NavError::PreviewReadFailed(e.to_string()))?;
        file.take(max_bytes)
            .read_to_string(&mut buf)
            .map_err(|e| NavError::PreviewReadFailed(e.to_string()))?;
        Ok(buf)
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Production environment provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEnvironment;

impl EnvironmentProvider for OsEnvironment {
    fn current_working_directory(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"))
    }

    fn terminal_size(&self) -> (u16, u16) {
        // The render boundary owns the real terminal; 80x24 is the fallback
        // when a session is driven without one (tests, scripting).
        (80, 24)
    }
}

/// Deterministic in-memory provider backing the test suite.
///
/// Directories and file contents are declared up front; listings come back
/// in insertion-independent (BTreeMap) order so tests are reproducible.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    dirs: BTreeMap<PathBuf, Vec<Entry>>,
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a directory with the given raw entries. If the parent
    /// directory is already registered, the new one appears in its listing.
    pub fn add_directory(&mut self, path: impl Into<PathBuf>, entries: Vec<Entry>) -> &mut Self {
        let path = path.into();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let hidden = name.starts_with('.');
        let entry = Entry::new(name, EntryKind::Directory, 0, None, hidden);

        if let Some(parent) = path.parent()
            && let Some(listing) = self.dirs.get_mut(parent)
        {
            listing.push(entry);
        }
        self.dirs.insert(path, entries);
        self
    }

    /// Registers a file with the given content, visible to previews.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> &mut Self {
        let path = path.into();
        let content = content.into();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let hidden = name.starts_with('.');
        let entry = Entry::new(name, EntryKind::File, content.len() as u64, None, hidden);

        if let Some(parent) = path.parent()
            && let Some(listing) = self.dirs.get_mut(parent)
        {
            listing.push(entry);
        }
        self.files.insert(path, content);
        self
    }
}

impl FileSystemProvider for MemoryFileSystem {
    fn read_directory(&self, path: &Path) -> Result<Vec<Entry>, NavError> {
        self.dirs
            .get(path)
            .cloned()
            .ok_or_else(|| NavError::DirectoryReadFailed(format!("{}: not found", path.display())))
    }

    fn read_file_preview(&self, path: &Path, max_bytes: u64) -> Result<String, NavError> {
        if self.dirs.contains_key(path) {
            return Err(NavError::PreviewNotAFile);
        }
        let content = self
            .files
            .get(path)
            .ok_or_else(|| NavError::PreviewReadFailed(format!("{}: not found", path.display())))?;
        if content.len() as u64 > max_bytes {
            return Err(NavError::PreviewTooLarge {
                size: content.len() as u64,
                limit: max_bytes,
            });
        }
        Ok(content.clone())
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.dirs.contains_key(path) || self.files.contains_key(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.dirs.contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
