//! Directory entry model for waypoint.
//!
//! Provides the [Entry] struct which is used throughout waypoint.
//! Entries are immutable once constructed; the listing pipeline and the
//! navigation state only ever replace whole listings, never edit them.

use std::time::SystemTime;

/// Name of the synthetic parent entry injected at the top of non-root listings.
pub const PARENT_NAME: &str = "..";

/// Kind of a directory entry as reported by the filesystem provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Unknown,
}

/// A single entry in a directory listing.
///
/// Holds the name, kind and the attributes the pipeline sorts and filters on.
/// Created by a [FileSystemProvider](crate::core::FileSystemProvider) and
/// consumed read-only everywhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    name: String,
    kind: EntryKind,
    size: u64,
    modified: Option<SystemTime>,
    hidden: bool,
    extension: Option<String>,
}

impl Entry {
    pub fn new(
        name: String,
        kind: EntryKind,
        size: u64,
        modified: Option<SystemTime>,
        hidden: bool,
    ) -> Self {
        let extension = match kind {
            EntryKind::File => name
                .rsplit_once('.')
                .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
                .map(|(_, ext)| ext.to_lowercase()),
            _ => None,
        };
        Entry {
            name,
            kind,
            size,
            modified,
            hidden,
            extension,
        }
    }

    /// The synthetic `..` entry prepended to non-root listings.
    pub fn parent() -> Self {
        Entry {
            name: PARENT_NAME.to_string(),
            kind: EntryKind::Directory,
            size: 0,
            modified: None,
            hidden: false,
            extension: None,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Raw size in bytes. Directories conventionally report 0 so that size
    /// ordering never depends on platform-specific directory sizes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    #[inline]
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    #[inline]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    #[inline]
    pub fn is_parent(&self) -> bool {
        self.name == PARENT_NAME
    }

    /// Size used by the sort comparator: directories always compare as 0.
    #[inline]
    pub(crate) fn sort_size(&self) -> u64 {
        if self.is_dir() { 0 } else { self.size }
    }

    /// Approximate heap footprint, used by the cache byte budget.
    pub(crate) fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Entry>()
            + self.name.len()
            + self.extension.as_ref().map_or(0, |e| e.len())
    }
}
