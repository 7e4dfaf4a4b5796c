//! Core engine pieces of waypoint.
//!
//! This module contains the non-session parts of the browser core:
//! - [entry]: the immutable directory entry model (see [Entry], [EntryKind]).
//! - [pipeline]: the pure filter/sort/partition transformation applied to raw listings.
//! - [provider]: the filesystem and environment traits plus their OS and in-memory implementations.
//! - [worker]: background I/O threads and the message protocol back into the session.
//! - [format]: display formatting helpers for sizes, times and preview lines.
//! - [error]: the error kinds crossing the controller boundary.
//!
//! Most callers will import [Entry], [FileSystemProvider] and the pipeline types from here.

pub mod entry;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod provider;
pub mod worker;

pub use entry::{Entry, EntryKind, PARENT_NAME};
pub use error::NavError;
pub use format::{format_file_size, format_file_time, sanitize_line};
pub use pipeline::{FilterOptions, SortConfig, SortKey, SortOrder, process};
pub use provider::{
    EnvironmentProvider, FileSystemProvider, MemoryFileSystem, OsEnvironment, OsFileSystem,
};
