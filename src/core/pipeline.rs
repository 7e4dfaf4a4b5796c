//! Listing pipeline for waypoint.
//!
//! Pure transformation from a raw directory listing to the entries the
//! navigation state exposes: filter, sort, directories-first partition and
//! parent-entry injection, in that fixed order. [process] never mutates its
//! input and holds no state, so identical inputs always produce identical
//! output.

use crate::core::entry::{Entry, EntryKind};

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

/// Sort key selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Size,
    Modified,
    Kind,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sorting configuration of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            key: SortKey::Name,
            order: SortOrder::Asc,
        }
    }
}

/// Filtering configuration of a listing.
///
/// `extensions` is a lowercase allow-list applied to files only;
/// `search_query` is matched case-insensitively as a substring.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub show_hidden: bool,
    pub directories_first: bool,
    pub extensions: Option<HashSet<String>>,
    pub search_query: Option<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            show_hidden: false,
            directories_first: true,
            extensions: None,
            search_query: None,
        }
    }
}

/// Runs the full listing pipeline over a raw directory listing.
///
/// Steps, in fixed order: hidden filter, extension allow-list, substring
/// search, sort, stable directories-first partition, parent injection.
/// # Returns
/// A new vector; `raw` is left untouched.
pub fn process(
    raw: &[Entry],
    filter: &FilterOptions,
    sort: SortConfig,
    current_path: &Path,
) -> Vec<Entry> {
    let query_lower = filter
        .search_query
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut entries: Vec<Entry> = raw
        .iter()
        .filter(|e| {
            // The parent pseudo-entry survives every filter.
            if e.is_parent() {
                return true;
            }
            if !filter.show_hidden && (e.hidden() || e.name().starts_with('.')) {
                return false;
            }
            if let Some(allowed) = &filter.extensions
                && e.kind() == EntryKind::File
                && !e.extension().is_some_and(|ext| allowed.contains(ext))
            {
                return false;
            }
            if let Some(q) = &query_lower
                && !e.name().to_lowercase().contains(q.as_str())
            {
                return false;
            }
            true
        })
        .cloned()
        .collect();

    sort_entries(&mut entries, sort);

    if filter.directories_first {
        partition_dirs_first(&mut entries);
    }

    if current_path.parent().is_some() {
        entries.insert(0, Entry::parent());
    }

    entries
}

/// Sorts entries in place by the configured key.
///
/// Desc flips the primary comparison only; ties are always resolved by
/// case-insensitive name so the order is total, and entries equal on both
/// keys keep their input order (the sort is stable).
fn sort_entries(entries: &mut [Entry], sort: SortConfig) {
    entries.sort_by(|a, b| {
        let primary = match sort.key {
            SortKey::Name => compare_names(a, b),
            SortKey::Size => a.sort_size().cmp(&b.sort_size()),
            SortKey::Modified => a.modified().cmp(&b.modified()),
            SortKey::Kind => kind_rank(a.kind())
                .cmp(&kind_rank(b.kind()))
                .then_with(|| compare_names(a, b)),
        };
        let primary = match sort.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| compare_names(a, b))
    });
}

fn compare_names(a: &Entry, b: &Entry) -> Ordering {
    a.name().to_lowercase().cmp(&b.name().to_lowercase())
}

// Directories group before files before everything else.
fn kind_rank(kind: EntryKind) -> u8 {
    match kind {
        EntryKind::Directory => 0,
        EntryKind::File => 1,
        EntryKind::Symlink => 2,
        EntryKind::Unknown => 3,
    }
}

/// Stable partition: directories first, relative order untouched on both sides.
fn partition_dirs_first(entries: &mut Vec<Entry>) {
    let mut dirs = Vec::with_capacity(entries.len());
    let mut rest = Vec::new();

    for e in entries.drain(..) {
        if e.is_dir() {
            dirs.push(e);
        } else {
            rest.push(e);
        }
    }

    dirs.append(&mut rest);
    *entries = dirs;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, UNIX_EPOCH};

    fn file(name: &str, size: u64) -> Entry {
        Entry::new(name.into(), EntryKind::File, size, None, false)
    }

    fn dir(name: &str) -> Entry {
        Entry::new(name.into(), EntryKind::Directory, 0, None, false)
    }

    fn sample() -> Vec<Entry> {
        vec![
            file("readme.txt", 1024),
            dir("scripts"),
            file("app.js", 2048),
            dir("documents"),
            file("config.json", 512),
            dir("subdir"),
        ]
    }

    fn non_root() -> PathBuf {
        PathBuf::from("/home/user/projects")
    }

    #[test]
    fn name_asc_dirs_first_scenario() {
        let out = process(
            &sample(),
            &FilterOptions::default(),
            SortConfig::default(),
            &non_root(),
        );

        let names: Vec<&str> = out.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "..",
                "documents",
                "scripts",
                "subdir",
                "app.js",
                "config.json",
                "readme.txt"
            ]
        );
    }

    #[test]
    fn process_is_deterministic() {
        let raw = sample();
        let filter = FilterOptions {
            search_query: Some("s".into()),
            ..FilterOptions::default()
        };
        let sort = SortConfig {
            key: SortKey::Size,
            order: SortOrder::Desc,
        };

        let first = process(&raw, &filter, sort, &non_root());
        let second = process(&raw, &filter, sort, &non_root());
        assert_eq!(first, second);
    }

    #[test]
    fn input_is_never_mutated() {
        let raw = sample();
        let before = raw.clone();
        let _ = process(&raw, &FilterOptions::default(), SortConfig::default(), &non_root());
        assert_eq!(raw, before);
    }

    #[test]
    fn hidden_entries_are_dropped_unless_enabled() {
        let mut raw = sample();
        raw.push(Entry::new(".env".into(), EntryKind::File, 64, None, true));
        raw.push(Entry::new(".git".into(), EntryKind::Directory, 0, None, true));

        let out = process(&raw, &FilterOptions::default(), SortConfig::default(), &non_root());
        assert!(
            out.iter().all(|e| e.is_parent() || !e.name().starts_with('.')),
            "hidden entries leaked: {:?}",
            out.iter().map(|e| e.name()).collect::<Vec<_>>()
        );

        let show = FilterOptions {
            show_hidden: true,
            ..FilterOptions::default()
        };
        let out = process(&raw, &show, SortConfig::default(), &non_root());
        assert!(out.iter().any(|e| e.name() == ".env"));
        assert!(out.iter().any(|e| e.name() == ".git"));
    }

    #[test]
    fn extension_allow_list_applies_to_files_only() {
        let filter = FilterOptions {
            extensions: Some(["js".to_string(), "json".to_string()].into()),
            ..FilterOptions::default()
        };

        let out = process(&sample(), &filter, SortConfig::default(), &non_root());
        let names: Vec<&str> = out.iter().map(|e| e.name()).collect();

        // Directories pass through untouched; readme.txt is filtered out.
        assert_eq!(
            names,
            vec!["..", "documents", "scripts", "subdir", "app.js", "config.json"]
        );
    }

    #[test]
    fn search_query_is_case_insensitive_substring() {
        let filter = FilterOptions {
            directories_first: false,
            search_query: Some("CONF".into()),
            ..FilterOptions::default()
        };

        let out = process(&sample(), &filter, SortConfig::default(), &non_root());
        let names: Vec<&str> = out.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["..", "config.json"]);
    }

    #[test]
    fn size_sort_treats_directories_as_zero() {
        let mut raw = sample();
        // A directory with a platform-reported on-disk size must still sort as 0.
        raw.push(Entry::new("bloated".into(), EntryKind::Directory, 9999, None, false));

        let filter = FilterOptions {
            directories_first: false,
            ..FilterOptions::default()
        };
        let sort = SortConfig {
            key: SortKey::Size,
            order: SortOrder::Asc,
        };

        let out = process(&raw, &filter, sort, &non_root());
        let names: Vec<&str> = out.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "..",
                "bloated",
                "documents",
                "scripts",
                "subdir",
                "config.json",
                "readme.txt",
                "app.js"
            ]
        );
    }

    #[test]
    fn modified_sort_is_numeric() {
        let t = |secs| Some(UNIX_EPOCH + Duration::from_secs(secs));
        let raw = vec![
            Entry::new("old".into(), EntryKind::File, 1, t(100), false),
            Entry::new("new".into(), EntryKind::File, 1, t(300), false),
            Entry::new("mid".into(), EntryKind::File, 1, t(200), false),
        ];
        let filter = FilterOptions {
            directories_first: false,
            ..FilterOptions::default()
        };
        let sort = SortConfig {
            key: SortKey::Modified,
            order: SortOrder::Desc,
        };

        let out = process(&raw, &filter, sort, &non_root());
        let names: Vec<&str> = out.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["..", "new", "mid", "old"]);
    }

    #[test]
    fn kind_sort_groups_dirs_files_others() {
        let raw = vec![
            Entry::new("link".into(), EntryKind::Symlink, 0, None, false),
            file("b.txt", 1),
            dir("a"),
            Entry::new("dev".into(), EntryKind::Unknown, 0, None, false),
        ];
        let filter = FilterOptions {
            directories_first: false,
            ..FilterOptions::default()
        };
        let sort = SortConfig {
            key: SortKey::Kind,
            order: SortOrder::Asc,
        };

        let out = process(&raw, &filter, sort, &non_root());
        let names: Vec<&str> = out.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["..", "a", "b.txt", "link", "dev"]);
    }

    #[test]
    fn equal_keys_preserve_input_order() {
        // Same size and same lowercase name: the stable sort must keep input order.
        let raw = vec![
            Entry::new("Dup".into(), EntryKind::File, 7, None, false),
            Entry::new("dup".into(), EntryKind::File, 7, None, false),
        ];
        let filter = FilterOptions {
            directories_first: false,
            ..FilterOptions::default()
        };
        let sort = SortConfig {
            key: SortKey::Size,
            order: SortOrder::Asc,
        };

        let out = process(&raw, &filter, sort, &non_root());
        assert_eq!(out[1].name(), "Dup");
        assert_eq!(out[2].name(), "dup");
    }

    #[test]
    fn dirs_first_partition_is_stable() {
        let filter = FilterOptions {
            directories_first: true,
            ..FilterOptions::default()
        };
        let sort = SortConfig {
            key: SortKey::Size,
            order: SortOrder::Desc,
        };

        let out = process(&sample(), &filter, sort, &non_root());
        let split = out
            .iter()
            .position(|e| !e.is_dir())
            .expect("expected at least one file");

        assert!(out[..split].iter().all(|e| e.is_dir()));
        assert!(out[split..].iter().all(|e| !e.is_dir()));

        // Files keep their size-desc relative order after the partition.
        let file_names: Vec<&str> = out[split..].iter().map(|e| e.name()).collect();
        assert_eq!(file_names, vec!["app.js", "readme.txt", "config.json"]);
    }

    #[test]
    fn no_parent_entry_at_root() {
        let out = process(
            &sample(),
            &FilterOptions::default(),
            SortConfig::default(),
            Path::new("/"),
        );
        assert!(!out.iter().any(|e| e.is_parent()));

        let out = process(
            &sample(),
            &FilterOptions::default(),
            SortConfig::default(),
            &non_root(),
        );
        assert!(out[0].is_parent());
        assert_eq!(out.iter().filter(|e| e.is_parent()).count(), 1);
    }
}
