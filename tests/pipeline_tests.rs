//! Listing pipeline tests for waypoint
//!
//! These tests drive the pure filter/sort/partition pipeline through the
//! public API and pin down its ordering guarantees: the same raw entries in
//! any input order must always produce the same listing.

use rand::seq::SliceRandom;
use std::time::{Duration, SystemTime};
use waypoint::core::{
    Entry, EntryKind, FilterOptions, PARENT_NAME, SortConfig, SortKey, SortOrder, process,
};

use std::collections::HashSet;
use std::path::Path;

fn entry(name: &str, kind: EntryKind, size: u64, modified_secs: Option<u64>) -> Entry {
    let modified = modified_secs.map(|s| SystemTime::UNIX_EPOCH + Duration::from_secs(s));
    Entry::new(name.to_string(), kind, size, modified, name.starts_with('.'))
}

/// The mixed listing used across these tests: three directories, three files.
fn mixed_listing() -> Vec<Entry> {
    vec![
        entry("readme.txt", EntryKind::File, 100, Some(3_000)),
        entry("subdir", EntryKind::Directory, 0, Some(5_000)),
        entry("app.js", EntryKind::File, 5_000, Some(1_000)),
        entry("documents", EntryKind::Directory, 0, Some(2_000)),
        entry("config.json", EntryKind::File, 300, Some(4_000)),
        entry("scripts", EntryKind::Directory, 0, Some(6_000)),
    ]
}

fn names(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.name()).collect()
}

#[test]
fn test_default_listing_shape() {
    let listing = process(
        &mixed_listing(),
        &FilterOptions::default(),
        SortConfig::default(),
        Path::new("/home/user"),
    );

    assert_eq!(
        names(&listing),
        vec![
            PARENT_NAME,
            "documents",
            "scripts",
            "subdir",
            "app.js",
            "config.json",
            "readme.txt"
        ],
        "parent first, then directories, then files, each name-sorted"
    );
}

#[test]
fn test_listing_is_deterministic_under_input_order() {
    let baseline = process(
        &mixed_listing(),
        &FilterOptions::default(),
        SortConfig::default(),
        Path::new("/home/user"),
    );

    let mut rng = rand::rng();
    let mut raw = mixed_listing();
    for _ in 0..20 {
        raw.shuffle(&mut rng);
        let listing = process(
            &raw,
            &FilterOptions::default(),
            SortConfig::default(),
            Path::new("/home/user"),
        );
        assert_eq!(
            names(&listing),
            names(&baseline),
            "shuffled input must not change the listing"
        );
    }
}

#[test]
fn test_root_listing_has_no_parent() {
    let listing = process(
        &mixed_listing(),
        &FilterOptions::default(),
        SortConfig::default(),
        Path::new("/"),
    );
    assert!(
        listing.iter().all(|e| !e.is_parent()),
        "the filesystem root has nothing above it"
    );
}

#[test]
fn test_hidden_entries_are_toggled_not_lost() {
    let mut raw = mixed_listing();
    raw.push(entry(".env", EntryKind::File, 40, None));
    raw.push(entry(".git", EntryKind::Directory, 0, None));

    let hidden_off = process(
        &raw,
        &FilterOptions::default(),
        SortConfig::default(),
        Path::new("/home/user"),
    );
    assert!(
        hidden_off.iter().all(|e| !e.hidden()),
        "hidden entries filtered by default"
    );

    let hidden_on = process(
        &raw,
        &FilterOptions {
            show_hidden: true,
            ..FilterOptions::default()
        },
        SortConfig::default(),
        Path::new("/home/user"),
    );
    assert_eq!(hidden_on.len(), hidden_off.len() + 2);
    assert_eq!(hidden_on[1].name(), ".git", "hidden dirs sort with dirs");
}

#[test]
fn test_extension_filter_ignores_directories() {
    let extensions: HashSet<String> = ["txt".to_string()].into();
    let listing = process(
        &mixed_listing(),
        &FilterOptions {
            extensions: Some(extensions),
            ..FilterOptions::default()
        },
        SortConfig::default(),
        Path::new("/home/user"),
    );

    assert_eq!(
        names(&listing),
        vec![PARENT_NAME, "documents", "scripts", "subdir", "readme.txt"],
        "the allow-list drops files only; directories always pass"
    );
}

#[test]
fn test_search_matches_case_insensitive_substring() {
    let listing = process(
        &mixed_listing(),
        &FilterOptions {
            search_query: Some("ME".to_string()),
            ..FilterOptions::default()
        },
        SortConfig::default(),
        Path::new("/home/user"),
    );

    assert_eq!(
        names(&listing),
        vec![PARENT_NAME, "documents", "readme.txt"],
        "search compares lowercase on both sides, parent always survives"
    );
}

#[test]
fn test_sort_by_size_treats_directories_as_empty() {
    let listing = process(
        &mixed_listing(),
        &FilterOptions::default(),
        SortConfig {
            key: SortKey::Size,
            order: SortOrder::Desc,
        },
        Path::new("/home/user"),
    );

    // Dirs all compare as zero bytes, so their tie-break is name order.
    assert_eq!(
        names(&listing),
        vec![
            PARENT_NAME,
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
fn test_sort_by_modified_puts_unknown_first_ascending() {
    let raw = vec![
        entry("new.txt", EntryKind::File, 1, Some(9_000)),
        entry("old.txt", EntryKind::File, 1, Some(10)),
        entry("no-mtime.txt", EntryKind::File, 1, None),
    ];

    let listing = process(
        &raw,
        &FilterOptions {
            directories_first: false,
            ..FilterOptions::default()
        },
        SortConfig {
            key: SortKey::Modified,
            order: SortOrder::Asc,
        },
        Path::new("/"),
    );

    assert_eq!(
        names(&listing),
        vec!["no-mtime.txt", "old.txt", "new.txt"],
        "a missing timestamp sorts as oldest"
    );
}

#[test]
fn test_descending_flips_primary_but_not_tiebreak() {
    let raw = vec![
        entry("bb.txt", EntryKind::File, 50, None),
        entry("aa.txt", EntryKind::File, 50, None),
        entry("cc.txt", EntryKind::File, 10, None),
    ];

    let listing = process(
        &raw,
        &FilterOptions {
            directories_first: false,
            ..FilterOptions::default()
        },
        SortConfig {
            key: SortKey::Size,
            order: SortOrder::Desc,
        },
        Path::new("/"),
    );

    assert_eq!(
        names(&listing),
        vec!["aa.txt", "bb.txt", "cc.txt"],
        "equal sizes still tie-break by ascending name under Desc"
    );
}

#[test]
fn test_partition_preserves_sorted_order_within_groups() {
    let listing = process(
        &mixed_listing(),
        &FilterOptions::default(),
        SortConfig {
            key: SortKey::Modified,
            order: SortOrder::Asc,
        },
        Path::new("/home/user"),
    );

    // Sorted by mtime first, then stably partitioned dirs before files.
    assert_eq!(
        names(&listing),
        vec![
            PARENT_NAME,
            "documents",
            "subdir",
            "scripts",
            "app.js",
            "readme.txt",
            "config.json"
        ]
    );
}

#[test]
fn test_dirs_first_can_be_disabled() {
    let listing = process(
        &mixed_listing(),
        &FilterOptions {
            directories_first: false,
            ..FilterOptions::default()
        },
        SortConfig::default(),
        Path::new("/home/user"),
    );

    assert_eq!(
        names(&listing),
        vec![
            PARENT_NAME,
            "app.js",
            "config.json",
            "documents",
            "readme.txt",
            "scripts",
            "subdir"
        ],
        "without the partition everything interleaves by name"
    );
}
