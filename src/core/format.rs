//! Display formatting helpers for waypoint.
//!
//! Formats sizes and modification times for the render boundary and
//! sanitizes preview lines to an exact display width.

use chrono::{DateTime, Local};
use humansize::{DECIMAL, format_size};
use unicode_width::UnicodeWidthChar;

use std::time::SystemTime;

/// Formats a file size into a human-readable string.
/// # Returns
/// A string like "2.05 kB", or "-" for directories and unknown sizes.
pub fn format_file_size(size: Option<u64>, is_dir: bool) -> String {
    if is_dir {
        "-".into()
    } else if let Some(sz) = size {
        format_size(sz, DECIMAL)
    } else {
        "-".to_string()
    }
}

/// Formats a modification time into a human-readable string.
/// # Returns
/// A string like "2026-08-25 14:03:12", or "-" if unknown.
pub fn format_file_time(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%Y-%m-%d %H:%M:%S").to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Cleans a preview line for display by removing control characters,
/// expanding tabs to 4 spaces and truncating to the given display width.
/// # Returns
/// A sanitized string no wider than `max_width` terminal columns.
pub fn sanitize_line(line: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(max_width);
    let mut current_w = 0;

    for char in line.chars() {
        if char == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > max_width {
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if char.is_control() {
            continue;
        }

        let w = char.width().unwrap_or(0);
        if current_w + w > max_width {
            break;
        }

        out.push(char);
        current_w += w;
    }

    out
}
