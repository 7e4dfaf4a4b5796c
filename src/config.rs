//! Configuration for waypoint.
//!
//! Settings are read from `waypoint.toml` in the platform config directory.
//! Raw serde structs with full defaults are deserialized first and then
//! converted into the internal [Config], so a missing or broken file always
//! degrades to defaults instead of failing the session.

use crate::core::pipeline::{SortConfig, SortKey, SortOrder};

use serde::Deserialize;

use std::path::PathBuf;
use std::time::Duration;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    cache: Cache,
    preview: Preview,
    timing: Timing,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
struct General {
    show_hidden: bool,
    dirs_first: bool,
    sort_key: SortKey,
    sort_order: SortOrder,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: false,
            dirs_first: true,
            sort_key: SortKey::Name,
            sort_order: SortOrder::Asc,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
struct Cache {
    capacity: usize,
    max_bytes: usize,
    ttl_secs: u64,
}

impl Default for Cache {
    fn default() -> Self {
        Cache {
            capacity: 64,
            max_bytes: 8 * 1024 * 1024,
            ttl_secs: 30,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
struct Preview {
    max_bytes: u64,
    max_lines: usize,
}

impl Default for Preview {
    fn default() -> Self {
        Preview {
            max_bytes: 10 * 1024 * 1024,
            max_lines: 500,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
struct Timing {
    debounce_ms: u64,
    preview_debounce_ms: u64,
    io_timeout_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            debounce_ms: 250,
            preview_debounce_ms: 75,
            io_timeout_ms: 5000,
        }
    }
}

/// Validated session configuration.
#[derive(Debug)]
pub struct Config {
    show_hidden: bool,
    dirs_first: bool,
    sort: SortConfig,
    cache_capacity: usize,
    cache_max_bytes: usize,
    cache_ttl: Duration,
    preview_max_bytes: u64,
    preview_max_lines: usize,
    debounce: Duration,
    preview_debounce: Duration,
    io_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config::from(RawConfig::default())
    }
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Config {
            show_hidden: raw.general.show_hidden,
            dirs_first: raw.general.dirs_first,
            sort: SortConfig {
                key: raw.general.sort_key,
                order: raw.general.sort_order,
            },
            cache_capacity: raw.cache.capacity.max(1),
            cache_max_bytes: raw.cache.max_bytes,
            cache_ttl: Duration::from_secs(raw.cache.ttl_secs),
            preview_max_bytes: raw.preview.max_bytes,
            preview_max_lines: raw.preview.max_lines.max(1),
            debounce: Duration::from_millis(raw.timing.debounce_ms),
            preview_debounce: Duration::from_millis(raw.timing.preview_debounce_ms),
            io_timeout: Duration::from_millis(raw.timing.io_timeout_ms),
        }
    }
}

impl Config {
    /// Loads the configuration file, falling back to defaults when the file
    /// is missing or unparsable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Config::default();
        };
        match toml::from_str::<RawConfig>(&content) {
            Ok(raw) => Config::from(raw),
            Err(e) => {
                log::warn!("ignoring broken config {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("waypoint").join("waypoint.toml"))
    }

    // Getters / accessors

    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn dirs_first(&self) -> bool {
        self.dirs_first
    }

    #[inline]
    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    #[inline]
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }

    #[inline]
    pub fn cache_max_bytes(&self) -> usize {
        self.cache_max_bytes
    }

    #[inline]
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    #[inline]
    pub fn preview_max_bytes(&self) -> u64 {
        self.preview_max_bytes
    }

    #[inline]
    pub fn preview_max_lines(&self) -> usize {
        self.preview_max_lines
    }

    #[inline]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    #[inline]
    pub fn preview_debounce(&self) -> Duration {
        self.preview_debounce
    }

    #[inline]
    pub fn io_timeout(&self) -> Duration {
        self.io_timeout
    }
}
