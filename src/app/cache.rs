//! Directory listing cache for waypoint.
//!
//! Bounded, time-expiring store of previously-read raw directory listings,
//! keyed by path. A hit skips the filesystem entirely; the listing pipeline
//! still runs so the result always reflects the current sort and filter
//! settings. The cache is only ever touched from the single session control
//! flow, so it needs no locking.

use crate::core::Entry;

use std::collections::HashMap;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Size snapshot returned by [DirCache::stats].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub approx_bytes: usize,
}

struct CacheSlot {
    entries: Vec<Entry>,
    stored_at: Instant,
    approx_bytes: usize,
}

/// LRU directory cache with lazy TTL expiry and an approximate byte budget.
pub struct DirCache {
    slots: HashMap<PathBuf, CacheSlot>,
    // Front is least recently used.
    order: VecDeque<PathBuf>,
    capacity: usize,
    max_bytes: usize,
    approx_bytes: usize,
}

impl DirCache {
    pub fn new(capacity: usize, max_bytes: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            max_bytes,
            approx_bytes: 0,
        }
    }

    /// Looks up a cached listing. Entries older than `ttl` count as a miss
    /// and keep their recency position; a later put simply overwrites them.
    /// A hit is promoted to most recently used.
    /// # Returns
    /// A copy of the cached listing, or None.
    pub fn get(&mut self, path: &Path, ttl: Duration) -> Option<Vec<Entry>> {
        let slot = self.slots.get(path)?;
        if slot.stored_at.elapsed() > ttl {
            log::debug!("cache expired: {}", path.display());
            return None;
        }

        self.touch(path);
        log::debug!("cache hit: {}", path.display());
        Some(self.slots[path].entries.clone())
    }

    /// Stores a listing, overwriting any previous one for the same path,
    /// then evicts least-recently-used listings until within bounds.
    /// A listing that alone exceeds the byte budget is not stored at all;
    /// caching it would push everything else out and still be over budget.
    pub fn put(&mut self, path: PathBuf, entries: Vec<Entry>) {
        let approx_bytes = slot_bytes(&path, &entries);

        if self.max_bytes > 0 && approx_bytes > self.max_bytes {
            log::debug!("listing too large to cache: {}", path.display());
            self.remove(&path);
            return;
        }

        if let Some(old) = self.slots.insert(
            path.clone(),
            CacheSlot {
                entries,
                stored_at: Instant::now(),
                approx_bytes,
            },
        ) {
            self.approx_bytes -= old.approx_bytes;
            self.order.retain(|p| p != &path);
        }
        self.approx_bytes += approx_bytes;
        self.order.push_back(path);

        while self.slots.len() > self.capacity {
            self.evict_lru();
        }

        // A byte-budget overflow sheds the oldest half per pass so a run of
        // large listings does not evict one-by-one on every put.
        while self.max_bytes > 0 && self.approx_bytes > self.max_bytes && self.order.len() > 1 {
            let target = (self.order.len() / 2).max(1);
            for _ in 0..target {
                self.evict_lru();
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
        self.approx_bytes = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.slots.len(),
            approx_bytes: self.approx_bytes,
        }
    }

    fn touch(&mut self, path: &Path) {
        if let Some(pos) = self.order.iter().position(|p| p == path)
            && let Some(p) = self.order.remove(pos)
        {
            self.order.push_back(p);
        }
    }

    fn remove(&mut self, path: &Path) {
        if let Some(slot) = self.slots.remove(path) {
            self.approx_bytes -= slot.approx_bytes;
            self.order.retain(|p| p != path);
        }
    }

    fn evict_lru(&mut self) {
        if let Some(oldest) = self.order.pop_front()
            && let Some(slot) = self.slots.remove(&oldest)
        {
            self.approx_bytes -= slot.approx_bytes;
            log::debug!("cache evict: {}", oldest.display());
        }
    }
}

fn slot_bytes(path: &Path, entries: &[Entry]) -> usize {
    path.as_os_str().len() + entries.iter().map(Entry::approx_bytes).sum::<usize>()
}
