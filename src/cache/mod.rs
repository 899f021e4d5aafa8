//! In-memory page cache with a time-bounded validity window.
//!
//! Keys are absolute page URLs, values the raw response bodies. An expired
//! entry looks exactly like a miss to the caller. Expired entries are swept
//! opportunistically on insert once the sweep interval has elapsed; there is
//! no background task and no persistence across restarts.

use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug)]
struct Entry {
    body: String,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct PageCache {
    ttl: Duration,
    sweep_interval: Duration,
    entries: HashMap<String, Entry>,
    last_sweep: Instant,
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_SWEEP_INTERVAL)
    }
}

impl PageCache {
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            ttl,
            sweep_interval,
            entries: HashMap::new(),
            last_sweep: Instant::now(),
        }
    }

    /// Body for `key`, if present and still within the TTL window.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|e| e.stored_at.elapsed() < self.ttl)
            .map(|e| e.body.clone())
    }

    pub fn insert(&mut self, key: impl Into<String>, body: impl Into<String>) {
        if self.last_sweep.elapsed() >= self.sweep_interval {
            self.sweep();
        }
        self.entries.insert(
            key.into(),
            Entry {
                body: body.into(),
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every entry unconditionally.
    pub fn flush(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sweep(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, e| e.stored_at.elapsed() < ttl);
        self.last_sweep = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_within_ttl() {
        let mut cache = PageCache::default();
        cache.insert("https://example.com/a", "body a");
        assert_eq!(cache.get("https://example.com/a").as_deref(), Some("body a"));
    }

    #[test]
    fn test_miss_for_unknown_key() {
        let cache = PageCache::default();
        assert_eq!(cache.get("https://example.com/missing"), None);
    }

    #[test]
    fn test_expired_entry_looks_like_miss() {
        let mut cache = PageCache::new(Duration::from_millis(10), DEFAULT_SWEEP_INTERVAL);
        cache.insert("k", "v");
        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut cache = PageCache::default();
        cache.insert("k", "old");
        cache.insert("k", "new");
        assert_eq!(cache.get("k").as_deref(), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_flush_clears_everything() {
        let mut cache = PageCache::default();
        cache.insert("a", "1");
        cache.insert("b", "2");
        cache.flush();
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_sweep_removes_expired_entries() {
        let mut cache = PageCache::new(Duration::from_millis(5), Duration::from_millis(5));
        cache.insert("stale", "v");
        std::thread::sleep(Duration::from_millis(15));
        // Insert past the sweep interval triggers the sweep.
        cache.insert("fresh", "v");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("fresh").as_deref(), Some("v"));
    }
}
