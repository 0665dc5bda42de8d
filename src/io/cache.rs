use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;

pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub expires_at: Instant,
    /// `Last-Modified` of the response, sent back as `If-Modified-Since`
    pub last_modified: Option<String>,
}

impl<V> CacheEntry<V> {
    pub fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Size-bounded LRU cache whose entries expire after a per-entry TTL.
///
/// Expired entries are not handed out by [`TtlCache::get`] but stay around
/// until the next insert, so a caller can still revalidate them.
pub struct TtlCache<V> {
    entries: LruCache<String, CacheEntry<V>>,
}

impl<V> TtlCache<V> {
    pub fn new(capacity: usize) -> Self {
        TtlCache {
            entries: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Fresh data for `key`. A hit becomes the most recently used entry.
    pub fn get(&mut self, key: &str, now: Instant) -> Option<&V> {
        let entry = self.entries.get(key)?;
        entry.is_fresh(now).then_some(&entry.data)
    }

    /// The entry for `key` whether or not it has expired
    pub fn stale(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.peek(key)
    }

    /// Store `data`, first dropping every expired entry. At capacity the
    /// least recently used entry is evicted.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        data: V,
        ttl: Duration,
        last_modified: Option<String>,
        now: Instant,
    ) {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired {
            self.entries.pop(&key);
        }
        self.entries.put(
            key.into(),
            CacheEntry {
                data,
                expires_at: now + ttl,
                last_modified,
            },
        );
    }

    /// Extend an entry's life after the server confirmed it is unchanged
    pub fn refresh(&mut self, key: &str, ttl: Duration, now: Instant) -> Option<&V> {
        let entry = self.entries.get_mut(key)?;
        entry.expires_at = now + ttl;
        Some(&entry.data)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
