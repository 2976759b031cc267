//! Bounded LRU lookup cache
//!
//! A capacity-bounded cache from canonical address bytes to a boolean
//! membership result, plus a secondary cache from raw CIDR text to its
//! parsed `(network, prefix_len, broadcast)` triple. Both are invalidated
//! wholesale on any mutation (insert, remove, clear, batch_insert) — the
//! workload this engine targets has mutations that are rare relative to
//! queries, so wholesale invalidation is cheap and trivially correct.

use crate::prefix::ParsedPrefix;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Default lookup cache capacity, matching the original engine's default.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Bounded LRU cache mapping canonical address bytes to membership
/// results, with a secondary parse-result cache for CIDR text.
pub struct LookupCache {
    capacity: usize,
    results: Option<LruCache<Vec<u8>, bool>>,
    parsed: Option<LruCache<String, ParsedPrefix>>,
}

impl LookupCache {
    /// Create a cache with the given capacity. A capacity of zero disables
    /// caching entirely (the matcher then runs uncached).
    pub fn new(capacity: usize) -> Self {
        let results = NonZeroUsize::new(capacity).map(LruCache::new);
        // The secondary string-parse cache is capped independently, never
        // exceeding 8192 entries, mirroring the original engine's
        // `_str_cache_maxsize = min(cache_size, 8192)`.
        let parsed = NonZeroUsize::new(capacity.min(8192)).map(LruCache::new);
        Self {
            capacity,
            results,
            parsed,
        }
    }

    /// The configured capacity (0 means caching is disabled).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True if caching is disabled (capacity 0).
    pub fn is_disabled(&self) -> bool {
        self.capacity == 0
    }

    /// Look up a cached membership result for the given canonical bytes.
    pub fn get_result(&mut self, key: &[u8]) -> Option<bool> {
        self.results.as_mut()?.get(key).copied()
    }

    /// Record a membership result for the given canonical bytes.
    pub fn put_result(&mut self, key: Vec<u8>, value: bool) {
        if let Some(cache) = self.results.as_mut() {
            cache.put(key, value);
        }
    }

    /// Look up a cached parse result for the given raw CIDR text.
    pub fn get_parsed(&mut self, text: &str) -> Option<ParsedPrefix> {
        self.parsed.as_mut()?.get(text).cloned()
    }

    /// Record a parse result for the given raw CIDR text.
    pub fn put_parsed(&mut self, text: String, parsed: ParsedPrefix) {
        if let Some(cache) = self.parsed.as_mut() {
            cache.put(text, parsed);
        }
    }

    /// Invalidate both caches wholesale. Called after every mutation.
    pub fn invalidate(&mut self) {
        if let Some(cache) = self.results.as_mut() {
            cache.clear();
        }
        if let Some(cache) = self.parsed.as_mut() {
            cache.clear();
        }
    }
}
