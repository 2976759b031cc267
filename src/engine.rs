//! Concurrency envelope and public API
//!
//! `CidrMatcher` guards its trie and lookup cache behind a single
//! `parking_lot::RwLock`. `dump` takes a shared lock, since it only reads
//! the trie and configuration and never touches the cache; every other
//! operation takes an exclusive lock for its entire duration. `contains`
//! needs the exclusive lock too, even on a cache hit: `LruCache::get`
//! reorders its internal recency list, so there is no purely shared-read
//! path while caching is enabled. Readers never observe a
//! partially-mutated trie because the write guard is held across the full
//! structural edit.
//!
//! `parking_lot::RwLock` is not reentrant, unlike the original engine's
//! `threading.RLock`. Rather than pay for reentrancy everywhere to support
//! one call path (`remove("0.0.0.0/0")` resembling `clear()`), the two are
//! factored to share a private, lock-free `reset_root` helper instead of
//! one calling into the other's locking entry point — the alternative the
//! design notes call out as preferable in a fresh implementation.

use crate::address::{normalize, AddressInput};
use crate::cache::LookupCache;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::prefix::{self, ParsedPrefix};
use crate::trie::Trie;
use parking_lot::RwLock;

/// The CIDR prefix matching engine.
///
/// Holds a byte-indexed prefix trie and a bounded lookup cache behind a
/// single `RwLock`, sized for tens to hundreds of thousands of stored
/// prefixes and millions of lookups per second under concurrent access.
pub struct CidrMatcher {
    inner: RwLock<Inner>,
}

struct Inner {
    trie: Trie,
    cache: LookupCache,
    config: EngineConfig,
}

impl CidrMatcher {
    /// Create an engine using the process-wide default configuration (see
    /// [`crate::config::get_default_config`]).
    pub fn new() -> Self {
        Self::with_config(crate::config::get_default_config())
    }

    /// Create an engine with a specific lookup cache capacity. A capacity
    /// of zero disables caching.
    pub fn with_capacity(cache_capacity: usize) -> Self {
        Self::with_config(EngineConfig::with_capacity(cache_capacity))
    }

    /// Create an engine with a fully specified configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            inner: RwLock::new(Inner {
                trie: Trie::new(),
                cache: LookupCache::new(config.cache_capacity),
                config,
            }),
        }
    }

    /// Insert a CIDR prefix (e.g. `"192.168.1.0/24"`).
    ///
    /// Inserting the same prefix twice is equivalent to inserting it once.
    pub fn insert(&self, cidr: &str) -> Result<()> {
        let mut guard = self.inner.write();
        let parsed = resolve_prefix(&mut guard, cidr)?;
        guard.trie.insert(&parsed.network, parsed.prefix_len, &parsed.broadcast);
        guard.cache.invalidate();
        tracing::debug!(cidr, "inserted prefix");
        Ok(())
    }

    /// Insert many CIDR prefixes at once, holding the write guard for the
    /// whole batch and invalidating the cache once at the end rather than
    /// per entry. Entries are whitespace-trimmed; empty entries are
    /// skipped. Invalid entries are logged and skipped — the batch
    /// continues.
    ///
    /// Progress is logged roughly every
    /// `1 / config.batch_log_interval_denom` of the total (5% by default),
    /// plus a final summary.
    pub fn batch_insert<I, S>(&self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries: Vec<String> = entries
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let total = entries.len();
        if total == 0 {
            tracing::info!("batch_insert: no entries to insert");
            return;
        }

        let mut guard = self.inner.write();
        let log_every = (total / guard.config.batch_log_interval_denom).max(1);
        let mut inserted = 0usize;

        tracing::info!(total, "batch_insert: starting");
        for (i, entry) in entries.iter().enumerate() {
            match resolve_prefix(&mut guard, entry) {
                Ok(parsed) => {
                    guard
                        .trie
                        .insert(&parsed.network, parsed.prefix_len, &parsed.broadcast);
                    inserted += 1;
                }
                Err(e) => {
                    tracing::warn!(entry = %entry, error = %e, "batch_insert: failed to insert entry");
                }
            }

            let done = i + 1;
            if done % log_every == 0 || done == total {
                tracing::info!(done, total, "batch_insert: progress");
            }
        }

        guard.cache.invalidate();
        tracing::info!(total, inserted, "batch_insert: complete");
    }

    /// Remove a CIDR prefix. A no-op if it was never inserted.
    ///
    /// For a partial-byte prefix, only the single terminal at the "base"
    /// byte is cleared — sibling terminals created by insert's expansion
    /// are left untouched. See [`crate::trie::Trie::remove`].
    pub fn remove(&self, cidr: &str) -> Result<()> {
        let mut guard = self.inner.write();
        let parsed = resolve_prefix(&mut guard, cidr)?;
        guard.trie.remove(&parsed.network, parsed.prefix_len);
        guard.cache.invalidate();
        tracing::debug!(cidr, "removed prefix");
        Ok(())
    }

    /// Clear all stored prefixes and invalidate the cache.
    pub fn clear(&self) {
        let mut guard = self.inner.write();
        reset_root(&mut guard);
        tracing::debug!("cleared trie");
    }

    /// Test whether `address` falls within any stored prefix.
    ///
    /// Accepts any form [`AddressInput`] can be built from: text, raw
    /// bytes, an integer, or a `std::net::IpAddr`. The same address in any
    /// presentation form hits the same cache entry, since the cache is
    /// keyed on the normalized canonical bytes.
    pub fn contains<'a>(&self, address: impl Into<AddressInput<'a>>) -> Result<bool> {
        let canonical = normalize(address.into())?;

        // `LruCache::get` reorders its internal recency list, so even a
        // cache hit needs exclusive access; there is no cheaper shared-read
        // path while the cache is enabled. Mutations (insert/remove/clear)
        // take the same lock, so lookups never observe a partially-mutated
        // trie.
        let mut guard = self.inner.write();
        if let Some(hit) = guard.cache.get_result(&canonical) {
            return Ok(hit);
        }
        let result = guard.trie.contains(&canonical);
        guard.cache.put_result(canonical, result);
        Ok(result)
    }

    /// Serialize the trie and its configuration to compact bytes.
    pub fn dump(&self) -> Vec<u8> {
        let guard = self.inner.read();
        crate::serialization::dump(&guard.trie, &guard.config)
    }

    /// Deserialize an engine from bytes produced by [`Self::dump`]. If
    /// `capacity` is given, it overrides the cache capacity recorded in
    /// the serialized configuration.
    pub fn load(bytes: &[u8], capacity: Option<usize>) -> Result<Self> {
        let (trie, mut config) = crate::serialization::load(bytes)?;
        if let Some(capacity) = capacity {
            config.cache_capacity = capacity;
        }
        Ok(Self {
            inner: RwLock::new(Inner {
                cache: LookupCache::new(config.cache_capacity),
                trie,
                config,
            }),
        })
    }
}

impl Default for CidrMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the root with a fresh empty trie and invalidate the cache.
/// Lock-free with respect to the caller: the caller already holds the
/// write guard, so this never re-acquires it — the shared logic behind
/// both `clear()` and the `/0` branch of `remove()`.
fn reset_root(inner: &mut Inner) {
    inner.trie.clear();
    inner.cache.invalidate();
}

/// Resolve a CIDR string to its parsed prefix, consulting (and
/// populating) the secondary parse cache. `inner` must already be held
/// under the write lock by the caller.
fn resolve_prefix(inner: &mut Inner, cidr: &str) -> Result<ParsedPrefix> {
    if let Some(cached) = inner.cache.get_parsed(cidr) {
        return Ok(cached);
    }
    let parsed = prefix::parse(cidr)?;
    inner.cache.put_parsed(cidr.to_string(), parsed.clone());
    Ok(parsed)
}
