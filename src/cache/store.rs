//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order eviction
//! and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, InsertionOrder, SystemClock};
use crate::config::CacheConfig;
use crate::error::{JujurlyError, Result};

// == TTL Cache ==
/// Bounded string-keyed cache with per-entry expiry.
///
/// When a new key arrives at capacity, the earliest *inserted* entry is
/// evicted. Reads do not affect eviction order, so this is not an LRU.
#[derive(Debug)]
pub struct TtlCache<V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Insertion order for capacity eviction
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL for entries set without an override
    default_ttl: Duration,
    clock: C,
}

impl<V> TtlCache<V, SystemClock> {
    // == Constructor ==
    /// Creates a cache on the wall clock.
    ///
    /// Fails if the capacity or TTL is zero.
    pub fn new(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<V, C: Clock> TtlCache<V, C> {
    /// Creates a cache reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_size: config.max_size,
            default_ttl: config.ttl,
            clock,
        })
    }

    // == Set ==
    /// Stores a value, overwriting any existing entry for `key`.
    ///
    /// Overwrites reset the TTL but keep the key's insertion position. A new
    /// key at capacity evicts the earliest inserted entry first.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL override (uses the default TTL if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> Result<()> {
        let key = key.into();
        if ttl.is_some_and(|t| t.is_zero()) {
            return Err(JujurlyError::InvalidRequest(format!(
                "TTL override for '{}' must be positive",
                key
            )));
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            self.evict_oldest();
        }

        let now = self.clock.now_ms();
        let entry = CacheEntry::new(value, now, ttl.unwrap_or(self.default_ttl));
        self.order.record(&key);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let hit = self.has(key);
        self.stats.record_lookup(hit);
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Has ==
    /// Reports whether a live entry exists.
    ///
    /// Expired entries are removed as with [`get`](Self::get), but hit and
    /// miss counters are left untouched.
    pub fn has(&mut self, key: &str) -> bool {
        !self.take_if_expired(key) && self.entries.contains_key(key)
    }

    // == Remove ==
    /// Removes an entry by key. Absent keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.entries.remove(key)?;
        self.order.remove(key);
        self.stats.set_total_entries(self.entries.len());
        Some(removed.value)
    }

    // == Clear ==
    /// Drops every entry and resets statistics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats = CacheStats::new();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.at_len(self.entries.len())
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
            self.order.remove(&key);
        }

        self.stats.record_expirations(count);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    /// Remaining lifetime of a live entry, without touching statistics.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| Duration::from_millis(entry.ttl_remaining_ms(now)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Removes `key` if it is present but expired. Returns true when removed.
    fn take_if_expired(&mut self, key: &str) -> bool {
        let now = self.clock.now_ms();
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now));

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "dropped expired cache entry on access");
        }
        expired
    }

    fn evict_oldest(&mut self) {
        if let Some(evicted) = self.order.evict_oldest() {
            self.entries.remove(&evicted);
            self.stats.record_eviction();
            debug!(key = %evicted, "evicted oldest cache entry at capacity");
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn manual_cache(max_size: usize, ttl_secs: u64) -> (TtlCache<String, ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        let cache = TtlCache::with_clock(
            CacheConfig::new(Duration::from_secs(ttl_secs), max_size),
            clock.clone(),
        )
        .unwrap();
        (cache, clock)
    }

    #[test]
    fn test_store_new() {
        let cache: TtlCache<String> = TtlCache::new(CacheConfig::default()).unwrap();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.max_size(), 100);
    }

    #[test]
    fn test_store_rejects_zero_capacity() {
        let result: Result<TtlCache<String>> =
            TtlCache::new(CacheConfig::new(Duration::from_secs(1), 0));
        assert!(matches!(result, Err(JujurlyError::InvalidConfig(_))));
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut cache, _) = manual_cache(100, 300);

        cache.set("key1", "value1".to_string(), None).unwrap();
        assert_eq!(cache.get("key1").map(String::as_str), Some("value1"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut cache, _) = manual_cache(100, 300);
        assert!(cache.get("nonexistent").is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_store_remove() {
        let (mut cache, _) = manual_cache(100, 300);

        cache.set("key1", "value1".to_string(), None).unwrap();
        assert_eq!(cache.remove("key1"), Some("value1".to_string()));
        assert!(cache.is_empty());
        assert!(cache.get("key1").is_none());
    }

    #[test]
    fn test_store_remove_nonexistent_is_noop() {
        let (mut cache, _) = manual_cache(100, 300);
        assert_eq!(cache.remove("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let (mut cache, _) = manual_cache(100, 300);

        cache.set("key1", "value1".to_string(), None).unwrap();
        cache.set("key1", "value2".to_string(), None).unwrap();

        assert_eq!(cache.get("key1").map(String::as_str), Some("value2"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let (mut cache, clock) = manual_cache(100, 300);

        cache
            .set("key1", "value1".to_string(), Some(Duration::from_secs(1)))
            .unwrap();
        assert!(cache.get("key1").is_some());

        clock.advance(Duration::from_millis(1_000));
        assert!(cache.get("key1").is_some(), "Still live at the expiry instant");

        clock.advance(Duration::from_millis(1));
        assert!(cache.get("key1").is_none());
        assert_eq!(cache.len(), 0, "Expired entry is removed on read");
    }

    #[test]
    fn test_store_default_ttl_applies() {
        let (mut cache, clock) = manual_cache(100, 5);

        cache.set("key1", "value1".to_string(), None).unwrap();
        clock.advance(Duration::from_secs(6));

        assert!(cache.get("key1").is_none());
    }

    #[test]
    fn test_store_rejects_zero_ttl_override() {
        let (mut cache, _) = manual_cache(100, 300);

        let result = cache.set("key1", "value1".to_string(), Some(Duration::ZERO));
        assert!(matches!(result, Err(JujurlyError::InvalidRequest(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_insertion_order_eviction() {
        let (mut cache, _) = manual_cache(2, 300);

        cache.set("A", "a".to_string(), None).unwrap();
        cache.set("B", "b".to_string(), None).unwrap();
        cache.set("C", "c".to_string(), None).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(!cache.has("A"));
        assert!(cache.has("B"));
        assert!(cache.has("C"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_store_reads_do_not_protect_from_eviction() {
        let (mut cache, _) = manual_cache(3, 300);

        cache.set("key1", "value1".to_string(), None).unwrap();
        cache.set("key2", "value2".to_string(), None).unwrap();
        cache.set("key3", "value3".to_string(), None).unwrap();

        // Reading key1 does not refresh its position
        cache.get("key1").unwrap();
        cache.set("key4", "value4".to_string(), None).unwrap();

        assert!(cache.get("key1").is_none());
        assert!(cache.get("key2").is_some());
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let (mut cache, _) = manual_cache(2, 300);

        cache.set("A", "a".to_string(), None).unwrap();
        cache.set("B", "b".to_string(), None).unwrap();
        cache.set("A", "a2".to_string(), None).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 0);

        // A keeps its original position and is evicted next
        cache.set("C", "c".to_string(), None).unwrap();
        assert!(!cache.has("A"));
        assert!(cache.has("B"));
    }

    #[test]
    fn test_store_has_does_not_count() {
        let (mut cache, clock) = manual_cache(100, 300);

        cache
            .set("key1", "value1".to_string(), Some(Duration::from_secs(1)))
            .unwrap();
        assert!(cache.has("key1"));
        assert!(!cache.has("missing"));

        clock.advance(Duration::from_secs(2));
        assert!(!cache.has("key1"));
        assert_eq!(cache.len(), 0, "has() also removes expired entries");

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_store_stats_hit_rate() {
        let (mut cache, _) = manual_cache(100, 300);

        cache.set("k", "v".to_string(), None).unwrap();
        cache.get("k");
        cache.get("k");
        cache.get("missing");

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_clear_resets_stats() {
        let (mut cache, _) = manual_cache(100, 300);

        cache.clear();
        assert_eq!(cache.stats(), CacheStats::new());

        cache.set("k", "v".to_string(), None).unwrap();
        cache.get("k");
        cache.get("missing");
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::new());
        assert_eq!(cache.stats().hit_rate(), 0.0);
    }

    #[test]
    fn test_store_sweep_expired() {
        let (mut cache, clock) = manual_cache(100, 300);

        cache
            .set("key1", "value1".to_string(), Some(Duration::from_secs(1)))
            .unwrap();
        cache
            .set("key2", "value2".to_string(), Some(Duration::from_secs(10)))
            .unwrap();

        clock.advance(Duration::from_secs(2));

        assert_eq!(cache.sweep_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().expirations, 1);
        assert!(cache.get("key2").is_some());
    }

    #[test]
    fn test_store_ttl_remaining() {
        let (mut cache, clock) = manual_cache(100, 300);

        cache
            .set("key1", "value1".to_string(), Some(Duration::from_secs(10)))
            .unwrap();
        clock.advance(Duration::from_secs(4));

        assert_eq!(cache.ttl_remaining("key1"), Some(Duration::from_secs(6)));
        assert_eq!(cache.ttl_remaining("missing"), None);
    }

    #[test]
    fn test_store_evicted_key_can_be_reinserted() {
        let (mut cache, _) = manual_cache(1, 300);

        cache.set("A", "a".to_string(), None).unwrap();
        cache.set("B", "b".to_string(), None).unwrap();
        cache.set("A", "a".to_string(), None).unwrap();

        assert_eq!(cache.len(), 1);
        assert!(cache.has("A"));
    }
}
