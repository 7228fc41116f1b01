//! Cache Statistics Module
//!
//! Counters behind `TtlCache::stats`. Only `get` counts as a lookup.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    /// Lookups that found nothing, including entries that had just expired
    pub misses: u64,
    /// Oldest-inserted entries dropped to make room
    pub evictions: u64,
    /// Entries dropped past their deadline, lazily or by the sweep
    pub expirations: u64,
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// hits / (hits + misses), `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }

    /// Copy of the counters with the entry count taken at `len`.
    pub fn at_len(&self, len: usize) -> Self {
        Self {
            total_entries: len,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_stats_are_zero() {
        let stats = CacheStats::new();
        assert_eq!(stats.lookups(), 0);
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats, CacheStats::default());
    }

    #[test]
    fn test_hit_rate_two_thirds() {
        let mut stats = CacheStats::new();
        stats.record_lookup(true);
        stats.record_lookup(true);
        stats.record_lookup(false);
        assert_eq!(stats.lookups(), 3);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_only_misses() {
        let mut stats = CacheStats::new();
        stats.record_lookup(false);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_eviction_and_expiration_counters() {
        let mut stats = CacheStats::new();
        stats.record_eviction();
        stats.record_expirations(3);
        stats.record_expirations(0);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.expirations, 3);
        assert_eq!(stats.lookups(), 0, "Drops are not lookups");
    }

    #[test]
    fn test_at_len_keeps_counters() {
        let mut stats = CacheStats::new();
        stats.record_lookup(true);
        let copy = stats.at_len(7);
        assert_eq!(copy.hits, 1);
        assert_eq!(copy.total_entries, 7);
        assert_eq!(stats.total_entries, 0);
    }
}
