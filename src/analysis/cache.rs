//! Analysis Cache Module
//!
//! Memoizes AI analysis results per feedback id so each message is analyzed
//! at most once per TTL window.

use std::time::Duration;

use crate::analysis::AnalysisResult;
use crate::cache::{CacheStats, Clock, SystemClock, TtlCache};
use crate::config::CacheConfig;
use crate::error::Result;

// == Analysis Cache ==
#[derive(Debug)]
pub struct AnalysisCache<C = SystemClock> {
    inner: TtlCache<AnalysisResult, C>,
}

impl AnalysisCache<SystemClock> {
    /// Creates a cache with the AI analysis preset.
    pub fn new() -> Result<Self> {
        Self::with_config(CacheConfig::ai_analysis(), SystemClock)
    }
}

impl<C: Clock> AnalysisCache<C> {
    pub fn with_config(config: CacheConfig, clock: C) -> Result<Self> {
        Ok(Self {
            inner: TtlCache::with_clock(config, clock)?,
        })
    }

    /// Cached analysis for `feedback_id`, counted as a hit or miss.
    pub fn lookup(&mut self, feedback_id: &str) -> Option<&AnalysisResult> {
        self.inner.get(feedback_id)
    }

    pub fn store(&mut self, feedback_id: &str, result: AnalysisResult) -> Result<()> {
        self.inner.set(feedback_id, result, None)
    }

    /// Stores with a custom lifetime, e.g. a short one for fallback results.
    pub fn store_for(&mut self, feedback_id: &str, result: AnalysisResult, ttl: Duration) -> Result<()> {
        self.inner.set(feedback_id, result, Some(ttl))
    }

    pub fn contains(&mut self, feedback_id: &str) -> bool {
        self.inner.has(feedback_id)
    }

    pub fn invalidate(&mut self, feedback_id: &str) {
        self.inner.remove(feedback_id);
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn sweep_expired(&mut self) -> usize {
        self.inner.sweep_expired()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.stats()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
