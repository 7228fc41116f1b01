//! Configuration Module
//!
//! Handles loading and validating configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{JujurlyError, Result};

/// Longest accepted sweep interval: one day.
pub const MAX_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;

// == Cache Config ==
/// Capacity and default lifetime for one cache instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Default TTL for entries without an explicit TTL
    pub ttl: Duration,
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
}

impl CacheConfig {
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self { ttl, max_size }
    }

    /// General-purpose memoization: 5 minutes, 100 entries.
    pub fn default_purpose() -> Self {
        Self::new(Duration::from_secs(5 * 60), 100)
    }

    /// AI analysis results: 30 minutes, 200 entries.
    pub fn ai_analysis() -> Self {
        Self::new(Duration::from_secs(30 * 60), 200)
    }

    // == Validate ==
    /// Rejects a zero capacity or a zero TTL.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(JujurlyError::InvalidConfig(
                "cache max_size must be positive".to_string(),
            ));
        }
        if self.ttl.is_zero() {
            return Err(JujurlyError::InvalidConfig(
                "cache ttl must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::default_purpose()
    }
}

// == Config ==
/// Session configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// General-purpose cache
    pub cache: CacheConfig,
    /// AI analysis cache
    pub analysis_cache: CacheConfig,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// Height of one feedback row in pixels
    pub item_height: f64,
    /// Height of the scroll viewport in pixels
    pub viewport_height: f64,
    /// Rows rendered beyond each edge of the viewport
    pub overscan: usize,
    /// Feedback items per page
    pub page_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - General cache TTL (default: 300000)
    /// - `CACHE_MAX_SIZE` - General cache capacity (default: 100)
    /// - `ANALYSIS_CACHE_TTL_MS` - Analysis cache TTL (default: 1800000)
    /// - `ANALYSIS_CACHE_MAX_SIZE` - Analysis cache capacity (default: 200)
    /// - `SWEEP_INTERVAL_SECS` - Expired-entry sweep frequency (default: 60)
    /// - `ITEM_HEIGHT` - Row height in pixels (default: 200)
    /// - `VIEWPORT_HEIGHT` - Viewport height in pixels (default: 800)
    /// - `OVERSCAN` - Extra rows per edge (default: 5)
    /// - `PAGE_SIZE` - Items per page (default: 20)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache: CacheConfig::new(
                Duration::from_millis(env_or("CACHE_TTL_MS", defaults.cache.ttl.as_millis() as u64)),
                env_or("CACHE_MAX_SIZE", defaults.cache.max_size),
            ),
            analysis_cache: CacheConfig::new(
                Duration::from_millis(env_or(
                    "ANALYSIS_CACHE_TTL_MS",
                    defaults.analysis_cache.ttl.as_millis() as u64,
                )),
                env_or("ANALYSIS_CACHE_MAX_SIZE", defaults.analysis_cache.max_size),
            ),
            sweep_interval: env_or("SWEEP_INTERVAL_SECS", defaults.sweep_interval),
            item_height: env_or("ITEM_HEIGHT", defaults.item_height),
            viewport_height: env_or("VIEWPORT_HEIGHT", defaults.viewport_height),
            overscan: env_or("OVERSCAN", defaults.overscan),
            page_size: env_or("PAGE_SIZE", defaults.page_size),
        }
    }

    // == Validate ==
    /// Fails fast on values that would yield an unbounded cache or
    /// meaningless geometry.
    pub fn validate(&self) -> Result<()> {
        self.cache.validate()?;
        self.analysis_cache.validate()?;
        if self.sweep_interval == 0 || self.sweep_interval > MAX_SWEEP_INTERVAL_SECS {
            return Err(JujurlyError::InvalidConfig(format!(
                "sweep interval must be between 1 and {} seconds, got {}",
                MAX_SWEEP_INTERVAL_SECS, self.sweep_interval
            )));
        }
        if self.page_size == 0 {
            return Err(JujurlyError::InvalidConfig(
                "page size must be positive".to_string(),
            ));
        }
        crate::window::WindowParams::new(self.item_height, self.viewport_height, self.overscan)?;
        Ok(())
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default_purpose(),
            analysis_cache: CacheConfig::ai_analysis(),
            sweep_interval: 60,
            item_height: 200.0,
            viewport_height: 800.0,
            overscan: 5,
            page_size: 20,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
