//! Feedback Store Module
//!
//! Explicit owner of the dashboard's feedback state. Only the subset in
//! [`PersistedFeedback`] survives a restart.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::{AnalysisCache, AnalysisResult, Sentiment};
use crate::cache::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::{JujurlyError, Result};
use crate::feedback::FeedbackItem;

/// Fetched feedback is reused for this long before a refresh is needed.
const FRESHNESS_WINDOW_SECS: i64 = 5 * 60;

// == Persisted Feedback ==
/// The persisted subset of the feedback store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedFeedback {
    pub feedback_items: Vec<FeedbackItem>,
    /// Unix milliseconds on the wire
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_fetched: Option<DateTime<Utc>>,
}

// == Feedback Store ==
#[derive(Debug)]
pub struct FeedbackStore<C = SystemClock> {
    items: Vec<FeedbackItem>,
    last_fetched: Option<DateTime<Utc>>,
    current_page: usize,
    has_more: bool,
    total_items: usize,
    page_size: usize,
    error: Option<String>,
    analysis: AnalysisCache<C>,
}

impl FeedbackStore<SystemClock> {
    pub fn new(page_size: usize) -> Result<Self> {
        Self::with_cache(page_size, AnalysisCache::new()?)
    }
}

impl<C: Clock> FeedbackStore<C> {
    pub fn with_cache(page_size: usize, analysis: AnalysisCache<C>) -> Result<Self> {
        if page_size == 0 {
            return Err(JujurlyError::InvalidConfig(
                "page size must be positive".to_string(),
            ));
        }
        Ok(Self {
            items: Vec::new(),
            last_fetched: None,
            current_page: 1,
            has_more: true,
            total_items: 0,
            page_size,
            error: None,
            analysis,
        })
    }

    /// Store whose analysis cache uses `config` and `clock`.
    pub fn with_clock(page_size: usize, config: CacheConfig, clock: C) -> Result<Self> {
        Self::with_cache(page_size, AnalysisCache::with_config(config, clock)?)
    }

    // == Ingest Page ==
    /// Applies one page fetched from the backend.
    ///
    /// Page 1 replaces the list, later pages append. Analyses still cached
    /// for an item are re-attached.
    pub fn ingest_page(
        &mut self,
        page: usize,
        items: Vec<FeedbackItem>,
        total: Option<usize>,
        now: DateTime<Utc>,
    ) {
        let received = items.len();
        let restored: Vec<FeedbackItem> = items
            .into_iter()
            .map(|mut item| {
                if item.ai_analysis.is_none() {
                    item.ai_analysis = self.analysis.lookup(&item.id).cloned();
                }
                item
            })
            .collect();

        if page <= 1 {
            self.items = restored;
        } else {
            self.items.extend(restored);
        }

        self.current_page = page.max(1);
        self.has_more = received == self.page_size;
        self.total_items = total.unwrap_or(self.items.len());
        self.last_fetched = Some(now);
        self.error = None;

        debug!(
            page = self.current_page,
            received,
            total = self.total_items,
            "ingested feedback page"
        );
    }

    // == Freshness ==
    /// Whether the list should be fetched again.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match self.last_fetched {
            Some(fetched) if !self.items.is_empty() => {
                now - fetched >= ChronoDuration::seconds(FRESHNESS_WINDOW_SECS)
            }
            _ => true,
        }
    }

    // == Item Mutations ==
    pub fn mark_as_read(&mut self, id: &str) -> bool {
        self.update(id, |item| item.is_read = true)
    }

    pub fn mark_as_done(&mut self, id: &str) -> bool {
        self.update(id, |item| item.is_done = true)
    }

    pub fn update_sentiment(&mut self, id: &str, sentiment: Sentiment) -> bool {
        self.update(id, |item| item.sentiment = sentiment)
    }

    /// Stores `result` on the item and in the analysis cache.
    ///
    /// The item's headline sentiment follows the analysis.
    pub fn attach_analysis(&mut self, id: &str, result: AnalysisResult) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| JujurlyError::NotFound(id.to_string()))?;

        item.sentiment = result.sentiment.sentiment;
        item.ai_analysis = Some(result.clone());
        self.analysis.store(id, result)
    }

    pub fn cached_analysis(&mut self, id: &str) -> Option<&AnalysisResult> {
        self.analysis.lookup(id)
    }

    pub fn clear_analysis_cache(&mut self) {
        self.analysis.clear();
        info!("analysis cache cleared");
    }

    pub fn analysis_cache(&self) -> &AnalysisCache<C> {
        &self.analysis
    }

    pub fn analysis_cache_mut(&mut self) -> &mut AnalysisCache<C> {
        &mut self.analysis
    }

    // == Queries ==
    pub fn items(&self) -> &[FeedbackItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&FeedbackItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_read).count()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.last_fetched
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Forgets the fetched list so the next check forces a refresh.
    pub fn clear_feedback(&mut self) {
        self.items.clear();
        self.last_fetched = None;
        self.has_more = true;
        self.current_page = 1;
        self.total_items = 0;
        self.error = None;
    }

    // == Persistence Boundary ==
    pub fn snapshot(&self) -> PersistedFeedback {
        PersistedFeedback {
            feedback_items: self.items.clone(),
            last_fetched: self.last_fetched,
        }
    }

    /// Restores persisted state. Transient fields are reset.
    pub fn hydrate(&mut self, persisted: PersistedFeedback) {
        self.clear_feedback();
        self.total_items = persisted.feedback_items.len();
        self.items = persisted.feedback_items;
        self.last_fetched = persisted.last_fetched;
        info!(items = self.items.len(), "feedback store hydrated");
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    pub fn hydrate_json(&mut self, json: &str) -> Result<()> {
        let persisted: PersistedFeedback = serde_json::from_str(json)?;
        self.hydrate(persisted);
        Ok(())
    }

    fn update(&mut self, id: &str, apply: impl FnOnce(&mut FeedbackItem)) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                apply(item);
                true
            }
            None => false,
        }
    }
}
