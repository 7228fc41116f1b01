//! Reply DTOs for the session host
//!
//! Defines the JSON lines written to stdout, one per command.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::feedback::{FeedbackItem, PersistedFeedback};
use crate::pagination::{PageItem, Paginator};
use crate::window::VirtualWindow;

/// One reply, tagged by its `op` field.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Reply {
    Ok {
        message: String,
    },
    Value {
        key: String,
        /// `null` when absent or expired
        value: Option<serde_json::Value>,
    },
    Has {
        key: String,
        present: bool,
    },
    Stats {
        general: StatsReply,
        analysis: StatsReply,
    },
    Page(PageReply),
    Window(WindowReply),
    Snapshot {
        state: PersistedFeedback,
    },
    Error {
        error: String,
    },
}

impl Reply {
    pub fn ok(message: impl Into<String>) -> Self {
        Reply::Ok {
            message: message.into(),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Reply::Error {
            error: error.into(),
        }
    }
}

// == Stats Reply ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReply {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsReply {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

// == Page Reply ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReply {
    pub current_page: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub pages: Vec<PageItem>,
}

impl From<&Paginator> for PageReply {
    fn from(pager: &Paginator) -> Self {
        Self {
            current_page: pager.current_page(),
            total_pages: pager.total_pages(),
            has_next_page: pager.has_next_page(),
            has_previous_page: pager.has_previous_page(),
            pages: pager.page_numbers(),
        }
    }
}

// == Window Reply ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReply {
    pub scroll_top: f64,
    pub total_height: f64,
    pub rows: Vec<WindowRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowRow {
    /// Index within the current page
    pub index: usize,
    pub offset_start: f64,
    pub offset_end: f64,
    pub item: FeedbackItem,
}

impl WindowReply {
    pub fn from_window(scroll_top: f64, window: VirtualWindow<'_, FeedbackItem>) -> Self {
        Self {
            scroll_top,
            total_height: window.total_height,
            rows: window
                .items
                .into_iter()
                .map(|row| WindowRow {
                    index: row.index,
                    offset_start: row.offset_start,
                    offset_end: row.offset_end,
                    item: row.item.clone(),
                })
                .collect(),
        }
    }
}
