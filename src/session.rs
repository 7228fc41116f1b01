//! Session Module
//!
//! State owner for one dashboard session and the dispatcher that applies
//! commands to it.

use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::analysis::AnalysisResult;
use crate::cache::{Clock, SystemClock, TtlCache};
use crate::config::Config;
use crate::error::{JujurlyError, Result};
use crate::feedback::{FeedbackItem, FeedbackStore};
use crate::models::{Command, PageReply, Reply, WindowReply};
use crate::pagination::Paginator;
use crate::tasks::Sweepable;
use crate::window::{VirtualScroller, WindowParams};

// == Session ==
/// Everything one dashboard view owns.
///
/// Passed by reference to whoever needs it; there is no global instance.
#[derive(Debug)]
pub struct Session<C = SystemClock> {
    /// General-purpose memoization cache
    cache: TtlCache<serde_json::Value, C>,
    feedback: FeedbackStore<C>,
    pager: Paginator,
    scroller: VirtualScroller,
}

impl Session<SystemClock> {
    /// Creates a session from configuration on the wall clock.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock + Clone> Session<C> {
    /// Creates a session whose caches read time from `clock`.
    pub fn with_clock(config: &Config, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cache: TtlCache::with_clock(config.cache, clock.clone())?,
            feedback: FeedbackStore::with_clock(config.page_size, config.analysis_cache, clock)?,
            pager: Paginator::new(0, config.page_size)?,
            scroller: VirtualScroller::new(WindowParams::new(
                config.item_height,
                config.viewport_height,
                config.overscan,
            )?),
        })
    }
}

impl<C: Clock> Session<C> {
    pub fn cache(&self) -> &TtlCache<serde_json::Value, C> {
        &self.cache
    }

    pub fn feedback(&self) -> &FeedbackStore<C> {
        &self.feedback
    }

    pub fn pager(&self) -> &Paginator {
        &self.pager
    }

    pub fn scroller(&self) -> &VirtualScroller {
        &self.scroller
    }

    // == Dispatch ==
    /// Applies one command and builds its reply.
    ///
    /// Errors are local to the command; the session stays usable.
    pub fn dispatch(&mut self, command: Command) -> Result<Reply> {
        if let Some(error_msg) = command.validate() {
            return Err(JujurlyError::InvalidRequest(error_msg));
        }

        match command {
            Command::Set { key, value, ttl_ms } => {
                self.cache.set(key.clone(), value, ttl_ms.map(Duration::from_millis))?;
                Ok(Reply::ok(format!("Key '{}' set successfully", key)))
            }
            Command::Get { key } => {
                let value = self.cache.get(&key).cloned();
                Ok(Reply::Value { key, value })
            }
            Command::Has { key } => {
                let present = self.cache.has(&key);
                Ok(Reply::Has { key, present })
            }
            Command::Remove { key } => {
                self.cache.remove(&key);
                Ok(Reply::ok(format!("Key '{}' removed", key)))
            }
            Command::Clear => {
                self.cache.clear();
                Ok(Reply::ok("Cache cleared"))
            }
            Command::Stats => Ok(Reply::Stats {
                general: self.cache.stats().into(),
                analysis: self.feedback.analysis_cache().stats().into(),
            }),
            Command::LoadFeedback { page, items, total } => {
                self.load_feedback(page, items, total);
                Ok(Reply::Page(PageReply::from(&self.pager)))
            }
            Command::MarkRead { id } => {
                require_found(self.feedback.mark_as_read(&id), &id)?;
                Ok(Reply::ok(format!("Feedback '{}' marked as read", id)))
            }
            Command::MarkDone { id } => {
                require_found(self.feedback.mark_as_done(&id), &id)?;
                Ok(Reply::ok(format!("Feedback '{}' marked as done", id)))
            }
            Command::AttachAnalysis {
                id,
                sentiment_reply,
                translation_reply,
                suggestions_reply,
            } => {
                let message = self
                    .feedback
                    .get(&id)
                    .map(|item| item.message.clone())
                    .ok_or_else(|| JujurlyError::NotFound(id.clone()))?;
                let result = AnalysisResult::from_replies(
                    &message,
                    &sentiment_reply,
                    &translation_reply,
                    &suggestions_reply,
                );
                self.feedback.attach_analysis(&id, result)?;
                Ok(Reply::ok(format!("Analysis attached to '{}'", id)))
            }
            Command::GoToPage { page } => {
                self.pager.go_to_page(page);
                self.scroller.reset();
                Ok(Reply::Page(PageReply::from(&self.pager)))
            }
            Command::NextPage => {
                self.pager.next_page();
                self.scroller.reset();
                Ok(Reply::Page(PageReply::from(&self.pager)))
            }
            Command::PreviousPage => {
                self.pager.previous_page();
                self.scroller.reset();
                Ok(Reply::Page(PageReply::from(&self.pager)))
            }
            Command::Scroll { top } => {
                self.scroller.on_scroll(top)?;
                self.window_reply()
            }
            Command::Resize { height } => {
                self.scroller.set_container_height(height)?;
                self.window_reply()
            }
            Command::Window => self.window_reply(),
            Command::Snapshot => Ok(Reply::Snapshot {
                state: self.feedback.snapshot(),
            }),
            Command::Hydrate { state } => {
                self.feedback.hydrate(state);
                self.pager.set_total_items(self.feedback.items().len());
                self.pager.first_page();
                self.scroller.reset();
                Ok(Reply::ok(format!(
                    "Hydrated {} feedback items",
                    self.feedback.items().len()
                )))
            }
        }
    }

    // == Handle Line ==
    /// Turns one raw input line into its reply.
    ///
    /// Blank lines yield `None`. Undecodable or malformed lines and failed
    /// commands become error replies.
    pub fn handle_line(&mut self, line: &[u8]) -> Option<Reply> {
        let line = match std::str::from_utf8(line) {
            Ok(line) => line.trim(),
            Err(_) => {
                debug!(bytes = line.len(), "rejected non UTF-8 input line");
                return Some(Reply::error("Malformed command: invalid UTF-8"));
            }
        };
        if line.is_empty() {
            return None;
        }

        let reply = match serde_json::from_str::<Command>(line) {
            Ok(command) => self
                .dispatch(command)
                .unwrap_or_else(|err| Reply::error(err.to_string())),
            Err(err) => Reply::error(format!("Malformed command: {}", err)),
        };
        Some(reply)
    }

    fn load_feedback(&mut self, page: usize, items: Vec<FeedbackItem>, total: Option<usize>) {
        self.feedback.ingest_page(page, items, total, Utc::now());
        self.pager.set_total_items(self.feedback.items().len());
        if page <= 1 {
            self.pager.first_page();
            self.scroller.reset();
        }
        debug!(
            items = self.feedback.items().len(),
            pages = self.pager.total_pages(),
            "feedback loaded into session"
        );
    }

    fn window_reply(&self) -> Result<Reply> {
        let page_items = &self.feedback.items()[self.pager.item_range()];
        let window = self.scroller.window(page_items)?;
        Ok(Reply::Window(WindowReply::from_window(
            self.scroller.scroll_top(),
            window,
        )))
    }
}

fn require_found(found: bool, id: &str) -> Result<()> {
    if found {
        Ok(())
    } else {
        Err(JujurlyError::NotFound(id.to_string()))
    }
}

impl<C: Clock> Sweepable for Session<C> {
    fn sweep_expired(&mut self) -> usize {
        self.cache.sweep_expired() + self.feedback.sweep_expired()
    }
}
