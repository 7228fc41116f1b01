//! Virtual Scroller Module
//!
//! Holds the scroll position for one virtual list and recomputes its window.

use tracing::trace;

use crate::error::{JujurlyError, Result};
use crate::window::{window_with, VirtualWindow, WindowParams};

// == Virtual Scroller ==
/// Scroll state of a single list view.
///
/// The window is recomputed from the current offset on every call; nothing
/// else is cached between events.
#[derive(Debug, Clone)]
pub struct VirtualScroller {
    params: WindowParams,
    scroll_top: f64,
}

impl VirtualScroller {
    pub fn new(params: WindowParams) -> Self {
        Self {
            params,
            scroll_top: 0.0,
        }
    }

    pub fn params(&self) -> &WindowParams {
        &self.params
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    // == On Scroll ==
    /// Records a new scroll offset reported by the viewport.
    pub fn on_scroll(&mut self, scroll_top: f64) -> Result<()> {
        if !scroll_top.is_finite() {
            return Err(JujurlyError::InvalidGeometry(format!(
                "scroll_top must be finite, got {}",
                scroll_top
            )));
        }
        trace!(scroll_top, "scroll offset updated");
        self.scroll_top = scroll_top.max(0.0);
        Ok(())
    }

    /// Scrolls so that row `index` sits at the top of the viewport.
    pub fn scroll_to_index(&mut self, index: usize) {
        self.scroll_top = index as f64 * self.params.item_height();
    }

    /// Resets the offset, e.g. after the list was replaced.
    pub fn reset(&mut self) {
        self.scroll_top = 0.0;
    }

    // == Resize ==
    /// Applies a new viewport height.
    pub fn set_container_height(&mut self, container_height: f64) -> Result<()> {
        self.params = self.params.with_container_height(container_height)?;
        Ok(())
    }

    pub fn total_height(&self, len: usize) -> f64 {
        self.params.total_height(len)
    }

    // == Window ==
    /// Rows of `items` to render at the current offset.
    pub fn window<'a, T>(&self, items: &'a [T]) -> Result<VirtualWindow<'a, T>> {
        window_with(items, &self.params, self.scroll_top)
    }
}
