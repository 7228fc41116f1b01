//! Window Module
//!
//! Virtual scrolling: render only the rows intersecting the viewport.
//! Rows are assumed to share one fixed height.

mod scroller;
mod virtual_window;

pub use scroller::VirtualScroller;
pub use virtual_window::{compute_window, window_with, VirtualItem, VirtualWindow, WindowParams};
