//! Feedback Module
//!
//! Feedback items and the state owner that holds them for the dashboard.

mod item;
mod store;

pub use item::FeedbackItem;
pub use store::{FeedbackStore, PersistedFeedback};
