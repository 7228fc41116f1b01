//! Jujurly - feedback dashboard core
//!
//! TTL-bounded memoization of AI analysis results, virtual scrolling,
//! pagination and the feedback state owner behind the dashboard.

pub mod analysis;
pub mod cache;
pub mod config;
pub mod error;
pub mod feedback;
pub mod models;
pub mod pagination;
pub mod session;
pub mod tasks;
pub mod window;

pub use config::{CacheConfig, Config};
pub use error::{JujurlyError, Result};
pub use session::Session;
pub use tasks::spawn_sweep_task;
