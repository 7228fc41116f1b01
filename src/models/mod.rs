//! Command and Reply models for the session host
//!
//! This module defines the DTOs exchanged as JSON lines on stdin/stdout.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{Command, MAX_KEY_LENGTH};
pub use responses::{PageReply, Reply, StatsReply, WindowReply, WindowRow};
