//! Command DTOs for the session host
//!
//! Defines the newline-delimited JSON commands read from stdin.

use serde::Deserialize;

use crate::feedback::{FeedbackItem, PersistedFeedback};

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// One command, tagged by its `op` field.
///
/// ```json
/// {"op": "set", "key": "greeting", "value": {"text": "halo"}, "ttl_ms": 60000}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Stores a value in the general-purpose cache
    Set {
        key: String,
        value: serde_json::Value,
        /// Optional TTL override in milliseconds
        #[serde(default)]
        ttl_ms: Option<u64>,
    },
    Get {
        key: String,
    },
    Has {
        key: String,
    },
    Remove {
        key: String,
    },
    /// Empties the general-purpose cache and resets its statistics
    Clear,
    Stats,
    /// Applies a page of feedback fetched from the backend
    LoadFeedback {
        #[serde(default = "first_page")]
        page: usize,
        items: Vec<FeedbackItem>,
        #[serde(default)]
        total: Option<usize>,
    },
    MarkRead {
        id: String,
    },
    MarkDone {
        id: String,
    },
    /// Builds an analysis from raw model replies and attaches it to an item
    AttachAnalysis {
        id: String,
        sentiment_reply: String,
        translation_reply: String,
        suggestions_reply: String,
    },
    GoToPage {
        page: usize,
    },
    NextPage,
    PreviousPage,
    Scroll {
        top: f64,
    },
    Resize {
        height: f64,
    },
    /// Virtual window over the current page
    Window,
    Snapshot,
    Hydrate {
        state: PersistedFeedback,
    },
}

fn first_page() -> usize {
    1
}

impl Command {
    /// Validates the command data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self {
            Command::Set { key, ttl_ms, .. } => {
                validate_key(key).or_else(|| match ttl_ms {
                    Some(0) => Some("ttl_ms must be positive".to_string()),
                    _ => None,
                })
            }
            Command::Get { key } | Command::Has { key } | Command::Remove { key } => {
                validate_key(key)
            }
            Command::MarkRead { id }
            | Command::MarkDone { id }
            | Command::AttachAnalysis { id, .. }
                if id.is_empty() =>
            {
                Some("Feedback id cannot be empty".to_string())
            }
            _ => None,
        }
    }
}

fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_command_deserialize() {
        let json = r#"{"op": "set", "key": "test", "value": "hello"}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        match cmd {
            Command::Set { key, value, ttl_ms } => {
                assert_eq!(key, "test");
                assert_eq!(value, "hello");
                assert!(ttl_ms.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_set_command_with_ttl() {
        let json = r#"{"op": "set", "key": "test", "value": {"n": 1}, "ttl_ms": 60000}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, Command::Set { ttl_ms: Some(60000), .. }));
    }

    #[test]
    fn test_unit_commands_deserialize() {
        for (json, expected) in [
            (r#"{"op":"clear"}"#, "Clear"),
            (r#"{"op":"next_page"}"#, "NextPage"),
            (r#"{"op":"window"}"#, "Window"),
        ] {
            let cmd: Command = serde_json::from_str(json).unwrap();
            assert!(format!("{:?}", cmd).starts_with(expected));
        }
    }

    #[test]
    fn test_load_feedback_defaults_to_first_page() {
        let json = r#"{"op":"load_feedback","items":[]}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, Command::LoadFeedback { page: 1, total: None, .. }));
    }

    #[test]
    fn test_unknown_op_rejected() {
        assert!(serde_json::from_str::<Command>(r#"{"op":"flush_all"}"#).is_err());
    }

    #[test]
    fn test_validate_empty_key() {
        let cmd = Command::Get { key: String::new() };
        assert!(cmd.validate().is_some());
    }

    #[test]
    fn test_validate_long_key() {
        let cmd = Command::Has {
            key: "x".repeat(MAX_KEY_LENGTH + 1),
        };
        assert!(cmd.validate().is_some());
    }

    #[test]
    fn test_validate_zero_ttl() {
        let cmd = Command::Set {
            key: "k".to_string(),
            value: serde_json::Value::Null,
            ttl_ms: Some(0),
        };
        assert!(cmd.validate().is_some());
    }

    #[test]
    fn test_validate_valid_commands() {
        let cmd = Command::Set {
            key: "valid_key".to_string(),
            value: serde_json::json!(1),
            ttl_ms: Some(60),
        };
        assert!(cmd.validate().is_none());
        assert!(Command::MarkRead { id: "7".to_string() }.validate().is_none());
        assert!(Command::MarkRead { id: String::new() }.validate().is_some());
    }
}
