//! Feedback Item Module

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, Sentiment};

// == Feedback Item ==
/// One piece of feedback received by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub sentiment: Sentiment,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_anonymous")]
    pub is_anonymous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_user: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AnalysisResult>,
}

fn default_anonymous() -> bool {
    true
}

impl FeedbackItem {
    /// Anonymous, unread feedback received at `timestamp`.
    pub fn new(id: impl Into<String>, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            sentiment: Sentiment::Neutral,
            timestamp,
            is_anonymous: true,
            from_user: None,
            is_read: false,
            is_done: false,
            ai_analysis: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "id": "42",
            "message": "Keep it up",
            "sentiment": "positive",
            "timestamp": "2024-05-01T10:00:00Z",
            "isAnonymous": false,
            "fromUser": "budi"
        }"#;
        let item: FeedbackItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, "42");
        assert_eq!(item.sentiment, Sentiment::Positive);
        assert_eq!(item.from_user.as_deref(), Some("budi"));
        assert!(!item.is_read);
        assert!(item.ai_analysis.is_none());
    }

    #[test]
    fn test_defaults_for_sparse_payload() {
        let json = r#"{"id":"1","message":"hi","timestamp":"2024-05-01T10:00:00Z"}"#;
        let item: FeedbackItem = serde_json::from_str(json).unwrap();

        assert!(item.is_anonymous);
        assert_eq!(item.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_serialize_skips_empty_optionals() {
        let item = FeedbackItem::new("1", "hi", Utc::now());
        let json = serde_json::to_value(&item).unwrap();

        assert!(json.get("fromUser").is_none());
        assert!(json.get("aiAnalysis").is_none());
        assert_eq!(json["isRead"], false);
    }
}
