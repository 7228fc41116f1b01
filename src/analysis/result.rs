//! Analysis Result Module
//!
//! Typed AI analysis results and tolerant parsing of language-model replies.
//! Missing or malformed fields fall back to neutral defaults instead of
//! failing, so a bad reply never blocks the dashboard.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

const DEFAULT_CONFIDENCE: f64 = 0.5;
const UNKNOWN_LANGUAGE: &str = "unknown";

// == Sentiment ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            other => Err(format!("unknown sentiment '{}'", other)),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

// == Tone ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Empathetic,
    Apologetic,
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "professional" => Ok(Self::Professional),
            "friendly" => Ok(Self::Friendly),
            "empathetic" => Ok(Self::Empathetic),
            "apologetic" => Ok(Self::Apologetic),
            other => Err(format!("unknown tone '{}'", other)),
        }
    }
}

// == Priority ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

/// Parses a loosely typed label, falling back to the default.
fn label_or_default<T: FromStr + Default>(raw: Option<String>) -> T {
    raw.and_then(|s| s.parse().ok()).unwrap_or_default()
}

// == Sentiment Analysis ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub sentiment: Sentiment,
    /// Model confidence in `[0, 1]`
    pub confidence: f64,
    pub emotions: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSentimentReply {
    sentiment: Option<String>,
    confidence: Option<f64>,
    emotions: Option<Vec<String>>,
    keywords: Option<Vec<String>>,
}

impl SentimentAnalysis {
    /// Fallback used when the model reply is unusable.
    pub fn neutral() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            confidence: DEFAULT_CONFIDENCE,
            emotions: Vec::new(),
            keywords: Vec::new(),
        }
    }

    /// Parses a model reply of the form
    /// `{"sentiment": .., "confidence": .., "emotions": [..], "keywords": [..]}`.
    pub fn from_reply(reply: &str) -> Self {
        let raw: RawSentimentReply = match serde_json::from_str(reply) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "unparseable sentiment reply, using neutral fallback");
                return Self::neutral();
            }
        };

        let confidence = raw
            .confidence
            .filter(|c| c.is_finite() && *c != 0.0)
            .map(|c| c.clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_CONFIDENCE);

        Self {
            sentiment: label_or_default(raw.sentiment),
            confidence,
            emotions: raw.emotions.unwrap_or_default(),
            keywords: raw.keywords.unwrap_or_default(),
        }
    }
}

// == Translation Result ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub detected_language: String,
    pub is_indonesian: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTranslationReply {
    translated_text: Option<String>,
    detected_language: Option<String>,
    is_indonesian: Option<bool>,
}

impl TranslationResult {
    /// Leaves the text untouched, as if it were already Indonesian.
    pub fn passthrough(original: &str) -> Self {
        Self {
            original_text: original.to_string(),
            translated_text: original.to_string(),
            detected_language: UNKNOWN_LANGUAGE.to_string(),
            is_indonesian: true,
        }
    }

    /// Parses a model reply for the translation of `original`.
    pub fn from_reply(original: &str, reply: &str) -> Self {
        let raw: RawTranslationReply = match serde_json::from_str(reply) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "unparseable translation reply, passing text through");
                return Self::passthrough(original);
            }
        };

        Self {
            original_text: original.to_string(),
            translated_text: raw
                .translated_text
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| original.to_string()),
            detected_language: raw
                .detected_language
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
            is_indonesian: raw.is_indonesian.unwrap_or(false),
        }
    }
}

// == Response Suggestion ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSuggestion {
    pub suggestion: String,
    pub tone: Tone,
    pub priority: Priority,
}

#[derive(Debug, Default, Deserialize)]
struct RawSuggestion {
    suggestion: Option<String>,
    tone: Option<String>,
    priority: Option<String>,
}

impl ResponseSuggestion {
    /// Parses a JSON array of suggestions. Unparseable replies yield none.
    pub fn list_from_reply(reply: &str) -> Vec<Self> {
        match serde_json::from_str::<Vec<RawSuggestion>>(reply) {
            Ok(raw) => raw
                .into_iter()
                .map(|s| Self {
                    suggestion: s.suggestion.unwrap_or_default(),
                    tone: label_or_default(s.tone),
                    priority: label_or_default(s.priority),
                })
                .collect(),
            Err(err) => {
                warn!(error = %err, "unparseable suggestion reply");
                Vec::new()
            }
        }
    }
}

// == Analysis Result ==
/// Full AI analysis of one feedback message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub sentiment: SentimentAnalysis,
    pub translation: TranslationResult,
    pub suggestions: Vec<ResponseSuggestion>,
    pub processed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(
        sentiment: SentimentAnalysis,
        translation: TranslationResult,
        suggestions: Vec<ResponseSuggestion>,
    ) -> Self {
        Self {
            sentiment,
            translation,
            suggestions,
            processed_at: Utc::now(),
        }
    }

    /// Assembles a result from the three raw model replies for `message`.
    pub fn from_replies(
        message: &str,
        sentiment_reply: &str,
        translation_reply: &str,
        suggestions_reply: &str,
    ) -> Self {
        Self::new(
            SentimentAnalysis::from_reply(sentiment_reply),
            TranslationResult::from_reply(message, translation_reply),
            ResponseSuggestion::list_from_reply(suggestions_reply),
        )
    }
}
