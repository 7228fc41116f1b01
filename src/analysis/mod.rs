//! Analysis Module
//!
//! Typed AI analysis results and their memoization cache.

mod cache;
mod result;

pub use cache::AnalysisCache;
pub use result::{
    AnalysisResult, Priority, ResponseSuggestion, Sentiment, SentimentAnalysis, Tone,
    TranslationResult,
};
