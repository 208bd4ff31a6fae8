//! Fixed candidate label sets and per-role fallbacks.
//!
//! The four sets are the whole classification vocabulary; the fallback for
//! each role is substituted whenever its call fails or returns a malformed
//! shape, so a degraded run still produces a complete record.

pub const SENTIMENT_LABELS: &[&str] = &["positive", "negative", "neutral"];

pub const EMOTION_LABELS: &[&str] = &["joy", "anger", "fear", "sadness", "surprise", "neutral"];

pub const URGENCY_LABELS: &[&str] = &["high", "medium", "low"];

pub const TOPIC_LABELS: &[&str] = &[
    "customer service",
    "technical support",
    "billing",
    "product feedback",
    "complaint",
    "compliment",
    "question",
    "request",
];

/// Topic labels kept per utterance, ranked by the classifier.
pub const MAX_TOPICS: usize = 3;

pub const FALLBACK_SCORE: f32 = 0.5;
pub const SENTIMENT_FALLBACK: &str = "neutral";
pub const EMOTION_FALLBACK: &str = "neutral";
pub const URGENCY_FALLBACK: &str = "low";
pub const TOPIC_FALLBACK: &str = "general";
