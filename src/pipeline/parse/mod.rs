//! Transcript parsing: raw input bytes to a uniform utterance sequence.
//!
//! Four input kinds, one output shape. Rows that cannot yield usable text
//! are dropped silently; only a missing CSV text column, malformed JSON, or
//! an unrecognized kind abort the run.

pub mod chat;
pub mod csv;
pub mod json;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// Declared kind of a raw transcript input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Csv,
    Json,
    PlainText,
    ChatText,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::PlainText => "plain-text",
            Self::ChatText => "chat-text",
        }
    }

    /// Resolve a declared kind string. Unrecognized kinds are a hard
    /// failure before any parsing begins.
    pub fn parse(kind: &str) -> Result<Self, AnalysisError> {
        match kind {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "plain-text" => Ok(Self::PlainText),
            "chat-text" => Ok(Self::ChatText),
            other => Err(AnalysisError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// One unit of conversation to be classified.
///
/// `index` is strictly increasing across the sequence. CSV keeps the
/// original data-row number (skipped rows leave gaps); the other kinds
/// number kept items densely from 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Parser output. `truncated` is the chat-text overflow notice: more than
/// `max_items` non-blank lines existed and the tail was discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedTranscript {
    pub utterances: Vec<Utterance>,
    pub truncated: bool,
}

/// Dispatch raw input bytes to the parser for the declared kind.
///
/// JSON parses the raw bytes; the text-based kinds decode lossily, so
/// invalid UTF-8 degrades instead of aborting.
pub fn parse_input(
    raw: &[u8],
    kind: SourceKind,
    config: &AnalysisConfig,
) -> Result<ParsedTranscript, AnalysisError> {
    match kind {
        SourceKind::Json => json::parse(raw, config),
        SourceKind::Csv => csv::parse(&String::from_utf8_lossy(raw), config),
        SourceKind::PlainText => Ok(text::parse(&String::from_utf8_lossy(raw), config)),
        SourceKind::ChatText => Ok(chat::parse(&String::from_utf8_lossy(raw), config)),
    }
}

/// Shared keep/drop rule: trimmed text must reach `min_text_len` chars.
pub(crate) fn keepable(trimmed: &str, config: &AnalysisConfig) -> bool {
    trimmed.chars().count() >= config.min_text_len
}
