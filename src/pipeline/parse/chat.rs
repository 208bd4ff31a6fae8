//! Chat-text parsing (line-oriented paste).
//!
//! Each non-blank line is tried against three patterns in fixed priority
//! order; the first match wins. Unmatched lines keep the raw line as text.
//! Only the first `max_items` non-blank lines are read; when more existed
//! the transcript is flagged truncated.

use regex::Regex;
use std::sync::OnceLock;

use super::{keepable, ParsedTranscript, Utterance};
use crate::config::AnalysisConfig;

/// Outcome of matching one chat line, in pattern priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum LineMatch {
    /// `[timestamp] speaker: message`
    Both {
        timestamp: String,
        speaker: String,
        text: String,
    },
    /// `speaker: message`
    SpeakerOnly { speaker: String, text: String },
    /// `[timestamp] message`
    TimestampOnly { timestamp: String, text: String },
    /// No pattern matched; the raw line is the text.
    NoMatch { text: String },
}

fn patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"^\[([^\]]+)\]\s*([^:]+):\s*(.+)$").expect("valid chat pattern"),
            Regex::new(r"^([^:\[\]]+):\s*(.+)$").expect("valid chat pattern"),
            Regex::new(r"^\[([^\]]+)\]\s*(.+)$").expect("valid chat pattern"),
        ]
    })
}

/// Match one line against the patterns in priority order, short-circuiting
/// on the first hit.
pub fn match_line(line: &str) -> LineMatch {
    let [both, speaker_only, timestamp_only] = patterns();

    if let Some(c) = both.captures(line) {
        return LineMatch::Both {
            timestamp: c[1].trim().to_string(),
            speaker: c[2].trim().to_string(),
            text: c[3].trim().to_string(),
        };
    }
    if let Some(c) = speaker_only.captures(line) {
        return LineMatch::SpeakerOnly {
            speaker: c[1].trim().to_string(),
            text: c[2].trim().to_string(),
        };
    }
    if let Some(c) = timestamp_only.captures(line) {
        return LineMatch::TimestampOnly {
            timestamp: c[1].trim().to_string(),
            text: c[2].trim().to_string(),
        };
    }
    LineMatch::NoMatch {
        text: line.trim().to_string(),
    }
}

pub fn parse(input: &str, config: &AnalysisConfig) -> ParsedTranscript {
    let non_blank: Vec<&str> = input.lines().filter(|l| !l.trim().is_empty()).collect();
    let truncated = non_blank.len() > config.max_items;

    let mut utterances = Vec::new();
    for line in non_blank.into_iter().take(config.max_items) {
        let (text, speaker, timestamp) = match match_line(line.trim()) {
            LineMatch::Both {
                timestamp,
                speaker,
                text,
            } => (text, Some(speaker), Some(timestamp)),
            LineMatch::SpeakerOnly { speaker, text } => (text, Some(speaker), None),
            LineMatch::TimestampOnly { timestamp, text } => (text, None, Some(timestamp)),
            LineMatch::NoMatch { text } => (text, None, None),
        };
        if !keepable(&text, config) {
            continue;
        }
        utterances.push(Utterance {
            text,
            index: utterances.len() as u32,
            speaker,
            timestamp,
        });
    }

    ParsedTranscript {
        utterances,
        truncated,
    }
}
