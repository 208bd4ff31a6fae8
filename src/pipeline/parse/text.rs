//! Plain-text sentence splitting.
//!
//! Boundaries are `.`, `!`, or `?` followed by whitespace or end of input;
//! terminal punctuation stays with its sentence. A blob with no detectable
//! boundary is one sentence. Uncapped: pasted blobs are typically short.

use super::{keepable, ParsedTranscript, Utterance};
use crate::config::AnalysisConfig;

pub fn parse(input: &str, config: &AnalysisConfig) -> ParsedTranscript {
    let mut utterances = Vec::new();
    for sentence in split_sentences(input) {
        let trimmed = sentence.trim();
        if !keepable(trimmed, config) {
            continue;
        }
        utterances.push(Utterance {
            text: trimmed.to_string(),
            index: utterances.len() as u32,
            speaker: None,
            timestamp: None,
        });
    }
    ParsedTranscript {
        utterances,
        truncated: false,
    }
}

fn split_sentences(input: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            match chars.peek() {
                Some(next) if next.is_whitespace() => {
                    sentences.push(std::mem::take(&mut current));
                }
                _ => {}
            }
        }
    }
    if !current.trim().is_empty() {
        sentences.push(current);
    }
    sentences
}
