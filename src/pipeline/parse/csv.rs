//! CSV transcript parsing.
//!
//! Header-driven: the first line names the columns, matched
//! case-insensitively by substring against synonym sets. Data rows are
//! split on literal commas (surrounding `"` stripped per cell; no quoted
//! comma escaping). Retained rows keep their original 0-based data-row
//! number as `index`, so skipped rows leave gaps.

use super::{keepable, ParsedTranscript, Utterance};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

const TEXT_SYNONYMS: &[&str] = &["text", "message", "content"];
const TIME_SYNONYMS: &[&str] = &["time", "date", "timestamp"];
const SPEAKER_SYNONYMS: &[&str] = &["speaker", "user", "agent"];

pub fn parse(input: &str, config: &AnalysisConfig) -> Result<ParsedTranscript, AnalysisError> {
    let mut lines = input.lines();
    let header = split_row(lines.next().unwrap_or_default());

    let text_col = find_column(&header, TEXT_SYNONYMS).ok_or(AnalysisError::MissingColumn)?;
    let time_col = find_column(&header, TIME_SYNONYMS);
    let speaker_col = find_column(&header, SPEAKER_SYNONYMS);

    let mut utterances = Vec::new();
    for (row, line) in lines.enumerate() {
        if utterances.len() >= config.max_items {
            break;
        }
        let cells = split_row(line);
        let Some(text) = cells.get(text_col) else {
            continue;
        };
        let text = text.trim();
        if !keepable(text, config) {
            continue;
        }
        utterances.push(Utterance {
            text: text.to_string(),
            index: row as u32,
            speaker: optional_cell(&cells, speaker_col),
            timestamp: optional_cell(&cells, time_col),
        });
    }

    Ok(ParsedTranscript {
        utterances,
        truncated: false,
    })
}

/// First header cell containing any synonym, case-insensitively.
fn find_column(header: &[String], synonyms: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let lower = cell.to_lowercase();
        synonyms.iter().any(|s| lower.contains(s))
    })
}

/// Split a row on literal commas, stripping whitespace and surrounding
/// quotes per cell.
fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|cell| cell.trim().trim_matches('"').trim().to_string())
        .collect()
}

fn optional_cell(cells: &[String], col: Option<usize>) -> Option<String> {
    let value = cells.get(col?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
