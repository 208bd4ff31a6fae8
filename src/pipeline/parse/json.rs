//! JSON transcript parsing.
//!
//! The payload is an array, an object exposing a `messages` or `data`
//! array, or a single item. Item text comes from the first present of the
//! known fields; bare strings pass through; anything else is serialized
//! compactly as a last resort. Kept items are numbered densely from 0.

use serde_json::Value;

use super::{keepable, ParsedTranscript, Utterance};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

const TEXT_FIELDS: &[&str] = &["text", "message", "content", "body"];
const TIME_FIELDS: &[&str] = &["timestamp", "time", "date"];
const SPEAKER_FIELDS: &[&str] = &["speaker", "user", "agent", "author"];

pub fn parse(raw: &[u8], config: &AnalysisConfig) -> Result<ParsedTranscript, AnalysisError> {
    let value: Value =
        serde_json::from_slice(raw).map_err(|e| AnalysisError::MalformedInput(e.to_string()))?;

    let mut utterances = Vec::new();
    for item in unwrap_items(value) {
        if utterances.len() >= config.max_items {
            break;
        }
        let Some(text) = extract_text(&item) else {
            continue;
        };
        let trimmed = text.trim();
        if !keepable(trimmed, config) {
            continue;
        }
        utterances.push(Utterance {
            text: trimmed.to_string(),
            index: utterances.len() as u32,
            speaker: field_string(&item, SPEAKER_FIELDS),
            timestamp: field_string(&item, TIME_FIELDS),
        });
    }

    Ok(ParsedTranscript {
        utterances,
        truncated: false,
    })
}

/// Locate the item array: top-level array, `messages`/`data` member, or the
/// whole payload as a single item.
fn unwrap_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in ["messages", "data"] {
                if matches!(map.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove(key) {
                        return items;
                    }
                }
            }
            vec![Value::Object(map)]
        }
        other => vec![other],
    }
}

/// Item text: first present of the known fields. A present-but-non-string
/// field skips the item; an item with no text-like field at all is
/// serialized as a last resort.
fn extract_text(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            for field in TEXT_FIELDS {
                if let Some(value) = map.get(*field) {
                    return value.as_str().map(|s| s.to_string());
                }
            }
            Some(item.to_string())
        }
        other => Some(other.to_string()),
    }
}

/// First usable value among the named fields; numbers are stringified
/// (epoch timestamps, numeric user ids).
fn field_string(item: &Value, fields: &[&str]) -> Option<String> {
    let map = item.as_object()?;
    for field in fields {
        match map.get(*field) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(raw: &[u8]) -> ParsedTranscript {
        parse(raw, &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn array_of_objects() {
        let parsed = parse_default(br#"[{"text": "hello there"}, {"text": "general kenobi"}]"#);
        assert_eq!(parsed.utterances.len(), 2);
        assert_eq!(parsed.utterances[0].text, "hello there");
    }

    #[test]
    fn kept_items_numbered_densely() {
        let parsed = parse_default(br#"[{"text": "hello there"}, {"text": "no"}, {"text": "kept again"}]"#);
        // "no" is dropped; survivors are renumbered 0..n-1.
        let indices: Vec<u32> = parsed.utterances.iter().map(|u| u.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn messages_wrapper_object() {
        let parsed = parse_default(br#"{"messages": [{"text": "from wrapper"}]}"#);
        assert_eq!(parsed.utterances[0].text, "from wrapper");
    }

    #[test]
    fn data_wrapper_object() {
        let parsed = parse_default(br#"{"data": [{"content": "from data"}]}"#);
        assert_eq!(parsed.utterances[0].text, "from data");
    }

    #[test]
    fn bare_object_is_a_single_item() {
        let parsed = parse_default(br#"{"message": "just one utterance"}"#);
        assert_eq!(parsed.utterances.len(), 1);
        assert_eq!(parsed.utterances[0].text, "just one utterance");
    }

    #[test]
    fn array_of_strings() {
        let parsed = parse_default(br#"["first message", "second message"]"#);
        assert_eq!(parsed.utterances.len(), 2);
    }

    #[test]
    fn text_field_precedence() {
        let parsed = parse_default(br#"[{"body": "from body", "text": "from text"}]"#);
        assert_eq!(parsed.utterances[0].text, "from text");
    }

    #[test]
    fn non_string_text_field_skips_item() {
        let parsed = parse_default(br#"[{"text": 42}, {"text": "kept item"}]"#);
        assert_eq!(parsed.utterances.len(), 1);
        assert_eq!(parsed.utterances[0].text, "kept item");
    }

    #[test]
    fn item_without_text_field_serialized_as_last_resort() {
        let parsed = parse_default(br#"[{"payload": {"kind": "odd"}}]"#);
        assert_eq!(parsed.utterances.len(), 1);
        assert!(parsed.utterances[0].text.contains("payload"));
    }

    #[test]
    fn speaker_and_timestamp_fields() {
        let parsed = parse_default(
            br#"[{"text": "hello there", "author": "Alice", "time": "09:15"}]"#,
        );
        let utterance = &parsed.utterances[0];
        assert_eq!(utterance.speaker.as_deref(), Some("Alice"));
        assert_eq!(utterance.timestamp.as_deref(), Some("09:15"));
    }

    #[test]
    fn numeric_timestamp_stringified() {
        let parsed = parse_default(br#"[{"text": "hello there", "timestamp": 1700000000}]"#);
        assert_eq!(parsed.utterances[0].timestamp.as_deref(), Some("1700000000"));
    }

    #[test]
    fn short_items_skipped() {
        let parsed = parse_default(br#"[{"text": "ok"}, {"text": "long enough"}]"#);
        assert_eq!(parsed.utterances.len(), 1);
    }

    #[test]
    fn malformed_json_is_fatal() {
        let err = parse(b"{not json", &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedInput(_)));
    }

    #[test]
    fn items_capped_at_max_items() {
        let items: Vec<String> = (0..150)
            .map(|i| format!(r#"{{"text": "message number {i}"}}"#))
            .collect();
        let raw = format!("[{}]", items.join(","));
        let parsed = parse_default(raw.as_bytes());
        assert_eq!(parsed.utterances.len(), 100);
    }
}
