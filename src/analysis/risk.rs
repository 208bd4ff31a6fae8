//! High-risk segment selection.

use super::types::HighRiskSegment;
use crate::config::AnalysisConfig;
use crate::pipeline::classify::ClassifiedUtterance;

const ACTION_ESCALATE: &str =
    "Immediate escalation recommended: route this exchange to a senior agent.";
const ACTION_ACKNOWLEDGE: &str =
    "Acknowledge the customer's frustration before offering a solution.";
const ACTION_ADDRESS: &str = "Address the concerns raised here in a direct follow-up.";
const ACTION_MONITOR: &str = "Monitor this segment for recurring issues.";

/// The risk filter: negative sentiment, anger, or high urgency.
pub fn is_high_risk(item: &ClassifiedUtterance) -> bool {
    item.sentiment.label == "negative"
        || item.emotion.label == "anger"
        || item.urgency.label == "high"
}

/// First `max_risk_segments` matches of the risk filter, original order.
pub fn select_segments(
    items: &[ClassifiedUtterance],
    config: &AnalysisConfig,
) -> Vec<HighRiskSegment> {
    items
        .iter()
        .filter(|item| is_high_risk(item))
        .take(config.max_risk_segments)
        .map(to_segment)
        .collect()
}

fn to_segment(item: &ClassifiedUtterance) -> HighRiskSegment {
    let index = item.utterance.index;
    let (start, end) = match &item.utterance.timestamp {
        Some(ts) => (ts.clone(), ts.clone()),
        None => (format!("Item {index}"), format!("Item {}", index + 1)),
    };

    HighRiskSegment {
        start,
        end,
        source_index: index,
        negative_tone: (item.sentiment.score * 100.0).round() as u32,
        urgency_level: item.urgency.label.clone(),
        affected_topics: item.topics.iter().map(|t| t.label.clone()).collect(),
        suggested_action: suggested_action(item).to_string(),
    }
}

/// Strict priority, evaluated in this fixed order regardless of which
/// condition put the item past the filter: urgency, then anger, then
/// sentiment, then monitor.
fn suggested_action(item: &ClassifiedUtterance) -> &'static str {
    if item.urgency.label == "high" {
        ACTION_ESCALATE
    } else if item.emotion.label == "anger" {
        ACTION_ACKNOWLEDGE
    } else if item.sentiment.label == "negative" {
        ACTION_ADDRESS
    } else {
        ACTION_MONITOR
    }
}
