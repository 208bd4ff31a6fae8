//! Summary count tallies.

use std::collections::BTreeMap;

use super::types::SummaryCounts;
use crate::pipeline::classify::{labels, ClassifiedUtterance};

/// Tally sentiment/emotion/urgency labels plus every topic label appearing
/// anywhere in any utterance's topic list (not just the top one).
pub fn summarize(items: &[ClassifiedUtterance]) -> SummaryCounts {
    let mut sentiment = seeded(labels::SENTIMENT_LABELS);
    let mut emotion = seeded(labels::EMOTION_LABELS);
    let mut urgency = seeded(labels::URGENCY_LABELS);
    let mut topics: BTreeMap<String, u32> = BTreeMap::new();

    for item in items {
        bump(&mut sentiment, &item.sentiment.label);
        bump(&mut emotion, &item.emotion.label);
        bump(&mut urgency, &item.urgency.label);
        for topic in &item.topics {
            bump(&mut topics, &topic.label);
        }
    }

    SummaryCounts {
        total: items.len() as u32,
        sentiment,
        emotion,
        urgency,
        topics,
    }
}

/// Count map pre-keyed with a closed label set at zero.
pub(crate) fn seeded(labels: &[&str]) -> BTreeMap<String, u32> {
    labels.iter().map(|l| (l.to_string(), 0)).collect()
}

pub(crate) fn bump(map: &mut BTreeMap<String, u32>, label: &str) {
    *map.entry(label.to_string()).or_insert(0) += 1;
}
