//! Emotion timeline bucketing.
//!
//! The ordered sequence is partitioned into contiguous chunks of stride
//! `max(1, total / target_buckets)`; the final chunk absorbs any remainder,
//! so small transcripts get one bucket per item and large ones roughly the
//! target count.

use super::summary::{bump, seeded};
use super::types::TimelineBucket;
use crate::config::AnalysisConfig;
use crate::pipeline::classify::{labels, ClassifiedUtterance};

pub fn bucketize(items: &[ClassifiedUtterance], config: &AnalysisConfig) -> Vec<TimelineBucket> {
    if items.is_empty() {
        return Vec::new();
    }

    let total = items.len();
    let stride = (total / config.timeline_buckets).max(1);
    let bucket_count = total / stride;

    let mut buckets = Vec::with_capacity(bucket_count);
    for i in 0..bucket_count {
        let start = i * stride;
        let end = if i + 1 == bucket_count {
            total
        } else {
            start + stride
        };
        buckets.push(build_bucket(i, &items[start..end]));
    }
    buckets
}

fn build_bucket(bucket_index: usize, chunk: &[ClassifiedUtterance]) -> TimelineBucket {
    let label = chunk
        .first()
        .and_then(|item| item.utterance.timestamp.clone())
        .unwrap_or_else(|| format!("{}%", bucket_index * 10));

    let mut sentiment = seeded(labels::SENTIMENT_LABELS);
    let mut emotion = seeded(labels::EMOTION_LABELS);
    for item in chunk {
        bump(&mut sentiment, &item.sentiment.label);
        bump(&mut emotion, &item.emotion.label);
    }

    TimelineBucket {
        label,
        sentiment,
        emotion,
    }
}
