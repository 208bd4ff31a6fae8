//! Report types produced by the aggregation engine.
//!
//! Count maps are `BTreeMap` so serialization is deterministic: re-running
//! the engine on the same classified sequence yields byte-identical output.
//! All values are plain counts; percentage conversion belongs to the
//! presentation layer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::pipeline::parse::SourceKind;

/// Aggregate counts over the classified transcript. The closed label sets
/// (sentiment, emotion, urgency) are fully keyed even at zero; the topic
/// map is open-ended over whatever labels occurred.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryCounts {
    pub total: u32,
    pub sentiment: BTreeMap<String, u32>,
    pub emotion: BTreeMap<String, u32>,
    pub urgency: BTreeMap<String, u32>,
    pub topics: BTreeMap<String, u32>,
}

/// A conversation excerpt flagged for negative sentiment, anger, or high
/// urgency, with a suggested remediation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HighRiskSegment {
    pub start: String,
    pub end: String,
    /// Index of the source utterance this segment references.
    pub source_index: u32,
    /// round(sentiment score × 100).
    pub negative_tone: u32,
    pub urgency_level: String,
    pub affected_topics: Vec<String>,
    pub suggested_action: String,
}

/// One contiguous chunk of the conversation, summarized by label counts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimelineBucket {
    /// First item's timestamp when present, else a synthetic percent marker.
    pub label: String,
    pub sentiment: BTreeMap<String, u32>,
    pub emotion: BTreeMap<String, u32>,
}

/// Final aggregate of one analysis run. Immutable once assembled; a new run
/// produces an entirely new report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub summary: SummaryCounts,
    pub high_risk_segments: Vec<HighRiskSegment>,
    pub improvement_suggestions: Vec<String>,
    pub emotion_timeline: Vec<TimelineBucket>,
    pub source_kind: SourceKind,
    /// Wall-clock elapsed across parse + classify + aggregate.
    pub processing_time_ms: u64,
    /// Chat-text inputs only: more non-blank lines existed than were read.
    pub truncated: bool,
    pub generated_at: DateTime<Utc>,
}
