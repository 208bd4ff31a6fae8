//! Aggregation engine: pure functions of the classified sequence.
//!
//! No hidden state: identical classifier outputs produce identical
//! aggregates, and re-running the engine is byte-stable.

pub mod risk;
pub mod suggestions;
pub mod summary;
pub mod timeline;
pub mod types;

pub use types::*;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::config::AnalysisConfig;
use crate::pipeline::classify::ClassifiedUtterance;
use crate::pipeline::parse::SourceKind;

/// Everything the engine derives from a classified transcript.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Aggregates {
    pub summary: SummaryCounts,
    pub high_risk_segments: Vec<HighRiskSegment>,
    pub improvement_suggestions: Vec<String>,
    pub emotion_timeline: Vec<TimelineBucket>,
}

pub fn aggregate(items: &[ClassifiedUtterance], config: &AnalysisConfig) -> Aggregates {
    let summary = summary::summarize(items);
    let high_risk_segments = risk::select_segments(items, config);
    let improvement_suggestions = suggestions::suggest(&summary, config);
    let emotion_timeline = timeline::bucketize(items, config);

    Aggregates {
        summary,
        high_risk_segments,
        improvement_suggestions,
        emotion_timeline,
    }
}

/// Wrap aggregates and processing metadata into the final immutable report.
pub fn assemble_report(
    aggregates: Aggregates,
    source_kind: SourceKind,
    processing_time_ms: u64,
    truncated: bool,
) -> AnalysisReport {
    AnalysisReport {
        id: Uuid::new_v4(),
        summary: aggregates.summary,
        high_risk_segments: aggregates.high_risk_segments,
        improvement_suggestions: aggregates.improvement_suggestions,
        emotion_timeline: aggregates.emotion_timeline,
        source_kind,
        processing_time_ms,
        truncated,
        generated_at: Utc::now(),
    }
}
