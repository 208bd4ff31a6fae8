//! The analysis pipeline: parse → classify → aggregate → assemble.
//!
//! Data flows strictly forward; no stage mutates a predecessor's output.

pub mod classify;
pub mod parse;

use std::time::Instant;

use crate::analysis::{self, AnalysisReport};
use crate::classifier::ZeroShotClassifier;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

pub use classify::{ClassificationProgress, RunOptions};
use parse::SourceKind;

/// Run the full pipeline over raw input bytes.
///
/// `processing_time_ms` on the returned report is wall-clock across all
/// three stages. Classifier-call failures degrade individual slots; the
/// only fatal outcomes are the parse errors and cancellation.
pub async fn run_analysis(
    raw: &[u8],
    kind: SourceKind,
    classifier: &dyn ZeroShotClassifier,
    config: &AnalysisConfig,
    options: &RunOptions<'_>,
) -> Result<AnalysisReport, AnalysisError> {
    let start = Instant::now();

    let transcript = parse::parse_input(raw, kind, config)?;
    tracing::info!(
        kind = kind.as_str(),
        items = transcript.utterances.len(),
        truncated = transcript.truncated,
        "Transcript parsed"
    );

    let classified = classify::classify_transcript(classifier, &transcript.utterances, options).await?;
    let aggregates = analysis::aggregate(&classified, config);
    let report = analysis::assemble_report(
        aggregates,
        kind,
        start.elapsed().as_millis() as u64,
        transcript.truncated,
    );

    tracing::info!(
        report_id = %report.id,
        items = report.summary.total,
        duration_ms = report.processing_time_ms,
        "Analysis complete"
    );
    Ok(report)
}
