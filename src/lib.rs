pub mod analysis;
pub mod classifier;
pub mod config;
pub mod error;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

pub use analysis::{AnalysisReport, HighRiskSegment, SummaryCounts, TimelineBucket};
pub use classifier::{
    ClassifierError, ClassifierService, HfZeroShotClient, LabelScore, MockClassifier,
    ZeroShotClassifier, ZeroShotOutput,
};
pub use config::{AnalysisConfig, ClassifierConfig};
pub use error::AnalysisError;
pub use pipeline::classify::{classify_single, ClassificationProgress, ClassifiedUtterance};
pub use pipeline::parse::{SourceKind, Utterance};
pub use pipeline::{run_analysis, RunOptions};

/// Initialize tracing output. Call once from the hosting process.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Analyze a raw transcript with default settings: parse the declared kind,
/// classify every utterance, aggregate, and assemble the report.
///
/// Callers that need progress reporting or cancellation use
/// [`pipeline::run_analysis`] directly.
pub async fn analyze(
    raw: &[u8],
    kind: SourceKind,
    classifier: &dyn ZeroShotClassifier,
) -> Result<AnalysisReport, AnalysisError> {
    pipeline::run_analysis(
        raw,
        kind,
        classifier,
        &AnalysisConfig::default(),
        &RunOptions::default(),
    )
    .await
}
