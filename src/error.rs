use thiserror::Error;

/// Run-fatal failures of the analysis pipeline.
///
/// Everything else (short rows, unparsable cells, individual classifier-call
/// failures) is absorbed locally: the row is skipped or the classification
/// falls back, and the run completes.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("CSV header has no recognizable text column (expected one of: text, message, content)")]
    MissingColumn,

    #[error("Malformed JSON input: {0}")]
    MalformedInput(String),

    #[error("Analysis cancelled")]
    Cancelled,
}
