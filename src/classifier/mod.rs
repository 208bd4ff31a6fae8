//! External zero-shot classifier boundary.
//!
//! The pipeline consumes one capability: rank caller-supplied candidate
//! labels against a piece of text. Everything behind that capability
//! (model, device, hosting) is opaque. Responses are validated here at the
//! boundary: any shape violation collapses into `MalformedResponse`, which
//! the orchestrator treats like every other call failure.

pub mod hf_api;
pub mod service;

pub use hf_api::HfZeroShotClient;
pub use service::ClassifierService;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Classifier endpoint unreachable at {0}")]
    Connection(String),

    #[error("Classifier request timed out after {0}s")]
    Timeout(u64),

    #[error("Classifier endpoint returned status {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("Malformed classifier response: {0}")]
    MalformedResponse(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Input text cannot be empty")]
    EmptyInput,

    #[error("Candidate labels cannot be empty")]
    NoCandidateLabels,
}

/// One label with its confidence score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

impl LabelScore {
    pub fn new(label: &str, score: f32) -> Self {
        Self {
            label: label.to_string(),
            score,
        }
    }
}

/// Ranked output of one zero-shot call: most-likely label first,
/// scores aligned with labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZeroShotOutput {
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

impl ZeroShotOutput {
    /// Boundary validation of the `{labels, scores}` contract.
    ///
    /// Empty labels, misaligned lengths, and out-of-range scores all become
    /// `MalformedResponse` so callers see exactly one failure shape.
    pub fn validated(self) -> Result<Self, ClassifierError> {
        if self.labels.is_empty() {
            return Err(ClassifierError::MalformedResponse("no labels".into()));
        }
        if self.labels.len() != self.scores.len() {
            return Err(ClassifierError::MalformedResponse(format!(
                "{} labels but {} scores",
                self.labels.len(),
                self.scores.len()
            )));
        }
        if self
            .scores
            .iter()
            .any(|s| !s.is_finite() || *s < 0.0 || *s > 1.0)
        {
            return Err(ClassifierError::MalformedResponse(
                "score outside [0, 1]".into(),
            ));
        }
        Ok(self)
    }

    /// Top-ranked label with its score.
    pub fn top(&self) -> Option<LabelScore> {
        match (self.labels.first(), self.scores.first()) {
            (Some(label), Some(score)) => Some(LabelScore::new(label, *score)),
            _ => None,
        }
    }

    /// First `n` ranked labels with scores.
    pub fn top_n(&self, n: usize) -> Vec<LabelScore> {
        self.labels
            .iter()
            .zip(self.scores.iter())
            .take(n)
            .map(|(label, score)| LabelScore::new(label, *score))
            .collect()
    }
}

/// The capability the pipeline consumes.
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Rank `candidate_labels` against `text`, most-likely first.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<ZeroShotOutput, ClassifierError>;
}

/// Mock classifier for tests: deterministic, no network.
pub struct MockClassifier {
    mode: MockMode,
}

enum MockMode {
    /// Rank candidates found in the preferred list first (score 0.85),
    /// split the remainder evenly across the rest.
    Preferring(Vec<String>),
    /// Equal probability across candidates in the given order.
    Uniform,
    /// Every call fails with a connection error.
    Failing,
    /// Every call succeeds with a shape that fails boundary validation.
    Malformed,
}

impl MockClassifier {
    pub fn preferring(labels: &[&str]) -> Self {
        Self {
            mode: MockMode::Preferring(labels.iter().map(|l| l.to_string()).collect()),
        }
    }

    pub fn uniform() -> Self {
        Self {
            mode: MockMode::Uniform,
        }
    }

    pub fn failing() -> Self {
        Self {
            mode: MockMode::Failing,
        }
    }

    pub fn malformed() -> Self {
        Self {
            mode: MockMode::Malformed,
        }
    }
}

#[async_trait]
impl ZeroShotClassifier for MockClassifier {
    async fn classify(
        &self,
        _text: &str,
        candidate_labels: &[&str],
    ) -> Result<ZeroShotOutput, ClassifierError> {
        match &self.mode {
            MockMode::Failing => Err(ClassifierError::Connection("mock://down".into())),
            MockMode::Malformed => Ok(ZeroShotOutput {
                labels: candidate_labels.iter().map(|l| l.to_string()).collect(),
                scores: vec![],
            }),
            MockMode::Uniform => {
                let n = candidate_labels.len().max(1);
                Ok(ZeroShotOutput {
                    labels: candidate_labels.iter().map(|l| l.to_string()).collect(),
                    scores: vec![1.0 / n as f32; candidate_labels.len()],
                })
            }
            MockMode::Preferring(preferred) => {
                let winner = candidate_labels
                    .iter()
                    .copied()
                    .find(|c| preferred.iter().any(|p| p.as_str() == *c));
                let mut labels = Vec::with_capacity(candidate_labels.len());
                let mut scores = Vec::with_capacity(candidate_labels.len());
                if let Some(winner) = winner {
                    labels.push(winner.to_string());
                    scores.push(0.85);
                    let rest: Vec<&str> = candidate_labels
                        .iter()
                        .copied()
                        .filter(|c| *c != winner)
                        .collect();
                    let share = if rest.is_empty() {
                        0.0
                    } else {
                        0.15 / rest.len() as f32
                    };
                    for label in rest {
                        labels.push(label.to_string());
                        scores.push(share);
                    }
                } else {
                    let n = candidate_labels.len().max(1);
                    labels = candidate_labels.iter().map(|l| l.to_string()).collect();
                    scores = vec![1.0 / n as f32; candidate_labels.len()];
                }
                Ok(ZeroShotOutput { labels, scores })
            }
        }
    }
}
