//! HTTP client for a hosted zero-shot classification endpoint
//! (HuggingFace-style `{inputs, parameters}` wire shape).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ClassifierError, ZeroShotClassifier, ZeroShotOutput};
use crate::config::ClassifierConfig;

/// Async client for one inference endpoint and model.
#[derive(Debug)]
pub struct HfZeroShotClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HfZeroShotClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(&config.base_url, &config.model, config.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Probe the endpoint through the same code path real calls use.
    /// The first request against a cold endpoint also warms the model.
    pub async fn warm_up(&self) -> Result<(), ClassifierError> {
        self.classify("warm up", &["ready", "not ready"]).await?;
        Ok(())
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClassifierError {
        if e.is_connect() {
            ClassifierError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ClassifierError::Timeout(self.timeout_secs)
        } else {
            ClassifierError::HttpClient(e.to_string())
        }
    }
}

/// Request body for POST /models/{model}
#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
    multi_label: bool,
}

/// Response body: ranked labels with aligned scores.
#[derive(Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f32>,
}

#[async_trait]
impl ZeroShotClassifier for HfZeroShotClient {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<ZeroShotOutput, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }
        if candidate_labels.is_empty() {
            return Err(ClassifierError::NoCandidateLabels);
        }

        let url = format!("{}/models/{}", self.base_url, self.model);
        let body = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels,
                multi_label: false,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ZeroShotResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))?;

        ZeroShotOutput {
            labels: parsed.labels,
            scores: parsed.scores,
        }
        .validated()
    }
}
