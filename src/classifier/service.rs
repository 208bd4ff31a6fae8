//! Owned, lazily-initialized classifier handle.
//!
//! The handle is an explicit value the caller threads into the pipeline; it
//! is not process-global. `init()` probes the primary endpoint once and, on
//! failure, retries exactly once against the CPU endpoint when one is
//! configured. Concurrent initializers share a single probe. `reset()`
//! tears the handle down so the next call re-initializes.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::hf_api::HfZeroShotClient;
use super::{ClassifierError, ZeroShotClassifier, ZeroShotOutput};
use crate::config::ClassifierConfig;

pub struct ClassifierService {
    config: ClassifierConfig,
    slot: Mutex<Option<Arc<HfZeroShotClient>>>,
}

impl ClassifierService {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            slot: Mutex::new(None),
        }
    }

    /// Build from `TONESCOPE_CLASSIFIER_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(ClassifierConfig::from_env())
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Return the ready client, initializing it on first use.
    ///
    /// The slot lock is held across the probe so concurrent callers wait for
    /// one initialization instead of racing their own.
    pub async fn init(&self) -> Result<Arc<HfZeroShotClient>, ClassifierError> {
        let mut slot = self.slot.lock().await;
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }

        let primary = HfZeroShotClient::from_config(&self.config);
        match primary.warm_up().await {
            Ok(()) => {
                tracing::info!(
                    endpoint = primary.base_url(),
                    model = primary.model(),
                    "Classifier initialized"
                );
                let client = Arc::new(primary);
                *slot = Some(Arc::clone(&client));
                Ok(client)
            }
            Err(primary_err) => {
                let Some(cpu_url) = self.config.cpu_base_url.as_deref() else {
                    return Err(primary_err);
                };
                tracing::warn!(
                    error = %primary_err,
                    fallback = cpu_url,
                    "Primary classifier endpoint failed, retrying on CPU endpoint"
                );
                let cpu =
                    HfZeroShotClient::new(cpu_url, &self.config.model, self.config.timeout_secs);
                cpu.warm_up().await?;
                tracing::info!(endpoint = cpu.base_url(), "Classifier initialized on CPU fallback");
                let client = Arc::new(cpu);
                *slot = Some(Arc::clone(&client));
                Ok(client)
            }
        }
    }

    /// Has `init()` completed successfully?
    pub async fn is_ready(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    /// Tear down the handle. The next call re-initializes from scratch.
    pub async fn reset(&self) {
        *self.slot.lock().await = None;
    }
}

#[async_trait]
impl ZeroShotClassifier for ClassifierService {
    /// Classify through the managed client, initializing lazily on first use.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<ZeroShotOutput, ClassifierError> {
        let client = self.init().await?;
        client.classify(text, candidate_labels).await
    }
}
