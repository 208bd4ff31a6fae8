use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "Tonescope";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `RUST_LOG`-style filter when the environment does not set one.
pub fn default_log_filter() -> &'static str {
    "tonescope=info,reqwest=warn"
}

/// Tuning knobs for an analysis run. Defaults match the documented contract;
/// tests override individual fields to probe edge behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Maximum utterances kept per run for csv/json/chat-text inputs
    /// (plain-text sentence splitting is uncapped).
    pub max_items: usize,
    /// Minimum trimmed text length (in chars) for an utterance to be kept.
    pub min_text_len: usize,
    /// Maximum high-risk segments reported.
    pub max_risk_segments: usize,
    /// Target number of emotion-timeline buckets.
    pub timeline_buckets: usize,
    /// Negative-sentiment ratio above which the sentiment-review suggestion fires.
    pub negative_ratio_threshold: f32,
    /// Anger ratio above which the de-escalation suggestion fires.
    pub anger_ratio_threshold: f32,
    /// High-urgency ratio above which the workflow suggestion fires.
    pub high_urgency_ratio_threshold: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_items: 100,
            min_text_len: 3,
            max_risk_segments: 5,
            timeline_buckets: 10,
            negative_ratio_threshold: 0.3,
            anger_ratio_threshold: 0.2,
            high_urgency_ratio_threshold: 0.1,
        }
    }
}

/// Connection settings for the zero-shot classifier endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Primary inference endpoint base URL.
    pub base_url: String,
    /// Optional CPU-pool endpoint probed once when the primary fails to init.
    pub cpu_base_url: Option<String>,
    /// Zero-shot model identifier sent with each request.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            cpu_base_url: None,
            model: "MoritzLaurer/mDeBERTa-v3-base-mnli-xnli".to_string(),
            timeout_secs: 60,
        }
    }
}

impl ClassifierConfig {
    /// Read settings from `TONESCOPE_CLASSIFIER_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("TONESCOPE_CLASSIFIER_URL").unwrap_or(defaults.base_url),
            cpu_base_url: std::env::var("TONESCOPE_CLASSIFIER_CPU_URL").ok(),
            model: std::env::var("TONESCOPE_CLASSIFIER_MODEL").unwrap_or(defaults.model),
            timeout_secs: std::env::var("TONESCOPE_CLASSIFIER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_tonescope() {
        assert_eq!(APP_NAME, "Tonescope");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn analysis_defaults_match_contract() {
        let config = AnalysisConfig::default();
        assert_eq!(config.max_items, 100);
        assert_eq!(config.min_text_len, 3);
        assert_eq!(config.max_risk_segments, 5);
        assert_eq!(config.timeline_buckets, 10);
        assert!((config.negative_ratio_threshold - 0.3).abs() < f32::EPSILON);
        assert!((config.anger_ratio_threshold - 0.2).abs() < f32::EPSILON);
        assert!((config.high_urgency_ratio_threshold - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn classifier_defaults_are_local() {
        let config = ClassifierConfig::default();
        assert!(config.base_url.contains("localhost"));
        assert!(config.cpu_base_url.is_none());
        assert_eq!(config.timeout_secs, 60);
    }
}
