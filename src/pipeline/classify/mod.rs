//! Classification orchestration.
//!
//! Exactly one utterance is in flight at a time; the four label-set calls
//! for that utterance run concurrently and all settle before the next item
//! starts. This bounds pressure on the external classifier to four
//! concurrent calls while still parallelizing the independent label sets.
//! A failed call never drops the utterance: its slot takes the role
//! fallback and the run continues.

pub mod labels;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use serde::Serialize;

use crate::classifier::{ClassifierError, LabelScore, ZeroShotClassifier, ZeroShotOutput};
use crate::error::AnalysisError;
use crate::pipeline::parse::Utterance;
use self::labels::*;

/// An utterance plus its four classification outcomes.
/// Owned by the run that produced it; never mutated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassifiedUtterance {
    pub utterance: Utterance,
    pub sentiment: LabelScore,
    pub emotion: LabelScore,
    pub urgency: LabelScore,
    /// At most [`labels::MAX_TOPICS`] labels, descending score.
    pub topics: Vec<LabelScore>,
}

/// Progress events emitted while a transcript is classified.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ClassificationProgress {
    Started { total: u32 },
    Item { processed: u32, total: u32 },
    Completed { total: u32, duration_ms: u64 },
}

impl ClassificationProgress {
    /// Completed fraction in [0, 1] for progress bars.
    pub fn fraction(&self) -> f32 {
        match self {
            Self::Started { .. } => 0.0,
            Self::Item { processed, total } => {
                if *total == 0 {
                    1.0
                } else {
                    *processed as f32 / *total as f32
                }
            }
            Self::Completed { .. } => 1.0,
        }
    }
}

/// Side-channel observation and cancellation hooks for a run.
#[derive(Default)]
pub struct RunOptions<'a> {
    /// Invoked after each utterance settles, plus start/completion brackets.
    pub progress: Option<&'a (dyn Fn(ClassificationProgress) + Send + Sync)>,
    /// Checked between items; a set flag abandons the run cleanly.
    pub cancel: Option<&'a AtomicBool>,
}

/// Classify every utterance in input order. Never drops an item.
pub async fn classify_transcript(
    classifier: &dyn ZeroShotClassifier,
    utterances: &[Utterance],
    options: &RunOptions<'_>,
) -> Result<Vec<ClassifiedUtterance>, AnalysisError> {
    let start = Instant::now();
    let total = utterances.len() as u32;

    if let Some(progress) = options.progress {
        progress(ClassificationProgress::Started { total });
    }

    let mut classified = Vec::with_capacity(utterances.len());
    for (i, utterance) in utterances.iter().enumerate() {
        if let Some(cancel) = options.cancel {
            if cancel.load(Ordering::Relaxed) {
                tracing::info!(processed = i, total, "Classification cancelled between items");
                return Err(AnalysisError::Cancelled);
            }
        }

        classified.push(classify_utterance(classifier, utterance).await);

        if let Some(progress) = options.progress {
            progress(ClassificationProgress::Item {
                processed: i as u32 + 1,
                total,
            });
        }
    }

    if let Some(progress) = options.progress {
        progress(ClassificationProgress::Completed {
            total,
            duration_ms: start.elapsed().as_millis() as u64,
        });
    }
    Ok(classified)
}

/// Classify one utterance: the four label-set calls run concurrently and
/// are joined before returning.
pub async fn classify_utterance(
    classifier: &dyn ZeroShotClassifier,
    utterance: &Utterance,
) -> ClassifiedUtterance {
    let text = utterance.text.as_str();
    let (sentiment, emotion, urgency, topics) = tokio::join!(
        single_label(classifier, text, SENTIMENT_LABELS, SENTIMENT_FALLBACK, "sentiment"),
        single_label(classifier, text, EMOTION_LABELS, EMOTION_FALLBACK, "emotion"),
        single_label(classifier, text, URGENCY_LABELS, URGENCY_FALLBACK, "urgency"),
        topic_list(classifier, text),
    );

    ClassifiedUtterance {
        utterance: utterance.clone(),
        sentiment,
        emotion,
        urgency,
        topics,
    }
}

/// Ad-hoc classification of one piece of text outside a batch run.
pub async fn classify_single(
    classifier: &dyn ZeroShotClassifier,
    text: &str,
) -> ClassifiedUtterance {
    let utterance = Utterance {
        text: text.trim().to_string(),
        index: 0,
        speaker: None,
        timestamp: None,
    };
    classify_utterance(classifier, &utterance).await
}

async fn single_label(
    classifier: &dyn ZeroShotClassifier,
    text: &str,
    candidates: &[&str],
    fallback: &str,
    role: &'static str,
) -> LabelScore {
    match guarded(classifier, text, candidates).await {
        Ok(output) => output
            .top()
            .unwrap_or_else(|| LabelScore::new(fallback, FALLBACK_SCORE)),
        Err(e) => {
            tracing::warn!(role, error = %e, "Classifier call failed, using fallback");
            LabelScore::new(fallback, FALLBACK_SCORE)
        }
    }
}

async fn topic_list(classifier: &dyn ZeroShotClassifier, text: &str) -> Vec<LabelScore> {
    match guarded(classifier, text, TOPIC_LABELS).await {
        Ok(output) => output.top_n(MAX_TOPICS),
        Err(e) => {
            tracing::warn!(role = "topic", error = %e, "Classifier call failed, using fallback");
            vec![LabelScore::new(TOPIC_FALLBACK, FALLBACK_SCORE)]
        }
    }
}

/// One guarded call: transport errors and shape violations surface the same
/// way, so a success with a malformed body takes the fallback path too.
async fn guarded(
    classifier: &dyn ZeroShotClassifier,
    text: &str,
    candidates: &[&str],
) -> Result<ZeroShotOutput, ClassifierError> {
    classifier
        .classify(text, candidates)
        .await
        .and_then(ZeroShotOutput::validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::MockClassifier;
    use std::sync::atomic::AtomicU32;
    use std::sync::Mutex;

    fn utterance(index: u32, text: &str) -> Utterance {
        Utterance {
            text: text.to_string(),
            index,
            speaker: None,
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn classifies_all_four_roles() {
        let mock = MockClassifier::preferring(&["negative", "anger", "high", "complaint"]);
        let result = classify_utterance(&mock, &utterance(0, "this is broken and I am furious")).await;

        assert_eq!(result.sentiment.label, "negative");
        assert_eq!(result.emotion.label, "anger");
        assert_eq!(result.urgency.label, "high");
        assert_eq!(result.topics[0].label, "complaint");
        assert!(result.topics.len() <= MAX_TOPICS);
    }

    #[tokio::test]
    async fn topics_truncated_to_three() {
        let mock = MockClassifier::uniform();
        let result = classify_utterance(&mock, &utterance(0, "tell me about my bill")).await;
        assert_eq!(result.topics.len(), MAX_TOPICS);
    }

    #[tokio::test]
    async fn failing_classifier_takes_all_fallbacks() {
        let mock = MockClassifier::failing();
        let result = classify_utterance(&mock, &utterance(3, "anything at all here")).await;

        assert_eq!(result.sentiment.label, "neutral");
        assert!((result.sentiment.score - 0.5).abs() < f32::EPSILON);
        assert_eq!(result.emotion.label, "neutral");
        assert_eq!(result.urgency.label, "low");
        assert_eq!(result.topics.len(), 1);
        assert_eq!(result.topics[0].label, "general");
    }

    #[tokio::test]
    async fn malformed_output_is_a_failure() {
        let mock = MockClassifier::malformed();
        let result = classify_utterance(&mock, &utterance(0, "shape violation incoming")).await;
        assert_eq!(result.sentiment.label, "neutral");
        assert_eq!(result.urgency.label, "low");
        assert_eq!(result.topics[0].label, "general");
    }

    #[tokio::test]
    async fn run_completes_when_classifier_always_fails() {
        let mock = MockClassifier::failing();
        let utterances: Vec<Utterance> = (0..4)
            .map(|i| utterance(i, "some text that is long enough"))
            .collect();
        let classified = classify_transcript(&mock, &utterances, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(classified.len(), 4);
        assert!(classified.iter().all(|c| c.sentiment.label == "neutral"));
    }

    #[tokio::test]
    async fn order_preserved() {
        let mock = MockClassifier::uniform();
        let utterances: Vec<Utterance> =
            (0..5).map(|i| utterance(i, "message long enough")).collect();
        let classified = classify_transcript(&mock, &utterances, &RunOptions::default())
            .await
            .unwrap();
        let indices: Vec<u32> = classified.iter().map(|c| c.utterance.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn progress_events_bracket_the_run() {
        let mock = MockClassifier::uniform();
        let utterances: Vec<Utterance> =
            (0..3).map(|i| utterance(i, "message long enough")).collect();
        let events: Mutex<Vec<ClassificationProgress>> = Mutex::new(Vec::new());
        let record = |e: ClassificationProgress| events.lock().unwrap().push(e);
        let options = RunOptions {
            progress: Some(&record),
            cancel: None,
        };

        classify_transcript(&mock, &utterances, &options).await.unwrap();

        let events = events.into_inner().unwrap();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], ClassificationProgress::Started { total: 3 }));
        assert!(matches!(
            events[2],
            ClassificationProgress::Item { processed: 2, total: 3 }
        ));
        assert!(matches!(events[4], ClassificationProgress::Completed { total: 3, .. }));
    }

    #[test]
    fn fraction_reflects_processed_over_total() {
        let item = ClassificationProgress::Item {
            processed: 1,
            total: 4,
        };
        assert!((item.fraction() - 0.25).abs() < f32::EPSILON);
        assert!((ClassificationProgress::Started { total: 4 }.fraction()).abs() < f32::EPSILON);
        assert!(
            (ClassificationProgress::Completed { total: 4, duration_ms: 1 }.fraction() - 1.0)
                .abs()
                < f32::EPSILON
        );
    }

    #[tokio::test]
    async fn cancellation_between_items() {
        let mock = MockClassifier::uniform();
        let utterances: Vec<Utterance> =
            (0..10).map(|i| utterance(i, "message long enough")).collect();

        let cancel = AtomicBool::new(false);
        let seen = AtomicU32::new(0);
        let record = |e: ClassificationProgress| {
            if let ClassificationProgress::Item { processed, .. } = e {
                seen.store(processed, Ordering::Relaxed);
                if processed == 2 {
                    cancel.store(true, Ordering::Relaxed);
                }
            }
        };
        let options = RunOptions {
            progress: Some(&record),
            cancel: Some(&cancel),
        };

        let result = classify_transcript(&mock, &utterances, &options).await;
        assert!(matches!(result, Err(AnalysisError::Cancelled)));
        assert_eq!(seen.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn single_text_path_uses_the_same_fallbacks() {
        let mock = MockClassifier::failing();
        let result = classify_single(&mock, "  ad hoc text to classify  ").await;
        assert_eq!(result.utterance.text, "ad hoc text to classify");
        assert_eq!(result.utterance.index, 0);
        assert_eq!(result.urgency.label, "low");
    }

    #[test]
    fn progress_serializes_with_type_tag() {
        let event = ClassificationProgress::Item {
            processed: 3,
            total: 7,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"Item\""));
        assert!(json.contains("\"processed\":3"));
    }
}
