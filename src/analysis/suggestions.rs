//! Improvement suggestion heuristics.
//!
//! Three independent ratio thresholds, evaluated in fixed order; every
//! triggered suggestion appears. When none trigger, a single positive
//! message stands in.

use super::types::SummaryCounts;
use crate::config::AnalysisConfig;

const SENTIMENT_REVIEW: &str = "High negative sentiment detected. Review the conversation approach and lead with more empathetic responses.";
const DEESCALATION_TRAINING: &str =
    "Anger shows up across multiple messages. Consider de-escalation training for the team.";
const WORKFLOW_OPTIMIZATION: &str =
    "A large share of messages are high urgency. Review response-time workflows to catch these sooner.";
const ALL_CLEAR: &str = "Communication quality looks good. Keep up the positive engagement.";

pub fn suggest(summary: &SummaryCounts, config: &AnalysisConfig) -> Vec<String> {
    let mut suggestions = Vec::new();
    if summary.total == 0 {
        suggestions.push(ALL_CLEAR.to_string());
        return suggestions;
    }

    let total = summary.total as f32;
    let ratio = |label_count: u32| label_count as f32 / total;

    let negative = summary.sentiment.get("negative").copied().unwrap_or(0);
    let anger = summary.emotion.get("anger").copied().unwrap_or(0);
    let high_urgency = summary.urgency.get("high").copied().unwrap_or(0);

    if ratio(negative) > config.negative_ratio_threshold {
        suggestions.push(SENTIMENT_REVIEW.to_string());
    }
    if ratio(anger) > config.anger_ratio_threshold {
        suggestions.push(DEESCALATION_TRAINING.to_string());
    }
    if ratio(high_urgency) > config.high_urgency_ratio_threshold {
        suggestions.push(WORKFLOW_OPTIMIZATION.to_string());
    }

    if suggestions.is_empty() {
        suggestions.push(ALL_CLEAR.to_string());
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summary::{bump, seeded};
    use crate::pipeline::classify::labels;

    fn summary(total: u32, negative: u32, anger: u32, high: u32) -> SummaryCounts {
        let mut sentiment = seeded(labels::SENTIMENT_LABELS);
        let mut emotion = seeded(labels::EMOTION_LABELS);
        let mut urgency = seeded(labels::URGENCY_LABELS);
        for _ in 0..negative {
            bump(&mut sentiment, "negative");
        }
        for _ in 0..anger {
            bump(&mut emotion, "anger");
        }
        for _ in 0..high {
            bump(&mut urgency, "high");
        }
        SummaryCounts {
            total,
            sentiment,
            emotion,
            urgency,
            topics: Default::default(),
        }
    }

    #[test]
    fn sentiment_review_fires_above_threshold() {
        // 4 of 10 negative: ratio 0.4 > 0.3.
        let suggestions = suggest(&summary(10, 4, 0, 0), &AnalysisConfig::default());
        assert!(suggestions.iter().any(|s| s.contains("negative sentiment")));
    }

    #[test]
    fn sentiment_review_silent_at_or_below_threshold() {
        // 2 of 10 negative: ratio 0.2, below 0.3.
        let suggestions = suggest(&summary(10, 2, 0, 0), &AnalysisConfig::default());
        assert!(!suggestions.iter().any(|s| s.contains("negative sentiment")));
        // Exactly at the threshold does not fire either (strict >).
        let suggestions = suggest(&summary(10, 3, 0, 0), &AnalysisConfig::default());
        assert!(!suggestions.iter().any(|s| s.contains("negative sentiment")));
    }

    #[test]
    fn all_triggers_stack_in_fixed_order() {
        let suggestions = suggest(&summary(10, 5, 3, 2), &AnalysisConfig::default());
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions[0].contains("negative sentiment"));
        assert!(suggestions[1].contains("de-escalation"));
        assert!(suggestions[2].contains("workflows"));
    }

    #[test]
    fn quiet_transcript_gets_the_positive_message() {
        let suggestions = suggest(&summary(10, 0, 0, 0), &AnalysisConfig::default());
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].contains("looks good"));
    }

    #[test]
    fn empty_transcript_gets_the_positive_message() {
        let suggestions = suggest(&summary(0, 0, 0, 0), &AnalysisConfig::default());
        assert_eq!(suggestions.len(), 1);
    }

    #[test]
    fn urgency_threshold_is_one_in_ten() {
        let suggestions = suggest(&summary(10, 0, 0, 2), &AnalysisConfig::default());
        assert!(suggestions.iter().any(|s| s.contains("workflows")));
        let suggestions = suggest(&summary(10, 0, 0, 1), &AnalysisConfig::default());
        assert!(!suggestions.iter().any(|s| s.contains("workflows")));
    }
}
