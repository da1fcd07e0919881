pub mod coherence;
pub mod completeness;
pub mod creativity;
pub mod length;
mod lexicon;
mod metrics;
pub mod readability;
mod score;
pub mod specificity;
pub mod text;

pub use creativity::SentenceKind;
pub use lexicon::{CompiledLexicon, PhraseMatcher};
pub use metrics::{
    calculate_metrics, default_scorer, DetailedMetrics, MetricsResult, QualityScorer,
    QualityTier, ScorePercentages,
};
pub use score::{clamp_unit, to_percent, weighted_average};
pub use text::TextStats;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricsError;
    use crate::settings::Settings;

    fn scorer() -> QualityScorer {
        QualityScorer::new(&Settings::default()).unwrap()
    }

    fn words(n: usize) -> String {
        vec!["alpha"; n].join(" ")
    }

    #[test]
    fn test_ten_words_without_prompt() {
        let m = scorer().calculate_metrics(&words(10), None).unwrap();
        assert_eq!(m.word_count, 10);
        assert_eq!(m.completeness_score, 0.3);
        assert_eq!(m.length_appropriateness_score, 0.3);
    }

    #[test]
    fn test_long_structured_response_without_prompt() {
        let sentence = format!("{}.", words(25));
        let paragraph = format!("{sentence} {sentence}");
        let content = [paragraph.as_str(); 3].join("\n\n");

        let m = scorer().calculate_metrics(&content, None).unwrap();
        assert_eq!(m.word_count, 150);
        assert_eq!(m.sentence_count, 6);
        assert_eq!(m.paragraph_count, 3);
        assert_eq!(m.completeness_score, 0.8);
        assert_eq!(m.length_appropriateness_score, 0.8);
    }

    #[test]
    fn test_sentence_order_only_moves_topic_consistency() {
        let forward = "Cats purr softly. Cats purr loudly. Dogs bark at night.";
        let shuffled = "Cats purr softly. Dogs bark at night. Cats purr loudly.";
        let a = scorer().calculate_metrics(forward, None).unwrap();
        let b = scorer().calculate_metrics(shuffled, None).unwrap();
        assert_eq!(a.word_count, b.word_count);
        assert_eq!(a.lexical_diversity, b.lexical_diversity);
        // adjacent overlap drops from 0.25 to 0 with transition and structure unchanged
        assert!((a.coherence_score - b.coherence_score - 0.3 * 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_free_function_rejects_empty_content() {
        assert!(matches!(
            calculate_metrics("", None),
            Err(MetricsError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_scorer_is_shareable_across_threads() {
        let scorer = std::sync::Arc::new(scorer());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let scorer = scorer.clone();
                std::thread::spawn(move || {
                    scorer
                        .calculate_metrics(&format!("Thread {i} says hello. Twice."), None)
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().sentence_count, 2);
        }
    }
}
