use proptest::prelude::*;
use quality_metrics::settings::Settings;
use quality_metrics::{MetricsResult, QualityScorer};

fn scorer() -> QualityScorer {
    QualityScorer::new(&Settings::default()).unwrap()
}

fn in_unit(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

fn check_bounds(m: &MetricsResult) -> Result<(), TestCaseError> {
    for (name, score) in [
        ("coherence", m.coherence_score),
        ("completeness", m.completeness_score),
        ("readability", m.readability_score),
        ("length", m.length_appropriateness_score),
        ("creativity", m.creativity_score),
        ("specificity", m.specificity_score),
        ("overall", m.overall_score),
        ("lexical_diversity", m.lexical_diversity),
        ("complexity", m.complexity_score),
    ] {
        prop_assert!(in_unit(score), "{} = {} out of range", name, score);
    }
    prop_assert!(m.sentiment_polarity.is_finite());
    prop_assert!((-1.0..=1.0).contains(&m.sentiment_polarity));
    prop_assert!(m.avg_sentence_length.is_finite() && m.avg_sentence_length >= 0.0);
    Ok(())
}

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,10}", 1..12).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn scores_stay_in_range(s in ".{1,400}") {
        let m = scorer().calculate_metrics(&s, None).unwrap();
        check_bounds(&m)?;
    }

    #[test]
    fn scores_stay_in_range_with_prompt(s in ".{1,400}", prompt in ".{0,120}") {
        let m = scorer().calculate_metrics(&s, Some(&prompt)).unwrap();
        check_bounds(&m)?;
    }

    #[test]
    fn scoring_is_idempotent(s in "[a-zA-Z0-9 .,!?%\n]{1,300}", prompt in "[a-z ?]{0,60}") {
        let scorer = scorer();
        let first = scorer.calculate_metrics(&s, Some(&prompt)).unwrap();
        let second = scorer.calculate_metrics(&s, Some(&prompt)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn sentence_order_keeps_word_statistics(sentences in prop::collection::vec(sentence(), 1..8)) {
        let forward = format!("{}.", sentences.join(". "));
        let mut reversed_sentences = sentences.clone();
        reversed_sentences.reverse();
        let reversed = format!("{}.", reversed_sentences.join(". "));

        let scorer = scorer();
        let a = scorer.calculate_metrics(&forward, None).unwrap();
        let b = scorer.calculate_metrics(&reversed, None).unwrap();
        prop_assert_eq!(a.word_count, b.word_count);
        prop_assert_eq!(a.sentence_count, b.sentence_count);
        prop_assert_eq!(a.lexical_diversity, b.lexical_diversity);
    }

    #[test]
    fn single_sentence_single_paragraph(s in sentence()) {
        let m = scorer().calculate_metrics(&format!("{s}."), None).unwrap();
        prop_assert_eq!(m.sentence_count, 1);
        prop_assert_eq!(m.paragraph_count, 1);
    }
}
