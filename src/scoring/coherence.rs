use super::lexicon::CompiledLexicon;
use super::score::{ratio, weighted_average};
use super::text::{std_dev, Sentence, TextStats};
use crate::settings::CoherenceWeights;

pub const NEUTRAL_COHERENCE: f64 = 0.5;
/// Stand-in for pronoun-reference analysis, which is not performed.
pub const PRONOUN_CONSISTENCY: f64 = 0.5;
const STRUCTURE_NORM: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoherenceBreakdown {
    pub transitions: f64,
    pub pronouns: f64,
    pub topic: f64,
    pub structure: f64,
}

impl CoherenceBreakdown {
    /// Components reported when there are too few sentences to compare.
    pub fn neutral() -> Self {
        Self {
            transitions: NEUTRAL_COHERENCE,
            pronouns: NEUTRAL_COHERENCE,
            topic: NEUTRAL_COHERENCE,
            structure: NEUTRAL_COHERENCE,
        }
    }
}

pub fn coherence_breakdown(stats: &TextStats, lexicon: &CompiledLexicon) -> CoherenceBreakdown {
    if stats.sentence_count < 2 {
        return CoherenceBreakdown::neutral();
    }

    CoherenceBreakdown {
        transitions: transition_density(&stats.sentences, lexicon),
        pronouns: PRONOUN_CONSISTENCY,
        topic: topic_consistency(&stats.sentences),
        structure: structure_variety(&stats.sentence_lengths()),
    }
}

pub fn coherence_score(
    stats: &TextStats,
    lexicon: &CompiledLexicon,
    weights: &CoherenceWeights,
) -> f64 {
    if stats.sentence_count < 2 {
        return NEUTRAL_COHERENCE;
    }

    let b = coherence_breakdown(stats, lexicon);
    weighted_average(&[
        (b.transitions, weights.transitions),
        (b.pronouns, weights.pronouns),
        (b.topic, weights.topic),
        (b.structure, weights.structure),
    ])
}

/// Fraction of sentences that contain at least one transition marker.
pub fn transition_density(sentences: &[Sentence], lexicon: &CompiledLexicon) -> f64 {
    let with_transition = sentences
        .iter()
        .filter(|s| lexicon.transitions.is_match(s.text))
        .count();
    ratio(with_transition as f64, sentences.len() as f64).min(1.0)
}

/// Mean Jaccard similarity of adjacent sentences' word sets.
pub fn topic_consistency(sentences: &[Sentence]) -> f64 {
    let similarities: Vec<f64> = sentences
        .windows(2)
        .map(|pair| {
            let a = pair[0].word_set();
            let b = pair[1].word_set();
            let intersection = a.intersection(&b).count();
            let union = a.union(&b).count();
            ratio(intersection as f64, union as f64)
        })
        .collect();
    ratio(similarities.iter().sum(), similarities.len() as f64)
}

pub fn structure_variety(lengths: &[f64]) -> f64 {
    (std_dev(lengths) / STRUCTURE_NORM).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Lexicon;

    fn score(text: &str) -> f64 {
        let lexicon = CompiledLexicon::compile(&Lexicon::default()).unwrap();
        coherence_score(
            &TextStats::analyze(text),
            &lexicon,
            &CoherenceWeights::default(),
        )
    }

    #[test]
    fn test_single_sentence_is_neutral() {
        assert_eq!(score("Only one sentence here."), NEUTRAL_COHERENCE);
        assert_eq!(score("no terminator at all"), NEUTRAL_COHERENCE);
    }

    #[test]
    fn test_single_sentence_breakdown_is_neutral() {
        let lexicon = CompiledLexicon::compile(&Lexicon::default()).unwrap();
        let stats = TextStats::analyze("However, the cat sat by the fire");
        assert_eq!(coherence_breakdown(&stats, &lexicon), CoherenceBreakdown::neutral());

        let stats = TextStats::analyze("However, the cat sat. Therefore it slept.");
        assert_eq!(coherence_breakdown(&stats, &lexicon).transitions, 1.0);
    }

    #[test]
    fn test_repeated_sentence() {
        // transitions 0, pronouns 0.5, topic 1.0, structure 0
        assert!((score("The cat sat. The cat sat.") - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_transition_density() {
        let lexicon = CompiledLexicon::compile(&Lexicon::default()).unwrap();
        let stats = TextStats::analyze("However, the plan failed. Therefore we stopped. We slept.");
        let density = transition_density(&stats.sentences, &lexicon);
        assert!((density - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_topic_consistency_is_order_sensitive() {
        let ordered = TextStats::analyze("Cats purr. Cats purr loudly. Dogs bark.");
        let shuffled = TextStats::analyze("Cats purr. Dogs bark. Cats purr loudly.");
        assert!(topic_consistency(&ordered.sentences) > topic_consistency(&shuffled.sentences));
    }

    #[test]
    fn test_structure_variety_caps_at_one() {
        assert_eq!(structure_variety(&[]), 0.0);
        assert_eq!(structure_variety(&[5.0, 5.0]), 0.0);
        assert!((structure_variety(&[2.0, 12.0]) - 0.5).abs() < 1e-12);
        assert_eq!(structure_variety(&[1.0, 60.0]), 1.0);
    }
}
