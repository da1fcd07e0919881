use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::lexicon::CompiledLexicon;
use super::score::{ratio, weighted_average};
use super::text::TextStats;
use crate::settings::SpecificityWeights;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").unwrap());
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{4}-\d{1,2}-\d{1,2}\b|\b\d{1,2}/\d{1,2}/\d{2,4}\b").unwrap()
});
static PERCENTAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?%").unwrap());

const SPECIFIC_TERM_CHARS: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpecificityBreakdown {
    pub numeric: f64,
    pub terms: f64,
    pub examples: f64,
}

pub fn specificity_breakdown(stats: &TextStats, lexicon: &CompiledLexicon) -> SpecificityBreakdown {
    SpecificityBreakdown {
        numeric: numeric_specificity(stats),
        terms: term_specificity(&stats.words, &lexicon.vague_words),
        examples: example_density(stats, lexicon),
    }
}

pub fn specificity_score(
    stats: &TextStats,
    lexicon: &CompiledLexicon,
    weights: &SpecificityWeights,
) -> f64 {
    let b = specificity_breakdown(stats, lexicon);
    weighted_average(&[
        (b.numeric, weights.numeric),
        (b.terms, weights.terms),
        (b.examples, weights.examples),
    ])
}

/// Numbers, dates and percentages per sentence. A date or percentage also
/// counts as the numbers inside it.
pub fn numeric_specificity(stats: &TextStats) -> f64 {
    let hits = NUMBER.find_iter(stats.text).count()
        + DATE.find_iter(stats.text).count()
        + PERCENTAGE.find_iter(stats.text).count();
    ratio(hits as f64, stats.sentence_count as f64).min(1.0)
}

pub fn term_specificity(words: &[String], vague_words: &HashSet<String>) -> f64 {
    let specific = words
        .iter()
        .filter(|w| w.chars().count() > SPECIFIC_TERM_CHARS && !vague_words.contains(w.as_str()))
        .count();
    (ratio(specific as f64, words.len() as f64) * 2.0).min(1.0)
}

pub fn example_density(stats: &TextStats, lexicon: &CompiledLexicon) -> f64 {
    let hits = lexicon.examples.count(stats.text);
    ratio(hits as f64, stats.sentence_count as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Lexicon;

    fn lexicon() -> CompiledLexicon {
        CompiledLexicon::compile(&Lexicon::default()).unwrap()
    }

    #[test]
    fn test_specificity_blend_weights_each_component() {
        let lexicon = lexicon();
        let stats =
            TextStats::analyze("Life is like a river. Suddenly, for example, 40% of it flowed north!");

        let b = specificity_breakdown(&stats, &lexicon);
        // "40" and "40%" over two sentences
        assert_eq!(b.numeric, 1.0);
        // "suddenly", "example" over 13 words, doubled
        assert!((b.terms - 4.0 / 13.0).abs() < 1e-9);
        assert!((b.examples - 0.5).abs() < 1e-9);

        let expected = 0.3 * 1.0 + 0.4 * (4.0 / 13.0) + 0.3 * 0.5;
        let score = specificity_score(&stats, &lexicon, &SpecificityWeights::default());
        assert!((score - expected).abs() < 1e-9);
        assert!((score - 0.5731).abs() < 1e-4);
    }

    #[test]
    fn test_numeric_specificity() {
        let stats =
            TextStats::analyze("Revenue rose 40% in 2023. Costs fell. Staff stayed. Nothing moved.");
        // "40", "2023" and the percentage: 3 hits over 4 sentences
        assert!((numeric_specificity(&stats) - 0.75).abs() < 1e-12);

        let vague = TextStats::analyze("Things happened at some point.");
        assert_eq!(numeric_specificity(&vague), 0.0);
    }

    #[test]
    fn test_dates_count_as_specific() {
        let stats = TextStats::analyze(
            "Released 2024-03-15 and patched 4/2/2024. Then nothing else happened at all. Fine. Done.",
        );
        assert_eq!(numeric_specificity(&stats), 1.0);
    }

    #[test]
    fn test_term_specificity_skips_vague_words() {
        let lexicon = lexicon();
        let words: Vec<String> = ["something", "everything", "photosynthesis", "leaf"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        assert!((term_specificity(&words, &lexicon.vague_words) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_example_density() {
        let lexicon = lexicon();
        let stats = TextStats::analyze(
            "Fruits such as apples are sweet. Many tools, for example hammers, are heavy.",
        );
        assert_eq!(example_density(&stats, &lexicon), 1.0);

        let stats = TextStats::analyze("Apples are sweet. Hammers are heavy.");
        assert_eq!(example_density(&stats, &lexicon), 0.0);
    }
}
