use super::score::{ratio, weighted_average};
use super::text::TextStats;
use crate::settings::CompletenessWeights;

pub const SHORT_RESPONSE_WORDS: usize = 20;
pub const THOROUGH_RESPONSE_WORDS: usize = 100;
pub const THOROUGH_RESPONSE_SENTENCES: usize = 5;

pub const COMPLETENESS_SHORT: f64 = 0.3;
pub const COMPLETENESS_THOROUGH: f64 = 0.8;
pub const COMPLETENESS_DEFAULT: f64 = 0.6;

/// Completeness against the prompt when one is available, otherwise a
/// content-only estimate.
pub fn completeness_score(
    response: &TextStats,
    prompt: Option<&TextStats>,
    weights: &CompletenessWeights,
) -> f64 {
    match prompt {
        Some(prompt) if prompt.word_count > 0 => weighted_average(&[
            (key_term_coverage(response, prompt), weights.key_terms),
            (response_depth(response.word_count, prompt.word_count), weights.depth),
            (structural_completeness(response.paragraph_count), weights.structure),
        ]),
        _ => content_only(response),
    }
}

fn content_only(response: &TextStats) -> f64 {
    if response.word_count < SHORT_RESPONSE_WORDS {
        COMPLETENESS_SHORT
    } else if response.word_count > THOROUGH_RESPONSE_WORDS
        && response.sentence_count > THOROUGH_RESPONSE_SENTENCES
    {
        COMPLETENESS_THOROUGH
    } else {
        COMPLETENESS_DEFAULT
    }
}

/// Share of distinct prompt words that also appear in the response.
pub fn key_term_coverage(response: &TextStats, prompt: &TextStats) -> f64 {
    let prompt_words = prompt.word_set();
    let response_words = response.word_set();
    let covered = prompt_words.intersection(&response_words).count();
    ratio(covered as f64, prompt_words.len() as f64)
}

pub fn response_depth(response_words: usize, prompt_words: usize) -> f64 {
    if prompt_words == 0 {
        return 0.4;
    }
    let r = response_words as f64 / prompt_words as f64;
    if (2.0..=10.0).contains(&r) {
        1.0
    } else if (1.0..=15.0).contains(&r) {
        0.7
    } else {
        0.4
    }
}

pub fn structural_completeness(paragraphs: usize) -> f64 {
    match paragraphs {
        0 | 1 => 0.5,
        2 => 0.7,
        _ => 0.9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(content: &str, prompt: Option<&str>) -> f64 {
        let response = TextStats::analyze(content);
        let prompt = prompt.map(TextStats::analyze);
        completeness_score(&response, prompt.as_ref(), &CompletenessWeights::default())
    }

    fn sentence(words: usize) -> String {
        format!("{}.", vec!["lorem"; words].join(" "))
    }

    #[test]
    fn test_short_response_without_prompt() {
        assert_eq!(score("one two three four five six seven eight nine ten", None), 0.3);
    }

    #[test]
    fn test_thorough_response_without_prompt() {
        let paragraph = format!("{} {}", sentence(25), sentence(25));
        let content = vec![paragraph; 3].join("\n\n");
        let stats = TextStats::analyze(&content);
        assert_eq!(stats.word_count, 150);
        assert_eq!(stats.sentence_count, 6);
        assert_eq!(stats.paragraph_count, 3);
        assert_eq!(score(&content, None), 0.8);
    }

    #[test]
    fn test_middling_response_without_prompt() {
        assert_eq!(score(&sentence(40), None), 0.6);
    }

    #[test]
    fn test_key_term_coverage_ignores_case() {
        let response =
            TextStats::analyze("Plants use Photosynthesis. Let me EXPLAIN how it works.");
        let prompt = TextStats::analyze("Explain photosynthesis in plants");
        assert!((key_term_coverage(&response, &prompt) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_with_prompt() {
        // coverage 0.75, depth 9/4 -> 1.0, one paragraph -> 0.5
        let s = score(
            "Plants use photosynthesis. Let me explain how it works.",
            Some("Explain photosynthesis in plants"),
        );
        assert!((s - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_prompt_without_words_falls_back() {
        assert_eq!(score("short answer", Some("   ?! ")), 0.3);
    }

    #[test]
    fn test_response_depth_bands() {
        assert_eq!(response_depth(20, 10), 1.0);
        assert_eq!(response_depth(100, 10), 1.0);
        assert_eq!(response_depth(10, 10), 0.7);
        assert_eq!(response_depth(150, 10), 0.7);
        assert_eq!(response_depth(5, 10), 0.4);
        assert_eq!(response_depth(200, 10), 0.4);
        assert_eq!(response_depth(5, 0), 0.4);
    }

    #[test]
    fn test_structural_completeness() {
        assert_eq!(structural_completeness(0), 0.5);
        assert_eq!(structural_completeness(2), 0.7);
        assert_eq!(structural_completeness(4), 0.9);
    }
}
