//! Tokenisation and the text statistics shared by every sub-score.
//!
//! Words are runs of `\w` characters as the `regex` crate defines them. For
//! ASCII text this is the classic `\b\w+\b`; other scripts are tokenised on
//! the same rule without any language-specific segmentation.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::lexicon::CompiledLexicon;
use super::score::ratio;

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

const WORD_LENGTH_NORM: f64 = 8.0;
const SENTENCE_LENGTH_NORM: f64 = 25.0;

#[derive(Debug, Clone)]
pub struct Sentence<'a> {
    pub text: &'a str,
    /// The run of `.`, `!` or `?` that closed the sentence, empty for a
    /// trailing fragment.
    pub terminator: &'a str,
    pub words: Vec<String>,
}

impl Sentence<'_> {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word_set(&self) -> HashSet<&str> {
        self.words.iter().map(String::as_str).collect()
    }
}

#[derive(Debug, Clone)]
pub struct TextStats<'a> {
    pub text: &'a str,
    pub sentences: Vec<Sentence<'a>>,
    pub paragraphs: Vec<&'a str>,
    /// Lowercased word tokens in order.
    pub words: Vec<String>,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub avg_sentence_length: f64,
    pub avg_word_length: f64,
    pub lexical_diversity: f64,
}

impl<'a> TextStats<'a> {
    pub fn analyze(text: &'a str) -> Self {
        let sentences = split_sentences(text);
        let paragraphs = split_paragraphs(text);
        let words = words(text);

        let word_count = words.len();
        let sentence_count = sentences.len();
        let paragraph_count = paragraphs.len();

        let unique = words.iter().collect::<HashSet<_>>().len();
        let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();

        Self {
            text,
            avg_sentence_length: ratio(word_count as f64, sentence_count as f64),
            avg_word_length: ratio(total_chars as f64, word_count as f64),
            lexical_diversity: ratio(unique as f64, word_count as f64),
            sentences,
            paragraphs,
            words,
            word_count,
            sentence_count,
            paragraph_count,
        }
    }

    pub fn word_set(&self) -> HashSet<&str> {
        self.words.iter().map(String::as_str).collect()
    }

    pub fn sentence_lengths(&self) -> Vec<f64> {
        self.sentences.iter().map(|s| s.len() as f64).collect()
    }

    /// Mean of normalised word length and normalised sentence length.
    pub fn complexity_score(&self) -> f64 {
        let word_part = (self.avg_word_length / WORD_LENGTH_NORM).min(1.0);
        let sentence_part = (self.avg_sentence_length / SENTENCE_LENGTH_NORM).min(1.0);
        (word_part + sentence_part) / 2.0
    }
}

/// Lowercased `\b\w+\b` tokens.
pub fn words(text: &str) -> Vec<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

pub fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut sentences = Vec::new();

    let mut start = 0;
    for end in SENTENCE_END.find_iter(text) {
        push_sentence(&mut sentences, &text[start..end.start()], end.as_str());
        start = end.end();
    }
    push_sentence(&mut sentences, &text[start..], "");

    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<Sentence<'a>>, fragment: &'a str, terminator: &'a str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(Sentence {
            text: trimmed,
            terminator,
            words: words(trimmed),
        });
    }
}

pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// `(positive - negative) / (positive + negative)` over every occurrence of a
/// sentiment word, or 0 when none occur.
pub fn sentiment_polarity(text: &str, lexicon: &CompiledLexicon) -> f64 {
    let positive = lexicon.positive.count(text) as f64;
    let negative = lexicon.negative.count(text) as f64;
    ratio(positive - negative, positive + negative).clamp(-1.0, 1.0)
}

pub fn mean(values: &[f64]) -> f64 {
    ratio(values.iter().sum(), values.len() as f64)
}

/// Population variance.
pub fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    let squared: Vec<f64> = values.iter().map(|v| (v - m).powi(2)).collect();
    mean(&squared)
}

pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Lexicon;

    fn lexicon() -> CompiledLexicon {
        CompiledLexicon::compile(&Lexicon::default()).unwrap()
    }

    #[test]
    fn test_basic_counts() {
        let stats = TextStats::analyze("This is a great day. The weather is great and sunny.");
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.word_count, 11);
        assert_eq!(stats.paragraph_count, 1);
        assert!((stats.avg_sentence_length - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_sentiment_counts_every_occurrence() {
        let text = "This is a great day. The weather is great and sunny.";
        assert_eq!(sentiment_polarity(text, &lexicon()), 1.0);
        assert_eq!(sentiment_polarity("Bad plan, great result.", &lexicon()), 0.0);
        assert_eq!(
            sentiment_polarity("A terrible, awful day with one good moment.", &lexicon()),
            -1.0 / 3.0
        );
    }

    #[test]
    fn test_no_sentiment_words() {
        assert_eq!(sentiment_polarity("The report lists three rivers.", &lexicon()), 0.0);
    }

    #[test]
    fn test_sentence_terminators() {
        let sentences = split_sentences("Really?! Yes. And then");
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0].text, "Really");
        assert_eq!(sentences[0].terminator, "?!");
        assert_eq!(sentences[1].terminator, ".");
        assert_eq!(sentences[2].text, "And then");
        assert_eq!(sentences[2].terminator, "");
    }

    #[test]
    fn test_sentences_skip_empty_fragments() {
        let sentences = split_sentences("... Hello world.  ! ");
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].words, vec!["hello", "world"]);
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let paragraphs = split_paragraphs("One.\n\nTwo.\n   \n\n Three.\nStill three.");
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[2], "Three.\nStill three.");
    }

    #[test]
    fn test_lexical_diversity_is_case_insensitive() {
        let stats = TextStats::analyze("The the THE cat");
        assert_eq!(stats.word_count, 4);
        assert!((stats.lexical_diversity - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_complexity_score() {
        let stats = TextStats::analyze("aaaa bbbb.");
        assert!((stats.avg_word_length - 4.0).abs() < 1e-12);
        assert!((stats.complexity_score() - (0.5 + 2.0 / 25.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_whitespace_only_text_has_zero_stats() {
        let stats = TextStats::analyze("  \n\n  ");
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.sentence_count, 0);
        assert_eq!(stats.paragraph_count, 0);
        assert_eq!(stats.avg_sentence_length, 0.0);
        assert_eq!(stats.lexical_diversity, 0.0);
        assert_eq!(stats.complexity_score(), 0.0);
    }

    #[test]
    fn test_variance_helpers() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 4.0);
        assert_eq!(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
    }
}
