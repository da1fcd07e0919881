use regex::Regex;
use std::sync::LazyLock;

use super::score::{ratio, weighted_average};
use super::text::TextStats;
use crate::settings::ReadabilityWeights;

static COMPLEX_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(tion|sion|ment|ness|able|ible)$").unwrap());

const LONG_WORD_CHARS: usize = 6;
const NO_PARAGRAPHS: f64 = 0.1;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReadabilityBreakdown {
    pub sentence_length: f64,
    pub lexical_diversity: f64,
    pub paragraph_structure: f64,
    pub word_complexity: f64,
}

pub fn readability_breakdown(stats: &TextStats) -> ReadabilityBreakdown {
    ReadabilityBreakdown {
        sentence_length: sentence_length_score(stats.avg_sentence_length),
        lexical_diversity: (stats.lexical_diversity * 2.0).min(1.0),
        paragraph_structure: paragraph_structure_score(stats.word_count, stats.paragraph_count),
        word_complexity: word_complexity_score(&stats.words),
    }
}

pub fn readability_score(stats: &TextStats, weights: &ReadabilityWeights) -> f64 {
    let b = readability_breakdown(stats);
    weighted_average(&[
        (b.sentence_length, weights.sentence_length),
        (b.lexical_diversity, weights.lexical_diversity),
        (b.paragraph_structure, weights.paragraph_structure),
        (b.word_complexity, weights.word_complexity),
    ])
}

pub fn sentence_length_score(avg_sentence_length: f64) -> f64 {
    match avg_sentence_length {
        l if (15.0..=20.0).contains(&l) => 1.0,
        l if (10.0..=25.0).contains(&l) => 0.8,
        l if (5.0..=30.0).contains(&l) => 0.6,
        _ => 0.4,
    }
}

pub fn paragraph_structure_score(word_count: usize, paragraph_count: usize) -> f64 {
    if paragraph_count == 0 {
        return NO_PARAGRAPHS;
    }
    match word_count as f64 / paragraph_count as f64 {
        w if (50.0..=150.0).contains(&w) => 1.0,
        w if (30.0..=200.0).contains(&w) => 0.8,
        _ => 0.6,
    }
}

pub fn is_complex_word(word: &str) -> bool {
    word.chars().count() > LONG_WORD_CHARS || COMPLEX_SUFFIX.is_match(word)
}

pub fn word_complexity_score(words: &[String]) -> f64 {
    let complex = words.iter().filter(|w| is_complex_word(w)).count();
    match ratio(complex as f64, words.len() as f64) {
        r if (0.1..=0.3).contains(&r) => 1.0,
        r if (0.05..=0.4).contains(&r) => 0.8,
        _ => 0.6,
    }
}
