use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use strum::Display;

use super::lexicon::CompiledLexicon;
use super::score::{ratio, weighted_average};
use super::text::{variance, Sentence, TextStats};
use crate::settings::CreativityWeights;

static FIGURATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bis like\b|\bas \w+ as\b|\bmetaphor|\bsimilar to\b").unwrap()
});
static COMPOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),\s*(and|but|or|so|yet)\b|;").unwrap());
static SUBORDINATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(because|although|though|while|since|unless|whereas|if|when)\b").unwrap()
});

const VARIANCE_NORM: f64 = 25.0;
const UNCOMMON_WORD_CHARS: usize = 5;
const NARRATIVE_NORM: f64 = 3.0;
const LONG_SENTENCE_WORDS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SentenceKind {
    #[strum(serialize = "question")]
    Question,
    #[strum(serialize = "exclamation")]
    Exclamation,
    #[strum(serialize = "compound")]
    Compound,
    #[strum(serialize = "complex")]
    Complex,
    #[strum(serialize = "simple")]
    Simple,
}

impl SentenceKind {
    pub fn classify(sentence: &Sentence) -> Self {
        if sentence.terminator.contains('?') {
            Self::Question
        } else if sentence.terminator.contains('!') {
            Self::Exclamation
        } else if COMPOUND.is_match(sentence.text) {
            Self::Compound
        } else if SUBORDINATE.is_match(sentence.text) || sentence.len() > LONG_SENTENCE_WORDS {
            Self::Complex
        } else {
            Self::Simple
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CreativityBreakdown {
    pub metaphors: f64,
    pub sentence_variety: f64,
    pub uncommon_words: f64,
    pub narrative: f64,
}

pub fn creativity_breakdown(stats: &TextStats, lexicon: &CompiledLexicon) -> CreativityBreakdown {
    CreativityBreakdown {
        metaphors: metaphor_density(stats),
        sentence_variety: sentence_variety(stats),
        uncommon_words: uncommon_word_ratio(&stats.words, &lexicon.stopwords),
        narrative: narrative_density(stats.text, lexicon),
    }
}

pub fn creativity_score(
    stats: &TextStats,
    lexicon: &CompiledLexicon,
    weights: &CreativityWeights,
) -> f64 {
    let b = creativity_breakdown(stats, lexicon);
    weighted_average(&[
        (b.metaphors, weights.metaphors),
        (b.sentence_variety, weights.sentence_variety),
        (b.uncommon_words, weights.uncommon_words),
        (b.narrative, weights.narrative),
    ])
}

pub fn metaphor_density(stats: &TextStats) -> f64 {
    let hits = FIGURATIVE.find_iter(stats.text).count();
    ratio(hits as f64, stats.sentence_count as f64).min(1.0)
}

pub fn sentence_variety(stats: &TextStats) -> f64 {
    if stats.sentences.is_empty() {
        return 0.0;
    }

    let length_variety = (variance(&stats.sentence_lengths()) / VARIANCE_NORM).min(1.0);
    let kinds: HashSet<SentenceKind> = stats.sentences.iter().map(SentenceKind::classify).collect();
    let kind_variety = kinds.len() as f64 / stats.sentences.len() as f64;

    (length_variety + kind_variety) / 2.0
}

pub fn uncommon_word_ratio(words: &[String], stopwords: &HashSet<String>) -> f64 {
    let uncommon = words
        .iter()
        .filter(|w| w.chars().count() > UNCOMMON_WORD_CHARS && !stopwords.contains(w.as_str()))
        .count();
    (ratio(uncommon as f64, words.len() as f64) * 2.0).min(1.0)
}

pub fn narrative_density(text: &str, lexicon: &CompiledLexicon) -> f64 {
    (lexicon.narrative.count(text) as f64 / NARRATIVE_NORM).min(1.0)
}
