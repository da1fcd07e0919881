use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

use crate::error::MetricsError;
use crate::settings::Lexicon;

/// Case-insensitive matcher for a list of words or phrases.
///
/// Each phrase is bounded with `\b` on the sides that start or end with a
/// word character, so entries like `e.g.` still match before whitespace.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    regex: Option<Regex>,
}

impl PhraseMatcher {
    pub fn new(phrases: &[String]) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = phrases
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(bounded)
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }

        let regex = RegexBuilder::new(&format!("(?:{})", alternatives.join("|")))
            .case_insensitive(true)
            .build()?;
        Ok(Self { regex: Some(regex) })
    }

    pub fn count(&self, text: &str) -> usize {
        self.regex
            .as_ref()
            .map_or(0, |re| re.find_iter(text).count())
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

fn bounded(phrase: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut pattern = String::new();
    if phrase.starts_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(phrase));
    if phrase.ends_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// The configured word lists, compiled once per scorer.
#[derive(Debug, Clone)]
pub struct CompiledLexicon {
    pub transitions: PhraseMatcher,
    pub positive: PhraseMatcher,
    pub negative: PhraseMatcher,
    pub narrative: PhraseMatcher,
    pub examples: PhraseMatcher,
    pub stopwords: HashSet<String>,
    pub vague_words: HashSet<String>,
}

impl CompiledLexicon {
    pub fn compile(lexicon: &Lexicon) -> Result<Self, MetricsError> {
        let matcher = |list: &'static str, phrases: &[String]| {
            PhraseMatcher::new(phrases).map_err(|source| MetricsError::Lexicon { list, source })
        };

        Ok(Self {
            transitions: matcher("transition_words", &lexicon.transition_words)?,
            positive: matcher("positive_words", &lexicon.positive_words)?,
            negative: matcher("negative_words", &lexicon.negative_words)?,
            narrative: matcher("narrative_markers", &lexicon.narrative_markers)?,
            examples: matcher("example_phrases", &lexicon.example_phrases)?,
            stopwords: lowercase_set(&lexicon.stopwords),
            vague_words: lowercase_set(&lexicon.vague_words),
        })
    }
}

fn lowercase_set(list: &[String]) -> HashSet<String> {
    list.iter().map(|w| w.trim().to_lowercase()).collect()
}
