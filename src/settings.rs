use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::warn;

static SETTINGS: OnceLock<Settings> = OnceLock::new();

pub const SETTINGS_ENV: &str = "QUALITY_METRICS_SETTINGS";
const DEFAULT_PATH: &str = "metrics.default.ron";
const OVERRIDE_PATH: &str = "metrics.ron";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub weights: Weights,
    pub lexicon: Lexicon,
    pub batch: Batch,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub overall: OverallWeights,
    pub coherence: CoherenceWeights,
    pub completeness: CompletenessWeights,
    pub readability: ReadabilityWeights,
    pub creativity: CreativityWeights,
    pub specificity: SpecificityWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallWeights {
    pub coherence: f64,
    pub completeness: f64,
    pub readability: f64,
    pub length_appropriateness: f64,
    pub creativity: f64,
    pub specificity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoherenceWeights {
    pub transitions: f64,
    pub pronouns: f64,
    pub topic: f64,
    pub structure: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletenessWeights {
    pub key_terms: f64,
    pub depth: f64,
    pub structure: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityWeights {
    pub sentence_length: f64,
    pub lexical_diversity: f64,
    pub paragraph_structure: f64,
    pub word_complexity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreativityWeights {
    pub metaphors: f64,
    pub sentence_variety: f64,
    pub uncommon_words: f64,
    pub narrative: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecificityWeights {
    pub numeric: f64,
    pub terms: f64,
    pub examples: f64,
}

/// Word and phrase lists the heuristics match against. Matching is
/// case-insensitive and bounded on whole words.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub transition_words: Vec<String>,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub stopwords: Vec<String>,
    pub vague_words: Vec<String>,
    pub narrative_markers: Vec<String>,
    pub example_phrases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Batch {
    pub concurrency: usize,
}

impl Default for OverallWeights {
    fn default() -> Self {
        Self {
            coherence: 0.25,
            completeness: 0.25,
            readability: 0.20,
            length_appropriateness: 0.10,
            creativity: 0.10,
            specificity: 0.10,
        }
    }
}

impl Default for CoherenceWeights {
    fn default() -> Self {
        Self {
            transitions: 0.3,
            pronouns: 0.2,
            topic: 0.3,
            structure: 0.2,
        }
    }
}

impl Default for CompletenessWeights {
    fn default() -> Self {
        Self {
            key_terms: 0.4,
            depth: 0.3,
            structure: 0.3,
        }
    }
}

impl Default for ReadabilityWeights {
    fn default() -> Self {
        Self {
            sentence_length: 0.3,
            lexical_diversity: 0.2,
            paragraph_structure: 0.2,
            word_complexity: 0.3,
        }
    }
}

impl Default for CreativityWeights {
    fn default() -> Self {
        Self {
            metaphors: 0.3,
            sentence_variety: 0.25,
            uncommon_words: 0.25,
            narrative: 0.2,
        }
    }
}

impl Default for SpecificityWeights {
    fn default() -> Self {
        Self {
            numeric: 0.3,
            terms: 0.4,
            examples: 0.3,
        }
    }
}

impl Default for Batch {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            transition_words: words(&[
                "however",
                "therefore",
                "furthermore",
                "moreover",
                "consequently",
                "additionally",
                "meanwhile",
                "nevertheless",
                "thus",
                "hence",
                "for example",
                "for instance",
                "in addition",
                "on the other hand",
                "as a result",
                "in conclusion",
            ]),
            positive_words: words(&[
                "good",
                "great",
                "excellent",
                "amazing",
                "wonderful",
                "fantastic",
                "positive",
                "beneficial",
                "helpful",
                "useful",
                "effective",
                "successful",
                "happy",
                "love",
                "best",
            ]),
            negative_words: words(&[
                "bad",
                "terrible",
                "awful",
                "horrible",
                "poor",
                "negative",
                "harmful",
                "useless",
                "ineffective",
                "failed",
                "failure",
                "sad",
                "hate",
                "worst",
                "problem",
            ]),
            stopwords: words(&[
                "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
                "by", "from", "is", "are", "was", "were", "be", "been", "being", "have", "has",
                "had", "do", "does", "did", "will", "would", "could", "should", "may", "might",
                "this", "that", "these", "those", "it", "its",
            ]),
            vague_words: words(&[
                "thing",
                "things",
                "stuff",
                "something",
                "anything",
                "everything",
                "somehow",
                "somewhat",
                "whatever",
                "various",
                "several",
                "basically",
                "generally",
                "certain",
                "probably",
                "maybe",
                "really",
                "very",
                "kind",
                "sort",
            ]),
            narrative_markers: words(&[
                "once upon a time",
                "suddenly",
                "meanwhile",
                "in the end",
                "first",
                "then",
                "finally",
            ]),
            example_phrases: words(&[
                "for example",
                "for instance",
                "such as",
                "including",
                "namely",
                "e.g.",
            ]),
        }
    }
}

impl Settings {
    pub fn load() -> &'static Settings {
        SETTINGS.get_or_init(Self::load_from_files)
    }

    fn load_from_files() -> Settings {
        let explicit = std::env::var(SETTINGS_ENV).ok().map(PathBuf::from);
        Self::load_layers(&Self::candidate_paths(Path::new("."), explicit))
    }

    /// Later layers replace earlier ones; missing or unreadable files keep
    /// whatever was loaded before them.
    fn load_layers(paths: &[PathBuf]) -> Settings {
        let mut settings = Settings::default();

        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::read(path) {
                Ok(loaded) => settings = loaded,
                Err(e) => warn!(path = %path.display(), error = %e, "ignoring unreadable settings"),
            }
        }

        settings
    }

    fn candidate_paths(dir: &Path, explicit: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = vec![dir.join(DEFAULT_PATH), dir.join(OVERRIDE_PATH)];
        paths.extend(explicit);
        paths
    }

    pub fn read(path: &Path) -> anyhow::Result<Settings> {
        let content = fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> anyhow::Result<Settings> {
        Ok(ron::from_str(content)?)
    }
}

pub fn settings() -> &'static Settings {
    Settings::load()
}
