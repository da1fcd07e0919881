use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use strum::Display;
use tracing::{debug, instrument};

use super::coherence::{coherence_breakdown, coherence_score, CoherenceBreakdown};
use super::completeness::completeness_score;
use super::creativity::{creativity_breakdown, creativity_score, CreativityBreakdown};
use super::length::length_appropriateness_score;
use super::lexicon::CompiledLexicon;
use super::readability::{readability_breakdown, readability_score, ReadabilityBreakdown};
use super::score::{clamp_unit, to_percent, weighted_average};
use super::specificity::{specificity_breakdown, specificity_score, SpecificityBreakdown};
use super::text::{sentiment_polarity, TextStats};
use crate::error::MetricsError;
use crate::settings::{settings, Settings, Weights};

static DEFAULT_SCORER: OnceLock<QualityScorer> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub coherence_score: f64,
    pub completeness_score: f64,
    pub readability_score: f64,
    pub length_appropriateness_score: f64,
    pub creativity_score: f64,
    pub specificity_score: f64,
    pub overall_score: f64,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub avg_sentence_length: f64,
    pub lexical_diversity: f64,
    pub sentiment_polarity: f64,
    pub complexity_score: f64,
}

/// Scores rescaled to `[0, 100]` with two decimals, for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorePercentages {
    pub coherence: f64,
    pub completeness: f64,
    pub readability: f64,
    pub length_appropriateness: f64,
    pub creativity: f64,
    pub specificity: f64,
    pub overall: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    #[strum(serialize = "EXCELLENT")]
    Excellent,
    #[strum(serialize = "GOOD")]
    Good,
    #[strum(serialize = "FAIR")]
    Fair,
    #[strum(serialize = "POOR")]
    Poor,
}

impl QualityTier {
    pub const EXCELLENT_THRESHOLD: f64 = 0.8;
    pub const GOOD_THRESHOLD: f64 = 0.6;
    pub const FAIR_THRESHOLD: f64 = 0.4;

    pub fn from_score(score: f64) -> Self {
        if score >= Self::EXCELLENT_THRESHOLD {
            QualityTier::Excellent
        } else if score >= Self::GOOD_THRESHOLD {
            QualityTier::Good
        } else if score >= Self::FAIR_THRESHOLD {
            QualityTier::Fair
        } else {
            QualityTier::Poor
        }
    }
}

impl MetricsResult {
    pub fn tier(&self) -> QualityTier {
        QualityTier::from_score(self.overall_score)
    }

    pub fn percentages(&self) -> ScorePercentages {
        ScorePercentages {
            coherence: to_percent(self.coherence_score),
            completeness: to_percent(self.completeness_score),
            readability: to_percent(self.readability_score),
            length_appropriateness: to_percent(self.length_appropriateness_score),
            creativity: to_percent(self.creativity_score),
            specificity: to_percent(self.specificity_score),
            overall: to_percent(self.overall_score),
        }
    }
}

/// Metrics plus the component values behind the blended sub-scores.
#[derive(Debug, Clone, Default)]
pub struct DetailedMetrics {
    pub metrics: MetricsResult,
    pub coherence: CoherenceBreakdown,
    pub readability: ReadabilityBreakdown,
    pub creativity: CreativityBreakdown,
    pub specificity: SpecificityBreakdown,
}

/// Heuristic text-quality scorer. Holds only read-only configuration, so one
/// instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct QualityScorer {
    weights: Weights,
    lexicon: CompiledLexicon,
}

impl QualityScorer {
    pub fn new(settings: &Settings) -> Result<Self, MetricsError> {
        Ok(Self {
            weights: settings.weights.clone(),
            lexicon: CompiledLexicon::compile(&settings.lexicon)?,
        })
    }

    #[instrument(skip_all, fields(chars = content.len(), has_prompt = original_prompt.is_some()))]
    pub fn calculate_metrics(
        &self,
        content: &str,
        original_prompt: Option<&str>,
    ) -> Result<MetricsResult, MetricsError> {
        validate(content)?;
        let stats = TextStats::analyze(content);
        Ok(self.score_stats(&stats, original_prompt))
    }

    pub fn detailed_metrics(
        &self,
        content: &str,
        original_prompt: Option<&str>,
    ) -> Result<DetailedMetrics, MetricsError> {
        validate(content)?;
        let stats = TextStats::analyze(content);

        Ok(DetailedMetrics {
            metrics: self.score_stats(&stats, original_prompt),
            coherence: coherence_breakdown(&stats, &self.lexicon),
            readability: readability_breakdown(&stats),
            creativity: creativity_breakdown(&stats, &self.lexicon),
            specificity: specificity_breakdown(&stats, &self.lexicon),
        })
    }

    fn score_stats(&self, stats: &TextStats, original_prompt: Option<&str>) -> MetricsResult {
        let prompt = original_prompt.map(TextStats::analyze);
        let prompt = prompt.as_ref();
        let w = &self.weights;

        let coherence_score = coherence_score(stats, &self.lexicon, &w.coherence);
        let completeness_score = completeness_score(stats, prompt, &w.completeness);
        let readability_score = readability_score(stats, &w.readability);
        let length_appropriateness_score = length_appropriateness_score(stats, prompt);
        let creativity_score = creativity_score(stats, &self.lexicon, &w.creativity);
        let specificity_score = specificity_score(stats, &self.lexicon, &w.specificity);

        let overall_score = weighted_average(&[
            (coherence_score, w.overall.coherence),
            (completeness_score, w.overall.completeness),
            (readability_score, w.overall.readability),
            (length_appropriateness_score, w.overall.length_appropriateness),
            (creativity_score, w.overall.creativity),
            (specificity_score, w.overall.specificity),
        ]);

        let metrics = MetricsResult {
            coherence_score: clamp_unit(coherence_score),
            completeness_score: clamp_unit(completeness_score),
            readability_score: clamp_unit(readability_score),
            length_appropriateness_score: clamp_unit(length_appropriateness_score),
            creativity_score: clamp_unit(creativity_score),
            specificity_score: clamp_unit(specificity_score),
            overall_score,
            word_count: stats.word_count,
            sentence_count: stats.sentence_count,
            paragraph_count: stats.paragraph_count,
            avg_sentence_length: stats.avg_sentence_length,
            lexical_diversity: clamp_unit(stats.lexical_diversity),
            sentiment_polarity: sentiment_polarity(stats.text, &self.lexicon),
            complexity_score: clamp_unit(stats.complexity_score()),
        };

        debug!(
            words = metrics.word_count,
            sentences = metrics.sentence_count,
            overall = metrics.overall_score,
            "scored text"
        );

        metrics
    }
}

fn validate(content: &str) -> Result<(), MetricsError> {
    if content.is_empty() {
        return Err(MetricsError::invalid_input("content must be a non-empty string"));
    }
    Ok(())
}

/// Scorer built from the loaded [`settings`].
pub fn default_scorer() -> Result<&'static QualityScorer, MetricsError> {
    if let Some(scorer) = DEFAULT_SCORER.get() {
        return Ok(scorer);
    }
    let scorer = QualityScorer::new(settings())?;
    Ok(DEFAULT_SCORER.get_or_init(|| scorer))
}

/// Scores `content` with the default scorer.
pub fn calculate_metrics(
    content: &str,
    original_prompt: Option<&str>,
) -> Result<MetricsResult, MetricsError> {
    default_scorer()?.calculate_metrics(content, original_prompt)
}
