use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::error::MetricsError;
use crate::scoring::{MetricsResult, QualityScorer};

/// Generation settings an experiment response was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperimentRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub parameters: Option<GenerationParameters>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<GenerationParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Mean of each score over the successfully scored records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreAverages {
    pub coherence: f64,
    pub completeness: f64,
    pub readability: f64,
    pub length_appropriateness: f64,
    pub creativity: f64,
    pub specificity: f64,
    pub overall: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSummary {
    pub parameters: GenerationParameters,
    pub responses: usize,
    pub mean_overall: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub averages: Option<ScoreAverages>,
    pub best_id: Option<String>,
    pub best_overall: Option<f64>,
    /// Ranked by mean overall score, best first.
    pub by_parameters: Vec<ParameterSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub scored_at: DateTime<Utc>,
    pub total: usize,
    pub failed: usize,
    pub records: Vec<ScoredRecord>,
    pub summary: BatchSummary,
}

/// Reads a JSON array of records, or one JSON record per line.
pub fn parse_records(input: &str) -> Result<Vec<ExperimentRecord>> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("invalid JSON array of records");
    }

    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("invalid record on line {}", i + 1))
        })
        .collect()
}

pub fn score_record(scorer: &QualityScorer, index: usize, record: ExperimentRecord) -> ScoredRecord {
    let id = record.id.unwrap_or_else(|| format!("#{}", index + 1));

    let result = match record.content.as_deref() {
        Some(content) => scorer.calculate_metrics(content, record.prompt.as_deref()),
        None => Err(MetricsError::invalid_input("content is missing")),
    };

    match result {
        Ok(metrics) => ScoredRecord {
            id,
            parameters: record.parameters,
            metrics: Some(metrics),
            error: None,
        },
        Err(e) => {
            warn!(record = %id, error = %e, "record not scored");
            ScoredRecord {
                id,
                parameters: record.parameters,
                metrics: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Scores every record on the blocking pool, at most `concurrency` at a
/// time. The output keeps the input order.
pub async fn score_batch(
    scorer: Arc<QualityScorer>,
    records: Vec<ExperimentRecord>,
    concurrency: usize,
) -> Result<Vec<ScoredRecord>> {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let permit = permits.clone().acquire_owned().await?;
        let scorer = scorer.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let scored = score_record(&scorer, index, record);
            drop(permit);
            scored
        }));
    }

    let mut scored = Vec::with_capacity(handles.len());
    for handle in handles {
        scored.push(handle.await.context("scoring task panicked")?);
    }

    debug!(records = scored.len(), "batch scored");
    Ok(scored)
}

impl BatchReport {
    pub fn new(records: Vec<ScoredRecord>) -> Self {
        let failed = records.iter().filter(|r| r.metrics.is_none()).count();
        Self {
            scored_at: Utc::now(),
            total: records.len(),
            failed,
            summary: BatchSummary::from_records(&records),
            records,
        }
    }
}

impl BatchSummary {
    pub fn from_records(records: &[ScoredRecord]) -> Self {
        let scored: Vec<(&ScoredRecord, &MetricsResult)> = records
            .iter()
            .filter_map(|r| r.metrics.as_ref().map(|m| (r, m)))
            .collect();

        if scored.is_empty() {
            return Self::default();
        }

        let n = scored.len() as f64;
        let mean = |f: fn(&MetricsResult) -> f64| scored.iter().map(|(_, m)| f(m)).sum::<f64>() / n;
        let averages = ScoreAverages {
            coherence: mean(|m| m.coherence_score),
            completeness: mean(|m| m.completeness_score),
            readability: mean(|m| m.readability_score),
            length_appropriateness: mean(|m| m.length_appropriateness_score),
            creativity: mean(|m| m.creativity_score),
            specificity: mean(|m| m.specificity_score),
            overall: mean(|m| m.overall_score),
        };

        let best = scored
            .iter()
            .max_by(|(_, a), (_, b)| a.overall_score.total_cmp(&b.overall_score));

        Self {
            averages: Some(averages),
            best_id: best.map(|(r, _)| r.id.clone()),
            best_overall: best.map(|(_, m)| m.overall_score),
            by_parameters: group_by_parameters(&scored),
        }
    }
}

fn group_by_parameters(scored: &[(&ScoredRecord, &MetricsResult)]) -> Vec<ParameterSummary> {
    let mut groups: Vec<(GenerationParameters, Vec<f64>)> = Vec::new();

    for (record, metrics) in scored {
        let Some(parameters) = record.parameters else {
            continue;
        };
        match groups.iter_mut().find(|(p, _)| *p == parameters) {
            Some((_, scores)) => scores.push(metrics.overall_score),
            None => groups.push((parameters, vec![metrics.overall_score])),
        }
    }

    let mut summaries: Vec<ParameterSummary> = groups
        .into_iter()
        .map(|(parameters, scores)| ParameterSummary {
            parameters,
            responses: scores.len(),
            mean_overall: scores.iter().sum::<f64>() / scores.len() as f64,
        })
        .collect();
    summaries.sort_by(|a, b| b.mean_overall.total_cmp(&a.mean_overall));
    summaries
}
