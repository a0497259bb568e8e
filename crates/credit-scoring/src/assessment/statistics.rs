use std::collections::HashMap;

use serde::Serialize;

use super::journal::JournalEntry;

const SCORE_BAND_WIDTH: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBand {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Aggregates over every journaled evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalStatistics {
    pub total: usize,
    pub approved: usize,
    /// Percentage of approved entries, 0 when the journal is empty.
    pub approval_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    pub education_distribution: Vec<DistributionEntry>,
    pub marital_distribution: Vec<DistributionEntry>,
    pub score_bands: Vec<ScoreBand>,
    pub scores: Vec<f64>,
}

impl JournalStatistics {
    pub fn from_entries(entries: &[JournalEntry]) -> Self {
        let total = entries.len();
        let approved = entries
            .iter()
            .filter(|entry| entry.decision.approved)
            .count();

        let approval_rate = if total == 0 {
            0.0
        } else {
            approved as f64 / total as f64 * 100.0
        };

        let scores: Vec<f64> = entries.iter().map(|entry| entry.decision.score).collect();
        let average_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        let education_distribution = value_counts(
            entries
                .iter()
                .map(|entry| entry.applicant.education_type.label()),
        );
        let marital_distribution = value_counts(
            entries
                .iter()
                .map(|entry| entry.applicant.marital_status.label()),
        );

        Self {
            total,
            approved,
            approval_rate,
            average_score,
            education_distribution,
            marital_distribution,
            score_bands: score_bands(&scores),
            scores,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Counts per label, most frequent first, ties broken alphabetically.
fn value_counts<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<DistributionEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut distribution: Vec<DistributionEntry> = counts
        .into_iter()
        .map(|(label, count)| DistributionEntry {
            label: label.to_string(),
            count,
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    distribution
}

fn score_bands(scores: &[f64]) -> Vec<ScoreBand> {
    let mut buckets: HashMap<i64, usize> = HashMap::new();
    for score in scores {
        let bucket = (score.max(0.0) / SCORE_BAND_WIDTH).floor() as i64;
        *buckets.entry(bucket).or_default() += 1;
    }

    let mut bands: Vec<ScoreBand> = buckets
        .into_iter()
        .map(|(bucket, count)| ScoreBand {
            lower: bucket as f64 * SCORE_BAND_WIDTH,
            upper: (bucket + 1) as f64 * SCORE_BAND_WIDTH,
            count,
        })
        .collect();
    bands.sort_by(|a, b| a.lower.total_cmp(&b.lower));
    bands
}
