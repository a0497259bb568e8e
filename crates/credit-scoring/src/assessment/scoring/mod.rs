mod config;
mod policy;
mod rules;

pub use config::ScoringConfig;
pub use policy::max_monthly_commitment;
pub use rules::education_bonus;

use super::domain::{ApplicantRecord, DecisionResult};
use policy::decide_outcome;
use serde::{Deserialize, Serialize};

/// Stateless scorer applying the additive credit formula to a record.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, record: &ApplicantRecord) -> DecisionResult {
        self.score_with_breakdown(record).result
    }

    pub fn score_with_breakdown(&self, record: &ApplicantRecord) -> ScoreBreakdown {
        let (components, total_score) = rules::score_record(record, &self.config);
        let result = decide_outcome(total_score, record.annual_income, &self.config);

        ScoreBreakdown { result, components }
    }
}

/// Score with the default weights.
pub fn score(record: &ApplicantRecord) -> DecisionResult {
    ScoringEngine::default().score(record)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Age,
    Income,
    Education,
    WorkHistory,
    PropertyOwnership,
    CarOwnership,
    WorkPhone,
}

/// Discrete contribution to a score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub result: DecisionResult,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn points_for(&self, factor: ScoreFactor) -> f64 {
        self.components
            .iter()
            .filter(|component| component.factor == factor)
            .map(|component| component.points)
            .sum()
    }
}
