use super::config::ScoringConfig;
use crate::assessment::domain::DecisionResult;

pub(crate) fn decide_outcome(
    total_score: f64,
    annual_income: f64,
    config: &ScoringConfig,
) -> DecisionResult {
    DecisionResult {
        approved: total_score >= config.approval_threshold,
        score: total_score,
        max_monthly_commitment: max_monthly_commitment(annual_income, config),
    }
}

/// Share of monthly income an applicant can commit to repayments, independent of approval.
pub fn max_monthly_commitment(annual_income: f64, config: &ScoringConfig) -> f64 {
    (annual_income / 12.0) * config.affordability_ratio
}
