use serde::{Deserialize, Serialize};

/// Weights and thresholds of the additive credit score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub approval_threshold: f64,
    pub affordability_ratio: f64,
    pub age_ramp_start: u8,
    pub full_age: u8,
    pub age_points: f64,
    pub age_points_per_year: f64,
    pub income_ceiling: f64,
    pub income_points: f64,
    pub points_per_working_year: f64,
    pub work_history_cap: f64,
    pub property_points: f64,
    pub car_points: f64,
    pub workphone_points: f64,
    pub display_scale: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            approval_threshold: 300.0,
            affordability_ratio: 0.3,
            age_ramp_start: 18,
            full_age: 25,
            age_points: 100.0,
            age_points_per_year: 15.0,
            income_ceiling: 20_000.0,
            income_points: 150.0,
            points_per_working_year: 10.0,
            work_history_cap: 100.0,
            property_points: 50.0,
            car_points: 30.0,
            workphone_points: 20.0,
            display_scale: 600.0,
        }
    }
}
