use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};
use crate::assessment::domain::{ApplicantRecord, EducationLevel};

/// Flat bonus per schooling level. Unrecognised labels earn nothing.
pub fn education_bonus(level: &EducationLevel) -> f64 {
    match level {
        EducationLevel::Doctorate => 100.0,
        EducationLevel::Masters => 90.0,
        EducationLevel::Postgraduate => 80.0,
        EducationLevel::CompleteHigher => 70.0,
        EducationLevel::IncompleteHigher => 50.0,
        EducationLevel::Secondary => 30.0,
        EducationLevel::Primary => 20.0,
        EducationLevel::Unknown(_) => 0.0,
    }
}

pub(crate) fn score_record(
    record: &ApplicantRecord,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, f64) {
    let mut components = Vec::with_capacity(7);

    // Below full_age the ramp is linear from age_ramp_start; it reaches 90 at 24
    // and would pass age_points just before full_age.
    if record.age >= config.full_age {
        components.push(ScoreComponent {
            factor: ScoreFactor::Age,
            points: config.age_points,
            notes: format!("age {} at or above {}", record.age, config.full_age),
        });
    } else {
        let points = (f64::from(record.age) - f64::from(config.age_ramp_start))
            * config.age_points_per_year;
        components.push(ScoreComponent {
            factor: ScoreFactor::Age,
            points,
            notes: format!("age {} on ramp from {}", record.age, config.age_ramp_start),
        });
    }

    let income_points = if record.annual_income > config.income_ceiling {
        config.income_points
    } else {
        (record.annual_income / config.income_ceiling) * config.income_points
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::Income,
        points: income_points,
        notes: format!(
            "annual income {:.2} against ceiling {:.2}",
            record.annual_income, config.income_ceiling
        ),
    });

    components.push(ScoreComponent {
        factor: ScoreFactor::Education,
        points: education_bonus(&record.education_type),
        notes: if record.education_type.is_known() {
            format!("education level {}", record.education_type.label())
        } else {
            format!(
                "unrecognised education level '{}'",
                record.education_type.label()
            )
        },
    });

    if record.years_working > 0 {
        let points = (f64::from(record.years_working) * config.points_per_working_year)
            .min(config.work_history_cap);
        components.push(ScoreComponent {
            factor: ScoreFactor::WorkHistory,
            points,
            notes: format!("{} year(s) employed", record.years_working),
        });
    }

    for (owned, factor, points, note) in [
        (
            record.own_property,
            ScoreFactor::PropertyOwnership,
            config.property_points,
            "owns property",
        ),
        (
            record.own_car,
            ScoreFactor::CarOwnership,
            config.car_points,
            "owns a car",
        ),
        (
            record.own_workphone,
            ScoreFactor::WorkPhone,
            config.workphone_points,
            "has a work phone",
        ),
    ] {
        if owned {
            components.push(ScoreComponent {
                factor,
                points,
                notes: note.to_string(),
            });
        }
    }

    let total_score = components.iter().map(|component| component.points).sum();

    (components, total_score)
}
