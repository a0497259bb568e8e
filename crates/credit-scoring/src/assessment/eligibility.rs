use super::domain::ApplicantRecord;

pub const MINIMUM_CREDIT_AGE: u8 = 18;

/// Reasons a record is turned away before any scoring happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityViolation {
    #[error("employment/unemployment data incompatible")]
    EmploymentConflict {
        years_working: u32,
        years_unemployed: u32,
    },
    #[error("children count cannot exceed family size")]
    ChildrenExceedFamily { children_count: u32, family_size: u32 },
    #[error("minimum age for credit analysis is {minimum_age}")]
    BelowMinimumAge { age: u8, minimum_age: u8 },
}

/// Which eligibility rules a form enforces.
///
/// Rules always run in the same order (employment, household, age) and the first
/// failure is the one reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityRules {
    pub check_household: bool,
    pub minimum_age: Option<u8>,
}

impl EligibilityRules {
    pub const fn strict() -> Self {
        Self {
            check_household: true,
            minimum_age: Some(MINIMUM_CREDIT_AGE),
        }
    }

    /// Rule set of the classifier form, which only cross-checks employment answers.
    pub const fn employment_only() -> Self {
        Self {
            check_household: false,
            minimum_age: None,
        }
    }

    pub fn validate(&self, record: &ApplicantRecord) -> Result<(), EligibilityViolation> {
        if record.years_working != 0 && record.years_unemployed != 0 {
            return Err(EligibilityViolation::EmploymentConflict {
                years_working: record.years_working,
                years_unemployed: record.years_unemployed,
            });
        }

        if self.check_household && record.children_count > record.family_size {
            return Err(EligibilityViolation::ChildrenExceedFamily {
                children_count: record.children_count,
                family_size: record.family_size,
            });
        }

        if let Some(minimum_age) = self.minimum_age {
            if record.age < minimum_age {
                return Err(EligibilityViolation::BelowMinimumAge {
                    age: record.age,
                    minimum_age,
                });
            }
        }

        Ok(())
    }
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self::strict()
    }
}

/// Validate against the strict rule set.
pub fn validate(record: &ApplicantRecord) -> Result<(), EligibilityViolation> {
    EligibilityRules::strict().validate(record)
}
