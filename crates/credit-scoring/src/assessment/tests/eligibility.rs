use super::common::*;
use crate::assessment::eligibility::{validate, EligibilityRules, EligibilityViolation};

#[test]
fn accepts_consistent_applicants() {
    assert_eq!(validate(&doctorate_applicant()), Ok(()));
    assert_eq!(validate(&modest_applicant()), Ok(()));
}

#[test]
fn rejects_simultaneous_employment_and_unemployment() {
    for (working, unemployed) in [(1, 1), (5, 2), (40, 50)] {
        let mut record = doctorate_applicant();
        record.years_working = working;
        record.years_unemployed = unemployed;

        match validate(&record) {
            Err(violation @ EligibilityViolation::EmploymentConflict { .. }) => {
                assert_eq!(
                    violation.to_string(),
                    "employment/unemployment data incompatible"
                );
            }
            other => panic!("expected employment conflict, got {other:?}"),
        }
    }
}

#[test]
fn rejects_more_children_than_family_members() {
    let mut record = doctorate_applicant();
    record.family_size = 2;
    record.children_count = 3;

    let violation = validate(&record).expect_err("household inconsistent");
    assert_eq!(
        violation,
        EligibilityViolation::ChildrenExceedFamily {
            children_count: 3,
            family_size: 2,
        }
    );
    assert_eq!(
        violation.to_string(),
        "children count cannot exceed family size"
    );
}

#[test]
fn children_equal_to_family_size_is_allowed() {
    let mut record = doctorate_applicant();
    record.family_size = 2;
    record.children_count = 2;
    assert!(validate(&record).is_ok());
}

#[test]
fn rejects_minors_under_strict_rules() {
    for age in [0, 12, 17] {
        let mut record = modest_applicant();
        record.age = age;
        match validate(&record) {
            Err(EligibilityViolation::BelowMinimumAge { minimum_age, .. }) => {
                assert_eq!(minimum_age, 18);
            }
            other => panic!("expected minimum age violation, got {other:?}"),
        }
    }

    let mut adult = modest_applicant();
    adult.age = 18;
    assert!(validate(&adult).is_ok());
}

#[test]
fn first_failing_rule_is_reported() {
    let mut record = modest_applicant();
    record.age = 16;
    record.years_working = 2;
    record.years_unemployed = 3;
    record.family_size = 1;
    record.children_count = 4;

    assert!(matches!(
        validate(&record),
        Err(EligibilityViolation::EmploymentConflict { .. })
    ));

    record.years_working = 0;
    assert!(matches!(
        validate(&record),
        Err(EligibilityViolation::ChildrenExceedFamily { .. })
    ));

    record.children_count = 0;
    assert!(matches!(
        validate(&record),
        Err(EligibilityViolation::BelowMinimumAge { age: 16, .. })
    ));
}

#[test]
fn employment_only_rules_skip_household_and_age() {
    let rules = EligibilityRules::employment_only();
    let mut record = modest_applicant();
    record.age = 15;
    record.children_count = 4;

    assert!(rules.validate(&record).is_ok());

    record.years_working = 1;
    assert!(matches!(
        rules.validate(&record),
        Err(EligibilityViolation::EmploymentConflict { .. })
    ));
}

#[test]
fn validation_leaves_record_untouched() {
    let record = doctorate_applicant();
    let before = record.clone();
    let _ = validate(&record);
    assert_eq!(record, before);
}
