use std::io::Write;

use super::common::*;
use crate::assessment::classifier::{
    decide, encode, ClassifierEngine, ClassifierError, CreditVerdict, Estimator, FeatureOrder,
    ModelArtifact, Preprocessing, TreeNode,
};
use crate::assessment::domain::CategoryValue;

#[test]
fn encode_follows_feature_order() {
    let record = doctorate_applicant();
    let order = FeatureOrder::new(["family_size", "age", "own_property", "own_car"]);

    let vector = encode(
        &record,
        &order,
        Preprocessing {
            negate_years_working: false,
        },
    )
    .expect("features present");

    assert_eq!(vector, vec![3.0, 30.0, 1.0, 0.0]);
}

#[test]
fn encode_negates_years_working_without_touching_record() {
    let record = doctorate_applicant();
    let order = FeatureOrder::new(["years_working"]);

    let negated = encode(
        &record,
        &order,
        Preprocessing {
            negate_years_working: true,
        },
    )
    .expect("feature present");
    assert_eq!(negated, vec![-5.0]);
    assert_eq!(record.years_working, 5);

    let raw = encode(
        &record,
        &order,
        Preprocessing {
            negate_years_working: false,
        },
    )
    .expect("feature present");
    assert_eq!(raw, vec![5.0]);
}

#[test]
fn encode_one_hot_indicators() {
    let mut record = doctorate_applicant();
    record.housing_type = Some(CategoryValue::from("With parents"));
    let order = FeatureOrder::new([
        "education_type=Doutorado",
        "education_type=Mestrado",
        "marital_status=Casado",
        "housing_type=With parents",
    ]);

    let vector = encode(
        &record,
        &order,
        Preprocessing {
            negate_years_working: true,
        },
    )
    .expect("features present");
    assert_eq!(vector, vec![1.0, 0.0, 1.0, 1.0]);
}

#[test]
fn missing_categorical_answer_is_a_missing_feature() {
    let record = doctorate_applicant();
    let order = FeatureOrder::new(["age", "occupation_type=Laborers"]);

    match encode(
        &record,
        &order,
        Preprocessing {
            negate_years_working: true,
        },
    ) {
        Err(ClassifierError::MissingFeature(name)) => {
            assert_eq!(name, "occupation_type=Laborers")
        }
        other => panic!("expected missing feature, got {other:?}"),
    }
}

#[test]
fn unknown_feature_name_is_a_missing_feature() {
    let (model, _) = unemployment_model();
    let order = FeatureOrder::new(["years_unemployed", "credit_limit", "years_working"]);

    match decide(&doctorate_applicant(), &model, &order) {
        Err(ClassifierError::MissingFeature(name)) => assert_eq!(name, "credit_limit"),
        other => panic!("expected missing feature, got {other:?}"),
    }
}

#[test]
fn logistic_model_flags_long_unemployment() {
    let engine = classifier_engine();

    assert_eq!(
        engine.decide(&doctorate_applicant()).expect("decides"),
        CreditVerdict::Approved
    );

    let mut record = modest_applicant();
    record.years_unemployed = 3;
    let verdict = engine.decide(&record).expect("decides");
    assert_eq!(verdict, CreditVerdict::Denied);
    assert!(!verdict.approved());
}

#[test]
fn decision_tree_respects_positive_class() {
    let (model, order) = education_tree();

    assert_eq!(
        decide(&doctorate_applicant(), &model, &order).expect("decides"),
        CreditVerdict::Approved
    );
    assert_eq!(
        decide(&modest_applicant(), &model, &order).expect("decides"),
        CreditVerdict::Denied
    );
}

#[test]
fn engine_rejects_coefficient_count_mismatch() {
    let (model, _) = unemployment_model();
    let order = FeatureOrder::new(["years_unemployed", "own_car"]);

    match ClassifierEngine::new(model, order) {
        Err(ClassifierError::FeatureMismatch { expected, found }) => {
            assert_eq!((expected, found), (3, 2));
        }
        other => panic!("expected feature mismatch, got {other:?}"),
    }
}

#[test]
fn engine_rejects_cyclic_trees() {
    let model = ModelArtifact {
        positive_class: Default::default(),
        negate_years_working: true,
        estimator: Estimator::DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf { positive: true },
            ],
        },
    };

    assert!(matches!(
        ClassifierEngine::new(model, FeatureOrder::new(["age"])),
        Err(ClassifierError::InvalidArtifact(_))
    ));
}

#[test]
fn load_reads_json_artifacts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let model_path = dir.path().join("model.json");
    let features_path = dir.path().join("features.json");

    let mut model_file = std::fs::File::create(&model_path).expect("model file");
    write!(
        model_file,
        r#"{{"kind": "logistic", "intercept": -2.0, "coefficients": [1.5, 0.0, -0.2]}}"#
    )
    .expect("write model");
    let mut features_file = std::fs::File::create(&features_path).expect("features file");
    write!(
        features_file,
        r#"["years_unemployed", "own_car", "years_working"]"#
    )
    .expect("write features");

    let engine = ClassifierEngine::load(&model_path, &features_path).expect("artifacts load");
    assert_eq!(engine.features().len(), 3);

    let mut record = modest_applicant();
    record.years_unemployed = 4;
    assert_eq!(engine.decide(&record).expect("decides"), CreditVerdict::Denied);
}

#[test]
fn load_reports_unavailable_model() {
    let dir = tempfile::tempdir().expect("temp dir");
    let features_path = dir.path().join("features.json");
    std::fs::write(&features_path, r#"["age"]"#).expect("write features");

    match ClassifierEngine::load(&dir.path().join("model.json"), &features_path) {
        Err(ClassifierError::ModelUnavailable { path, .. }) => assert!(path.ends_with("model.json")),
        other => panic!("expected unavailable model, got {other:?}"),
    }
}

#[test]
fn load_reports_unparseable_model() {
    let dir = tempfile::tempdir().expect("temp dir");
    let model_path = dir.path().join("model.json");
    let features_path = dir.path().join("features.json");
    std::fs::write(&model_path, b"\x80\x04pickle").expect("write model");
    std::fs::write(&features_path, r#"["age"]"#).expect("write features");

    assert!(matches!(
        ClassifierEngine::load(&model_path, &features_path),
        Err(ClassifierError::ModelUnavailable { .. })
    ));
}
