use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ClassifierError;
use crate::assessment::domain::ApplicantRecord;

/// Column order the classifier was trained on.
///
/// Loaded from the artifact, never recomputed: a reordered list yields silently
/// wrong predictions rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureOrder(Vec<String>);

impl FeatureOrder {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let raw = fs::read_to_string(path).map_err(|err| ClassifierError::ModelUnavailable {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        let order: FeatureOrder =
            serde_json::from_str(&raw).map_err(|err| ClassifierError::ModelUnavailable {
                path: path.display().to_string(),
                reason: format!("feature list is not a JSON array of names: {err}"),
            })?;
        if order.is_empty() {
            return Err(ClassifierError::ModelUnavailable {
                path: path.display().to_string(),
                reason: "feature list is empty".to_string(),
            });
        }
        Ok(order)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Record-level transformations the artifact expects before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preprocessing {
    /// Training data stored employment duration as a non-positive offset.
    pub negate_years_working: bool,
}

/// Encode a record into the numeric vector described by `order`.
///
/// A plain name reads the numeric (or 0/1 flag) field; `field=value` is a one-hot
/// indicator over a categorical field.
pub fn encode(
    record: &ApplicantRecord,
    order: &FeatureOrder,
    preprocessing: Preprocessing,
) -> Result<Vec<f64>, ClassifierError> {
    order
        .names()
        .iter()
        .map(|name| feature_value(record, name, preprocessing))
        .collect()
}

fn feature_value(
    record: &ApplicantRecord,
    name: &str,
    preprocessing: Preprocessing,
) -> Result<f64, ClassifierError> {
    if let Some((field, expected)) = name.split_once('=') {
        let actual = categorical_label(record, field.trim())
            .ok_or_else(|| ClassifierError::MissingFeature(name.to_string()))?;
        return Ok(if actual == expected.trim() { 1.0 } else { 0.0 });
    }

    let value = match name.trim() {
        "age" => f64::from(record.age),
        "annual_income" => record.annual_income,
        "years_working" => {
            let years = f64::from(record.years_working);
            if preprocessing.negate_years_working && years > 0.0 {
                -years
            } else {
                years
            }
        }
        "years_unemployed" => f64::from(record.years_unemployed),
        "family_size" => f64::from(record.family_size),
        "children_count" => f64::from(record.children_count),
        "own_car" => flag(record.own_car),
        "own_property" => flag(record.own_property),
        "own_workphone" => flag(record.own_workphone),
        "own_phone" => flag(record.own_phone),
        "own_email" => flag(record.own_email),
        _ => return Err(ClassifierError::MissingFeature(name.to_string())),
    };

    Ok(value)
}

fn categorical_label<'a>(record: &'a ApplicantRecord, field: &str) -> Option<&'a str> {
    match field {
        "education_type" => Some(record.education_type.label()),
        "marital_status" => Some(record.marital_status.label()),
        "occupation_type" => record.occupation_type.as_ref().map(|value| value.as_str()),
        "income_type" => record.income_type.as_ref().map(|value| value.as_str()),
        "housing_type" => record.housing_type.as_ref().map(|value| value.as_str()),
        _ => None,
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
