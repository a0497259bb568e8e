//! Decisions delegated to a pre-trained classifier.
//!
//! The artifact pair (estimator plus feature order) is loaded once and shared.
//! Missing features and unreadable artifacts are fatal to the request.

mod features;
mod model;

pub use features::{encode, FeatureOrder, Preprocessing};
pub use model::{Estimator, ModelArtifact, PositiveClass, TreeNode};

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::ApplicantRecord;

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("feature `{0}` is not available on the applicant record")]
    MissingFeature(String),
    #[error("model artifact unavailable at {path}: {reason}")]
    ModelUnavailable { path: String, reason: String },
    #[error("model expects {expected} feature(s) but {found} were provided")]
    FeatureMismatch { expected: usize, found: usize },
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditVerdict {
    Approved,
    Denied,
}

impl CreditVerdict {
    pub fn approved(self) -> bool {
        matches!(self, CreditVerdict::Approved)
    }

    pub const fn label(self) -> &'static str {
        match self {
            CreditVerdict::Approved => "approved",
            CreditVerdict::Denied => "denied",
        }
    }
}

/// Run one inference for `record`.
pub fn decide(
    record: &ApplicantRecord,
    model: &ModelArtifact,
    feature_order: &FeatureOrder,
) -> Result<CreditVerdict, ClassifierError> {
    let features = encode(record, feature_order, model.preprocessing())?;
    let positive = model.predict(&features)?;

    let verdict = match (model.positive_class, positive) {
        (PositiveClass::Denied, true) | (PositiveClass::Approved, false) => CreditVerdict::Denied,
        (PositiveClass::Denied, false) | (PositiveClass::Approved, true) => {
            CreditVerdict::Approved
        }
    };
    Ok(verdict)
}

/// Loaded model plus its feature order, validated against each other.
#[derive(Debug, Clone)]
pub struct ClassifierEngine {
    model: ModelArtifact,
    features: FeatureOrder,
}

impl ClassifierEngine {
    pub fn new(model: ModelArtifact, features: FeatureOrder) -> Result<Self, ClassifierError> {
        model.check_compatible(features.len())?;
        Ok(Self { model, features })
    }

    pub fn load(model_path: &Path, features_path: &Path) -> Result<Self, ClassifierError> {
        let model = ModelArtifact::load(model_path)?;
        let features = FeatureOrder::load(features_path)?;
        Self::new(model, features)
    }

    pub fn features(&self) -> &FeatureOrder {
        &self.features
    }

    pub fn decide(&self, record: &ApplicantRecord) -> Result<CreditVerdict, ClassifierError> {
        decide(record, &self.model, &self.features)
    }
}
