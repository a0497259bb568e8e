use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::classifier::{
    ClassifierEngine, Estimator, FeatureOrder, ModelArtifact, PositiveClass, TreeNode,
};
use crate::assessment::domain::ApplicantRecord;
use crate::assessment::journal::{DecisionJournal, JournalEntry, JournalError};
use crate::assessment::{assessment_router, CreditAssessmentService, ScoringConfig};

/// Applicant from the worked example: 30 years old, 25k income, doctorate,
/// five years employed, owns property only.
pub(super) fn doctorate_applicant() -> ApplicantRecord {
    ApplicantRecord::builder()
        .name("Ana Bento")
        .age(30)
        .education("Doutorado")
        .marital_status("Casado")
        .annual_income(25_000.0)
        .years_working(5)
        .years_unemployed(0)
        .family_size(3)
        .children_count(1)
        .own_property(true)
        .build()
        .expect("complete applicant")
}

pub(super) fn modest_applicant() -> ApplicantRecord {
    ApplicantRecord::builder()
        .name("Carlos Mbala")
        .age(19)
        .education("Ensino Médio")
        .marital_status("Solteiro")
        .annual_income(6_000.0)
        .years_working(0)
        .years_unemployed(1)
        .family_size(1)
        .children_count(0)
        .build()
        .expect("complete applicant")
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

/// Logistic model over three columns that flags long unemployment as a denial.
pub(super) fn unemployment_model() -> (ModelArtifact, FeatureOrder) {
    let model = ModelArtifact {
        positive_class: PositiveClass::Denied,
        negate_years_working: true,
        estimator: Estimator::Logistic {
            intercept: -2.0,
            coefficients: vec![1.5, 0.0, -0.2],
            threshold: 0.5,
        },
    };
    let order = FeatureOrder::new(["years_unemployed", "own_car", "years_working"]);
    (model, order)
}

/// Tree approving doctorates and denying everybody else.
pub(super) fn education_tree() -> (ModelArtifact, FeatureOrder) {
    let model = ModelArtifact {
        positive_class: PositiveClass::Approved,
        negate_years_working: true,
        estimator: Estimator::DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 1,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { positive: false },
                TreeNode::Leaf { positive: true },
            ],
        },
    };
    let order = FeatureOrder::new(["age", "education_type=Doutorado"]);
    (model, order)
}

pub(super) fn classifier_engine() -> ClassifierEngine {
    let (model, order) = unemployment_model();
    ClassifierEngine::new(model, order).expect("model matches features")
}

pub(super) fn build_service() -> (CreditAssessmentService<MemoryJournal>, Arc<MemoryJournal>) {
    let journal = Arc::new(MemoryJournal::default());
    let service = CreditAssessmentService::new(journal.clone(), scoring_config());
    (service, journal)
}

#[derive(Default, Clone)]
pub(super) struct MemoryJournal {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl MemoryJournal {
    pub(super) fn entries(&self) -> Vec<JournalEntry> {
        self.entries.lock().expect("journal mutex poisoned").clone()
    }
}

impl DecisionJournal for MemoryJournal {
    fn append(&self, entry: JournalEntry) -> Result<(), JournalError> {
        self.entries
            .lock()
            .expect("journal mutex poisoned")
            .push(entry);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<JournalEntry>, JournalError> {
        Ok(self.entries())
    }
}

pub(super) struct UnavailableJournal;

impl DecisionJournal for UnavailableJournal {
    fn append(&self, _entry: JournalEntry) -> Result<(), JournalError> {
        Err(JournalError::Io {
            path: "credit_requests.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read only"),
        })
    }

    fn load_all(&self) -> Result<Vec<JournalEntry>, JournalError> {
        Err(JournalError::Io {
            path: "credit_requests.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read only"),
        })
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: CreditAssessmentService<MemoryJournal>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}
