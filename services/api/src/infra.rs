use credit_scoring::assessment::{
    ApplicantRecord, CategoryCatalog, ClassifierEngine, CreditAssessmentService, DecisionJournal,
    JournalEntry, JournalError, JsonFileJournal,
};
use credit_scoring::config::AssessmentConfig;
use credit_scoring::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<CategoryCatalog>,
}

/// Journal kept in memory for demo runs.
#[derive(Default, Clone)]
pub(crate) struct InMemoryJournal {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl DecisionJournal for InMemoryJournal {
    fn append(&self, entry: JournalEntry) -> Result<(), JournalError> {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        guard.push(entry);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<JournalEntry>, JournalError> {
        let guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }
}

/// Wire the file journal and, when both artifacts are configured, the classifier.
pub(crate) fn build_service(
    config: &AssessmentConfig,
) -> Result<CreditAssessmentService<JsonFileJournal>, AppError> {
    let journal = Arc::new(JsonFileJournal::open(&config.journal_path));
    let service = CreditAssessmentService::new(journal, config.scoring_config());

    match &config.classifier {
        Some(paths) => {
            let classifier = ClassifierEngine::load(&paths.model, &paths.features)?;
            info!(
                model = %paths.model.display(),
                features = classifier.features().len(),
                "classifier artifacts loaded"
            );
            Ok(service.with_classifier(classifier))
        }
        None => Ok(service),
    }
}

pub(crate) fn load_catalog(config: &AssessmentConfig) -> Result<CategoryCatalog, AppError> {
    match &config.categories_path {
        Some(path) => Ok(CategoryCatalog::load(path)?),
        None => Ok(CategoryCatalog::builtin()),
    }
}

/// Read one applicant submission from a JSON file.
pub(crate) fn read_applicant(path: &Path) -> Result<ApplicantRecord, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
