use std::sync::Arc;

use tracing::{info, warn};

use super::classifier::{ClassifierEngine, ClassifierError, CreditVerdict};
use super::domain::ApplicantRecord;
use super::eligibility::{EligibilityRules, EligibilityViolation};
use super::journal::{DecisionJournal, JournalEntry, JournalError};
use super::scoring::{ScoreBreakdown, ScoringConfig, ScoringEngine};
use super::statistics::JournalStatistics;

/// Service composing the eligibility rules, scoring engine, classifier, and journal.
pub struct CreditAssessmentService<J> {
    rules: EligibilityRules,
    classifier_rules: EligibilityRules,
    engine: Arc<ScoringEngine>,
    classifier: Option<Arc<ClassifierEngine>>,
    journal: Arc<J>,
}

impl<J> CreditAssessmentService<J>
where
    J: DecisionJournal + 'static,
{
    pub fn new(journal: Arc<J>, config: ScoringConfig) -> Self {
        Self {
            rules: EligibilityRules::strict(),
            classifier_rules: EligibilityRules::employment_only(),
            engine: Arc::new(ScoringEngine::new(config)),
            classifier: None,
            journal,
        }
    }

    pub fn with_classifier(mut self, classifier: ClassifierEngine) -> Self {
        self.classifier = Some(Arc::new(classifier));
        self
    }

    pub fn with_rules(mut self, rules: EligibilityRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn scoring_config(&self) -> &ScoringConfig {
        self.engine.config()
    }

    /// Validate, score, and journal a submission.
    pub fn assess(
        &self,
        record: ApplicantRecord,
    ) -> Result<ScoreBreakdown, AssessmentServiceError> {
        let breakdown = self.preview(&record)?;

        self.journal
            .append(JournalEntry::new(record, breakdown.result))?;

        info!(
            approved = breakdown.result.approved,
            score = breakdown.result.score,
            "credit assessment recorded"
        );
        Ok(breakdown)
    }

    /// Validate and score without touching the journal.
    pub fn preview(
        &self,
        record: &ApplicantRecord,
    ) -> Result<ScoreBreakdown, AssessmentServiceError> {
        if let Err(violation) = self.rules.validate(record) {
            warn!(%violation, "credit assessment rejected");
            return Err(violation.into());
        }

        Ok(self.engine.score_with_breakdown(record))
    }

    /// Defer the decision to the configured classifier.
    pub fn classify(
        &self,
        record: &ApplicantRecord,
    ) -> Result<CreditVerdict, AssessmentServiceError> {
        let classifier = self
            .classifier
            .as_ref()
            .ok_or(AssessmentServiceError::ClassifierNotConfigured)?;

        if let Err(violation) = self.classifier_rules.validate(record) {
            warn!(%violation, "classifier request rejected");
            return Err(violation.into());
        }

        let verdict = classifier.decide(record)?;
        info!(verdict = verdict.label(), "classifier decision issued");
        Ok(verdict)
    }

    pub fn entries(&self) -> Result<Vec<JournalEntry>, AssessmentServiceError> {
        Ok(self.journal.load_all()?)
    }

    pub fn statistics(&self) -> Result<JournalStatistics, AssessmentServiceError> {
        let entries = self.journal.load_all()?;
        Ok(JournalStatistics::from_entries(&entries))
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Eligibility(#[from] EligibilityViolation),
    #[error(transparent)]
    Journal(#[from] JournalError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error("no classifier model is configured")]
    ClassifierNotConfigured,
}
