//! Credit application intake, eligibility, and decisioning.
//!
//! A submission becomes an immutable [`ApplicantRecord`], passes the eligibility
//! rules, and is then decided either by the additive scoring engine (journaled)
//! or by a pre-trained classifier loaded from disk.

pub mod catalog;
pub mod classifier;
pub mod domain;
pub mod eligibility;
pub mod intake;
pub mod journal;
pub mod router;
pub mod scoring;
pub mod service;
pub mod statistics;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CategoryCatalog};
pub use classifier::{
    ClassifierEngine, ClassifierError, CreditVerdict, FeatureOrder, ModelArtifact,
};
pub use domain::{
    ApplicantRecord, CategoryValue, DecisionResult, EducationLevel, MaritalStatus,
};
pub use eligibility::{EligibilityRules, EligibilityViolation};
pub use intake::{ApplicantRecordBuilder, IntakeError};
pub use journal::{DecisionJournal, JournalEntry, JournalError, JsonFileJournal};
pub use router::{assessment_router, AssessmentView, VerdictView};
pub use scoring::{ScoreBreakdown, ScoreComponent, ScoreFactor, ScoringConfig, ScoringEngine};
pub use service::{AssessmentServiceError, CreditAssessmentService};
pub use statistics::JournalStatistics;
