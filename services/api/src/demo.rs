use crate::commands::{render_breakdown, render_statistics};
use crate::infra::InMemoryJournal;
use clap::Args;
use credit_scoring::assessment::classifier::{Estimator, PositiveClass};
use credit_scoring::assessment::{
    ApplicantRecord, AssessmentServiceError, ClassifierEngine, CreditAssessmentService,
    DecisionJournal, FeatureOrder, JsonFileJournal, ModelArtifact, ScoringConfig,
};
use credit_scoring::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Journal the demo evaluations to this file instead of keeping them in memory
    #[arg(long)]
    pub(crate) journal: Option<PathBuf>,
    /// Skip the classifier portion of the demo
    #[arg(long)]
    pub(crate) skip_classifier: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        journal,
        skip_classifier,
    } = args;

    match journal {
        Some(path) => {
            println!("Credit assessment demo (journal: {})", path.display());
            let journal = Arc::new(JsonFileJournal::open(path));
            run_with_journal(journal, skip_classifier)
        }
        None => {
            println!("Credit assessment demo (in-memory journal)");
            run_with_journal(Arc::new(InMemoryJournal::default()), skip_classifier)
        }
    }
}

fn run_with_journal<J>(journal: Arc<J>, skip_classifier: bool) -> Result<(), AppError>
where
    J: DecisionJournal + 'static,
{
    let config = ScoringConfig::default();
    let service =
        CreditAssessmentService::new(journal, config.clone()).with_classifier(demo_classifier()?);

    for (label, record) in sample_applicants()? {
        println!("\n{label}");
        match service.assess(record) {
            Ok(breakdown) => render_breakdown(&breakdown, &config),
            Err(AssessmentServiceError::Eligibility(violation)) => {
                println!("warning: {violation}");
            }
            Err(other) => return Err(other.into()),
        }
    }

    println!();
    render_statistics(&service.statistics()?);

    if !skip_classifier {
        println!("\nClassifier decisions (sample logistic artifact)");
        for (label, record) in sample_applicants()? {
            match service.classify(&record) {
                Ok(verdict) => println!("- {label}: {}", verdict.label()),
                Err(AssessmentServiceError::Eligibility(violation)) => {
                    println!("- {label}: warning: {violation}");
                }
                Err(other) => return Err(other.into()),
            }
        }
    }

    Ok(())
}

/// Logistic artifact that denies applicants with long unemployment spells.
fn demo_classifier() -> Result<ClassifierEngine, AppError> {
    let model = ModelArtifact {
        positive_class: PositiveClass::Denied,
        negate_years_working: true,
        estimator: Estimator::Logistic {
            intercept: -1.5,
            coefficients: vec![1.2, 0.15, -0.00004],
            threshold: 0.5,
        },
    };
    let features = FeatureOrder::new(["years_unemployed", "years_working", "annual_income"]);
    Ok(ClassifierEngine::new(model, features)?)
}

fn sample_applicants() -> Result<Vec<(&'static str, ApplicantRecord)>, AppError> {
    Ok(vec![
        (
            "Established professional",
            ApplicantRecord::builder()
                .name("Helena Prado")
                .age(38)
                .education("Doutorado")
                .marital_status("Casado")
                .annual_income(54_000.0)
                .years_working(11)
                .years_unemployed(0)
                .family_size(3)
                .children_count(1)
                .own_property(true)
                .own_car(true)
                .build()?,
        ),
        (
            "Early career",
            ApplicantRecord::builder()
                .name("Rui Tavares")
                .age(22)
                .education("Superior Incompleto")
                .marital_status("Solteiro")
                .monthly_income(1_100.0)
                .years_working(1)
                .years_unemployed(0)
                .family_size(1)
                .children_count(0)
                .own_workphone(true)
                .build()?,
        ),
        (
            "Returning to work",
            ApplicantRecord::builder()
                .name("Lúcia Ferraz")
                .age(45)
                .education("Ensino Médio")
                .marital_status("Divorciado")
                .annual_income(9_000.0)
                .years_working(0)
                .years_unemployed(3)
                .family_size(2)
                .children_count(1)
                .build()?,
        ),
        (
            "Conflicting employment answers",
            ApplicantRecord::builder()
                .name("Tiago Reis")
                .age(30)
                .education("Mestrado")
                .marital_status("União Estável")
                .annual_income(30_000.0)
                .years_working(4)
                .years_unemployed(2)
                .family_size(2)
                .children_count(0)
                .build()?,
        ),
    ])
}
