use crate::infra::{build_service, read_applicant};
use clap::Args;
use credit_scoring::assessment::journal::export_csv;
use credit_scoring::assessment::{
    AssessmentServiceError, JournalStatistics, ScoreBreakdown, ScoringConfig,
};
use credit_scoring::config::AppConfig;
use credit_scoring::error::AppError;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding one applicant submission
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Score the submission without appending it to the journal
    #[arg(long)]
    pub(crate) no_journal: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// JSON file holding one applicant submission
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct StatsArgs {
    /// Write every journaled evaluation to this CSV file
    #[arg(long)]
    pub(crate) export_csv: Option<PathBuf>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config.assessment)?;
    let record = read_applicant(&args.input)?;

    let outcome = if args.no_journal {
        service.preview(&record)
    } else {
        service.assess(record)
    };

    match outcome {
        Ok(breakdown) => {
            render_breakdown(&breakdown, service.scoring_config());
            if !args.no_journal {
                println!(
                    "Recorded in {}",
                    config.assessment.journal_path.display()
                );
            }
            Ok(())
        }
        Err(AssessmentServiceError::Eligibility(violation)) => {
            eprintln!("warning: {violation}");
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config.assessment)?;
    let record = read_applicant(&args.input)?;

    match service.classify(&record) {
        Ok(verdict) => {
            println!("Classifier verdict: {}", verdict.label());
            Ok(())
        }
        Err(AssessmentServiceError::Eligibility(violation)) => {
            eprintln!("warning: {violation}");
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config.assessment)?;

    let statistics = service.statistics()?;
    render_statistics(&statistics);

    if let Some(path) = args.export_csv {
        let entries = service.entries()?;
        let writer = BufWriter::new(File::create(&path)?);
        export_csv(&entries, writer)?;
        println!("\nExported {} row(s) to {}", entries.len(), path.display());
    }

    Ok(())
}

pub(crate) fn render_breakdown(breakdown: &ScoreBreakdown, config: &ScoringConfig) {
    let result = &breakdown.result;
    let outcome = if result.approved { "APPROVED" } else { "DENIED" };

    println!("Credit {outcome}");
    println!(
        "- Score: {:.0}/{:.0} (threshold {:.0})",
        result.score, config.display_scale, config.approval_threshold
    );
    println!(
        "- Maximum monthly commitment: {:.2}",
        result.max_monthly_commitment
    );
    println!("Score components:");
    for component in &breakdown.components {
        println!("  - {:+.1} {}", component.points, component.notes);
    }
}

pub(crate) fn render_statistics(statistics: &JournalStatistics) {
    println!("Credit request statistics");
    if statistics.is_empty() {
        println!("- No evaluations journaled yet");
        return;
    }

    println!(
        "- {} evaluation(s) | {} approved | {:.1}% approval rate",
        statistics.total, statistics.approved, statistics.approval_rate
    );
    if let Some(average) = statistics.average_score {
        println!("- Average score: {average:.1}");
    }

    println!("Education distribution:");
    for entry in &statistics.education_distribution {
        println!("  - {}: {}", entry.label, entry.count);
    }
    println!("Marital status distribution:");
    for entry in &statistics.marital_distribution {
        println!("  - {}: {}", entry.label, entry.count);
    }
    println!("Score distribution:");
    for band in &statistics.score_bands {
        println!(
            "  {:>4.0}-{:<4.0} {} ({})",
            band.lower,
            band.upper,
            "#".repeat(band.count),
            band.count
        );
    }
}
