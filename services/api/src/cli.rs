use crate::commands::{run_assess, run_classify, run_stats, AssessArgs, ClassifyArgs, StatsArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_scoring::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Scoring",
    about = "Assess credit applicants and serve the credit scoring API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate, score, and journal one applicant with the rule-based engine
    Assess(AssessArgs),
    /// Decide one applicant with the configured classifier artifacts
    Classify(ClassifyArgs),
    /// Summarise the decision journal
    Stats(StatsArgs),
    /// Run an end-to-end demo on sample applicants
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Classify(args) => run_classify(args),
        Command::Stats(args) => run_stats(args),
        Command::Demo(args) => run_demo(args),
    }
}
