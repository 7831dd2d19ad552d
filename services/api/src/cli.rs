use crate::diagnose::{run_diagnose, run_questionnaire, DiagnoseArgs, QuestionnaireArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use grc_diagnostic::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "GRC Diagnostic",
    about = "Score GRC maturity questionnaires and serve the diagnosis API",
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
    /// Score a CSV export of answers and print the dashboard
    Diagnose(DiagnoseArgs),
    /// Walk through the questionnaire interactively on the terminal
    Questionnaire(QuestionnaireArgs),
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
        Command::Diagnose(args) => run_diagnose(args).await,
        Command::Questionnaire(args) => run_questionnaire(args).await,
    }
}
