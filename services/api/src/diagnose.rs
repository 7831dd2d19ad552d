use crate::infra::{diagnosis_service, CompanyArgs};
use crate::render::{render_narrative, render_question, render_report};
use chrono::{Local, NaiveDate};
use clap::Args;
use grc_diagnostic::config::AppConfig;
use grc_diagnostic::error::AppError;
use grc_diagnostic::workflows::diagnosis::narrative::PENDING_MESSAGE;
use grc_diagnostic::workflows::diagnosis::{
    import_responses_from_path, CompanyInfo, DiagnosisService, QuestionnaireSession,
    ResponseSet, Transition,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// CSV export with a `question_id,value` header
    #[arg(long)]
    pub(crate) responses: PathBuf,
    #[command(flatten)]
    pub(crate) company: CompanyArgs,
    /// Skip the executive narrative call
    #[arg(long)]
    pub(crate) skip_narrative: bool,
}

#[derive(Args, Debug)]
pub(crate) struct QuestionnaireArgs {
    #[command(flatten)]
    pub(crate) company: CompanyArgs,
    /// Skip the executive narrative call
    #[arg(long)]
    pub(crate) skip_narrative: bool,
}

pub(crate) async fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = diagnosis_service(&config.narrative);
    let responses = import_responses_from_path(&args.responses, service.engine().bank())?;

    print_report(&service, args.company.into(), &responses, !args.skip_narrative).await
}

pub(crate) async fn run_questionnaire(args: QuestionnaireArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = diagnosis_service(&config.narrative);
    let mut session = QuestionnaireSession::new(service.engine().bank());

    let outcome = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        drive_questionnaire(&mut session, stdin.lock(), &mut out)?
    };

    match outcome {
        SessionOutcome::Completed(responses) => {
            print_report(&service, args.company.into(), &responses, !args.skip_narrative).await
        }
        SessionOutcome::Abandoned => {
            println!("Questionário interrompido; nenhuma resposta foi enviada.");
            Ok(())
        }
    }
}

async fn print_report(
    service: &DiagnosisService,
    company: CompanyInfo,
    responses: &ResponseSet,
    include_narrative: bool,
) -> Result<(), AppError> {
    let issued_on = Local::now().date_naive();
    write_report(
        service,
        company,
        responses,
        issued_on,
        include_narrative,
        &mut io::stdout(),
    )
    .await?;
    Ok(())
}

/// Writes the dashboard and flushes it, then waits for the narrative.
pub(crate) async fn write_report<W: Write>(
    service: &DiagnosisService,
    company: CompanyInfo,
    responses: &ResponseSet,
    issued_on: NaiveDate,
    include_narrative: bool,
    out: &mut W,
) -> io::Result<()> {
    let report = service.report(company, responses, issued_on);
    render_report(&report, out)?;
    if include_narrative {
        writeln!(out, "\n{PENDING_MESSAGE}")?;
    }
    out.flush()?;

    if include_narrative {
        let narrative = service.narrative(&report.result).await;
        render_narrative(&narrative, out)?;
        out.flush()?;
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SessionOutcome {
    Completed(ResponseSet),
    Abandoned,
}

/// Reads one command per line: a digit answers, `n` advances, `p` goes back,
/// `q` quits. End of input counts as quitting.
pub(crate) fn drive_questionnaire<R, W>(
    session: &mut QuestionnaireSession<'_>,
    input: R,
    out: &mut W,
) -> io::Result<SessionOutcome>
where
    R: BufRead,
    W: Write,
{
    let total = session.total_questions();
    let mut lines = input.lines();

    loop {
        let (Some(index), Some(question)) = (session.current_index(), session.current_question())
        else {
            return Ok(SessionOutcome::Completed(session.responses().clone()));
        };
        render_question(question, index + 1, total, session.current_answer(), out)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(SessionOutcome::Abandoned);
        };

        let transition = match line.trim() {
            "q" | "Q" => return Ok(SessionOutcome::Abandoned),
            "n" | "N" => session.next(),
            "p" | "P" => session.previous(),
            other => match other.parse::<u8>() {
                Ok(value) => session.answer(value),
                Err(_) => {
                    writeln!(out, "Comando inválido: use 0-3, n, p ou q.")?;
                    continue;
                }
            },
        };

        match transition {
            Transition::Completed(responses) => return Ok(SessionOutcome::Completed(responses)),
            Transition::Rejected(reason) => writeln!(out, "! {}", reason.label())?,
            _ => {}
        }
    }
}
