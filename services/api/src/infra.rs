use clap::Args;
use grc_diagnostic::config::NarrativeConfig;
use grc_diagnostic::workflows::diagnosis::{provider_from_config, CompanyInfo, DiagnosisService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Company metadata captured on the command line.
#[derive(Args, Debug, Clone)]
pub(crate) struct CompanyArgs {
    /// Company name shown on the dashboard
    #[arg(long)]
    pub(crate) company_name: String,
    /// Business segment, e.g. "Seguros Gerais"
    #[arg(long)]
    pub(crate) segment: String,
    /// Number of employees
    #[arg(long)]
    pub(crate) employees: u32,
    /// Company identifier (CNPJ)
    #[arg(long, default_value = "")]
    pub(crate) cnpj: String,
    /// Respondent name
    #[arg(long, default_value = "")]
    pub(crate) responsible_name: String,
    /// Respondent e-mail
    #[arg(long, default_value = "")]
    pub(crate) email: String,
    /// Respondent position
    #[arg(long, default_value = "")]
    pub(crate) position: String,
}

impl From<CompanyArgs> for CompanyInfo {
    fn from(args: CompanyArgs) -> Self {
        CompanyInfo {
            company_name: args.company_name,
            cnpj: args.cnpj,
            segment: args.segment,
            employees: args.employees,
            responsible_name: args.responsible_name,
            email: args.email,
            position: args.position,
        }
    }
}

pub(crate) fn diagnosis_service(config: &NarrativeConfig) -> DiagnosisService {
    DiagnosisService::new(provider_from_config(config)).with_narrative_deadline(config.deadline)
}
