//! Executive commentary produced by an external text-generation service.
//!
//! Scores are final before any provider is called. Every failure is folded into
//! one of the fixed fallback strings so the dashboard always has commentary.

mod gemini;
mod retry;

pub use gemini::GeminiNarrator;
pub use retry::RetryPolicy;

use super::scoring::DiagnosisResult;
use crate::config::NarrativeConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::warn;

/// Placeholder shown while the provider call is in flight.
pub const PENDING_MESSAGE: &str = "Carregando análise via IA...";
/// The provider answered but produced no text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Não foi possível gerar a análise no momento.";
/// No credential is configured.
pub const UNCONFIGURED_MESSAGE: &str =
    "Análise executiva indisponível: chave de API não configurada.";
/// Any transport, auth, quota or decoding failure.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Erro ao conectar com o motor de IA para análise executiva.";

/// Pluggable source of the executive summary.
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    async fn summarize(&self, request: &NarrativeRequest) -> Result<String, NarrativeFailure>;
}

/// Stand-in used when no API key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredNarrator;

#[async_trait]
impl NarrativeProvider for UnconfiguredNarrator {
    async fn summarize(&self, _request: &NarrativeRequest) -> Result<String, NarrativeFailure> {
        Err(NarrativeFailure::MissingCredential)
    }
}

/// Picks the Gemini adapter when a key is present and its client can be built.
pub fn provider_from_config(config: &NarrativeConfig) -> Arc<dyn NarrativeProvider> {
    let Some(api_key) = config.api_key.as_deref() else {
        return Arc::new(UnconfiguredNarrator);
    };

    match GeminiNarrator::new(api_key, config) {
        Ok(narrator) => Arc::new(narrator),
        Err(err) => {
            warn!(error = %err, "failed to build narrative HTTP client; narrative disabled");
            Arc::new(UnconfiguredNarrator)
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NarrativeFailure {
    #[error("narrative API key is not configured")]
    MissingCredential,
    #[error("narrative provider rejected the credentials (HTTP {status})")]
    Unauthorized { status: u16 },
    #[error("narrative provider rate limited or exhausted the quota")]
    RateLimited,
    #[error("narrative request timed out")]
    Timeout,
    #[error("narrative transport failed: {0}")]
    Network(String),
    #[error("narrative provider returned HTTP {status}")]
    Upstream { status: u16 },
    #[error("narrative provider returned no text")]
    EmptyResponse,
    #[error("narrative payload could not be decoded: {0}")]
    Malformed(String),
}

impl NarrativeFailure {
    /// Failures worth another attempt after a backoff.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited | Self::Timeout | Self::Network(_) => true,
            Self::Upstream { status } => *status >= 500,
            Self::MissingCredential
            | Self::Unauthorized { .. }
            | Self::EmptyResponse
            | Self::Malformed(_) => false,
        }
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::EmptyResponse => EMPTY_RESPONSE_MESSAGE,
            Self::MissingCredential => UNCONFIGURED_MESSAGE,
            _ => CONNECTION_ERROR_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativePillar {
    pub label: &'static str,
    pub score: f64,
    pub benchmark: f64,
}

/// Numeric summary and company context handed to the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeRequest {
    pub company_name: String,
    pub segment: String,
    pub employees: u32,
    pub pillars: Vec<NarrativePillar>,
    pub total_score: f64,
    pub total_benchmark: f64,
}

impl NarrativeRequest {
    pub fn from_result(result: &DiagnosisResult) -> Self {
        Self {
            company_name: result.company.company_name.clone(),
            segment: result.company.segment.clone(),
            employees: result.company.employees,
            pillars: result
                .pillars
                .iter()
                .map(|entry| NarrativePillar {
                    label: entry.label,
                    score: entry.score,
                    benchmark: entry.benchmark,
                })
                .collect(),
            total_score: result.total_score,
            total_benchmark: result.total_benchmark,
        }
    }

    /// Consultant prompt sent to text-generation providers.
    pub fn prompt(&self) -> String {
        let mut prompt = String::from(
            "Aja como um consultor sênior de GRC (Governança, Risco e Conformidade) especializado no setor de seguros.\n\
             Analise os seguintes resultados de diagnóstico para uma seguradora de médio porte:\n\n",
        );

        let _ = writeln!(prompt, "Empresa: {}", self.company_name);
        let _ = writeln!(prompt, "Segmento: {}", self.segment);
        let _ = writeln!(prompt, "Colaboradores: {}\n", self.employees);
        prompt.push_str("Scores (0-100):\n");
        for pillar in &self.pillars {
            let _ = writeln!(
                prompt,
                "- {}: {:.2} (Benchmark: {:.0})",
                pillar.label, pillar.score, pillar.benchmark
            );
        }
        let _ = writeln!(
            prompt,
            "- Score GRC Total: {:.2} (Benchmark: {:.0})\n",
            self.total_score, self.total_benchmark
        );

        prompt.push_str(
            "Tarefa:\n\
             1. Forneça um resumo executivo de 2 parágrafos sobre o estado atual da empresa.\n\
             2. Identifique a maior vulnerabilidade e sugira uma ação imediata estratégica.\n\
             3. Use um tom profissional, direto e encorajador.\n\n\
             Responda em Português do Brasil.\n",
        );
        prompt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    Generated,
    Fallback,
}

/// Commentary ready for display: provider paragraphs or a single fallback line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveNarrative {
    pub source: NarrativeSource,
    pub paragraphs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl ExecutiveNarrative {
    /// Asks the provider for commentary; never fails.
    pub async fn resolve(provider: &dyn NarrativeProvider, request: &NarrativeRequest) -> Self {
        match provider.summarize(request).await {
            Ok(text) => {
                let paragraphs = split_paragraphs(&text);
                if paragraphs.is_empty() {
                    Self::fallback(&NarrativeFailure::EmptyResponse)
                } else {
                    Self {
                        source: NarrativeSource::Generated,
                        paragraphs,
                        failure: None,
                    }
                }
            }
            Err(failure) => {
                warn!(error = %failure, "executive narrative unavailable; using fallback");
                Self::fallback(&failure)
            }
        }
    }

    pub fn fallback(failure: &NarrativeFailure) -> Self {
        Self {
            source: NarrativeSource::Fallback,
            paragraphs: vec![failure.fallback_message().to_string()],
            failure: Some(failure.to_string()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == NarrativeSource::Fallback
    }

    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }
}

fn split_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
