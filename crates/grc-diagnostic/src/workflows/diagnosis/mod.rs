//! GRC maturity diagnosis: question bank, questionnaire flow, pillar scoring,
//! benchmark gaps, dashboard report and executive narrative.

pub mod bank;
pub mod benchmark;
pub mod domain;
pub mod import;
pub mod narrative;
pub mod questionnaire;
pub mod randomizer;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use bank::{BankError, QuestionBank};
pub use benchmark::BenchmarkTable;
pub use domain::{
    CompanyInfo, Pillar, Question, QuestionId, QuestionOption, ResponseError, ResponseSet,
    MAX_ANSWER_VALUE,
};
pub use import::{import_responses, import_responses_from_path, ResponseImportError};
pub use narrative::{
    provider_from_config, ExecutiveNarrative, GeminiNarrator, NarrativeFailure,
    NarrativeProvider, NarrativeRequest, NarrativeSource, RetryPolicy, UnconfiguredNarrator,
};
pub use questionnaire::{QuestionnaireSession, Rejection, SessionState, Transition};
pub use randomizer::{shuffle, shuffle_with};
pub use report::{recommendation_for, DiagnosisDashboard, PillarRecommendation};
pub use router::diagnosis_router;
pub use scoring::{
    CommercialTier, DiagnosisResult, HeatLevel, MaturityStatus, PillarScore, ScoringEngine,
};
pub use service::{DiagnosisReport, DiagnosisService, DiagnosisSubmission, QuestionnaireView};
