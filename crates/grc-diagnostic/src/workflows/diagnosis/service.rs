use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{CompanyInfo, Question, QuestionId, ResponseError, ResponseSet};
use super::narrative::{ExecutiveNarrative, NarrativeFailure, NarrativeProvider, NarrativeRequest};
use super::randomizer::shuffle_with;
use super::report::DiagnosisDashboard;
use super::scoring::{DiagnosisResult, ScoringEngine};

const DEFAULT_NARRATIVE_DEADLINE: Duration = Duration::from_secs(30);

/// Payload accepted by the diagnosis endpoints.
///
/// The narrative is opt-in on the scoring endpoint; clients that want scores
/// first fetch the commentary from the narrative endpoint afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosisSubmission {
    pub company: CompanyInfo,
    #[serde(default)]
    pub responses: BTreeMap<QuestionId, u8>,
    #[serde(default)]
    pub include_narrative: bool,
}

/// Questions in presentation order for a fresh session.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub total: usize,
    pub questions: Vec<&'static Question>,
}

/// Everything the dashboard needs for one completed diagnosis.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisReport {
    pub result: DiagnosisResult,
    pub dashboard: DiagnosisDashboard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<ExecutiveNarrative>,
}

/// Service composing the scoring engine with the narrative provider.
pub struct DiagnosisService {
    engine: ScoringEngine<'static>,
    narrator: Arc<dyn NarrativeProvider>,
    narrative_deadline: Duration,
}

impl DiagnosisService {
    pub fn new(narrator: Arc<dyn NarrativeProvider>) -> Self {
        Self::with_engine(ScoringEngine::standard(), narrator)
    }

    pub fn with_engine(engine: ScoringEngine<'static>, narrator: Arc<dyn NarrativeProvider>) -> Self {
        Self {
            engine,
            narrator,
            narrative_deadline: DEFAULT_NARRATIVE_DEADLINE,
        }
    }

    /// Caps the whole provider call, retries included.
    pub fn with_narrative_deadline(mut self, deadline: Duration) -> Self {
        self.narrative_deadline = deadline;
        self
    }

    pub fn narrative_deadline(&self) -> Duration {
        self.narrative_deadline
    }

    pub fn engine(&self) -> ScoringEngine<'static> {
        self.engine
    }

    pub fn questionnaire(&self) -> QuestionnaireView {
        self.questionnaire_with(&mut rand::thread_rng())
    }

    pub fn questionnaire_with<R: Rng + ?Sized>(&self, rng: &mut R) -> QuestionnaireView {
        let canonical: Vec<&'static Question> = self.engine.bank().questions().iter().collect();
        let questions = shuffle_with(&canonical, rng);
        QuestionnaireView {
            total: questions.len(),
            questions,
        }
    }

    /// Validates raw answers against the bank.
    pub fn validate(
        &self,
        answers: &BTreeMap<QuestionId, u8>,
    ) -> Result<ResponseSet, ResponseError> {
        self.engine
            .bank()
            .validate_responses(answers.iter().map(|(id, value)| (*id, *value)))
    }

    pub fn score(&self, company: CompanyInfo, responses: &ResponseSet) -> DiagnosisResult {
        self.engine.score(company, responses)
    }

    /// Commentary for an already computed result; falls back instead of failing,
    /// including when the provider outlives the deadline.
    pub async fn narrative(&self, result: &DiagnosisResult) -> ExecutiveNarrative {
        let request = NarrativeRequest::from_result(result);
        let resolve = ExecutiveNarrative::resolve(self.narrator.as_ref(), &request);

        match tokio::time::timeout(self.narrative_deadline, resolve).await {
            Ok(narrative) => narrative,
            Err(_) => {
                warn!(
                    deadline_ms = self.narrative_deadline.as_millis() as u64,
                    "executive narrative exceeded its deadline; using fallback"
                );
                ExecutiveNarrative::fallback(&NarrativeFailure::Timeout)
            }
        }
    }

    /// Scores a validated response set and assembles the dashboard. Never waits
    /// on the narrative provider.
    pub fn report(
        &self,
        company: CompanyInfo,
        responses: &ResponseSet,
        issued_on: NaiveDate,
    ) -> DiagnosisReport {
        let result = self.score(company, responses);
        let dashboard = result.dashboard(issued_on);

        DiagnosisReport {
            result,
            dashboard,
            narrative: None,
        }
    }

    /// Validates a submission, then scores and reports it. The narrative is
    /// attached only on request and is bounded by the deadline.
    pub async fn diagnose(
        &self,
        submission: DiagnosisSubmission,
        issued_on: NaiveDate,
    ) -> Result<DiagnosisReport, ResponseError> {
        let responses = self.validate(&submission.responses)?;
        let mut report = self.report(submission.company, &responses, issued_on);
        if submission.include_narrative {
            report.narrative = Some(self.narrative(&report.result).await);
        }
        Ok(report)
    }

    /// Validates a submission and returns only its executive narrative.
    pub async fn narrate(
        &self,
        submission: DiagnosisSubmission,
    ) -> Result<ExecutiveNarrative, ResponseError> {
        let responses = self.validate(&submission.responses)?;
        let result = self.score(submission.company, &responses);
        Ok(self.narrative(&result).await)
    }
}
