use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::diagnosis::{
    CompanyInfo, DiagnosisService, NarrativeFailure, NarrativeProvider, NarrativeRequest,
    QuestionBank, QuestionId, ResponseSet,
};

pub(super) fn company() -> CompanyInfo {
    CompanyInfo {
        company_name: "Seguradora Horizonte".to_string(),
        cnpj: "12.345.678/0001-90".to_string(),
        segment: "Seguros Gerais".to_string(),
        employees: 420,
        responsible_name: "Marina Costa".to_string(),
        email: "marina.costa@horizonte.com.br".to_string(),
        position: "Diretora de Riscos".to_string(),
    }
}

pub(super) fn issued_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

pub(super) fn answers(pairs: &[(u16, u8)]) -> BTreeMap<QuestionId, u8> {
    pairs
        .iter()
        .map(|(id, value)| (QuestionId(*id), *value))
        .collect()
}

pub(super) fn responses(pairs: &[(u16, u8)]) -> ResponseSet {
    QuestionBank::standard()
        .validate_responses(answers(pairs))
        .expect("answers fit the standard bank")
}

pub(super) fn uniform_responses(value: u8) -> ResponseSet {
    let pairs: Vec<(u16, u8)> = (1..=10).map(|id| (id, value)).collect();
    responses(&pairs)
}

/// Governança fully mature, the other pillars partially.
pub(super) fn mixed_answers() -> Vec<(u16, u8)> {
    vec![
        (1, 3),
        (6, 3),
        (9, 3),
        (3, 1),
        (7, 1),
        (2, 2),
        (10, 2),
        (5, 1),
        (8, 2),
        (4, 2),
    ]
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}

/// Provider returning canned outcomes and recording every request.
#[derive(Default)]
pub(super) struct ScriptedNarrator {
    outcome: Option<Result<String, NarrativeFailure>>,
    requests: Mutex<Vec<NarrativeRequest>>,
}

impl ScriptedNarrator {
    pub(super) fn replying(text: &str) -> Self {
        Self {
            outcome: Some(Ok(text.to_string())),
            requests: Mutex::default(),
        }
    }

    pub(super) fn failing(failure: NarrativeFailure) -> Self {
        Self {
            outcome: Some(Err(failure)),
            requests: Mutex::default(),
        }
    }

    pub(super) fn requests(&self) -> Vec<NarrativeRequest> {
        self.requests.lock().expect("requests mutex").clone()
    }
}

#[async_trait]
impl NarrativeProvider for ScriptedNarrator {
    async fn summarize(&self, request: &NarrativeRequest) -> Result<String, NarrativeFailure> {
        self.requests
            .lock()
            .expect("requests mutex")
            .push(request.clone());
        self.outcome
            .clone()
            .unwrap_or(Err(NarrativeFailure::EmptyResponse))
    }
}

/// Provider that only answers after `delay`.
pub(super) struct SlowNarrator {
    pub(super) delay: Duration,
}

#[async_trait]
impl NarrativeProvider for SlowNarrator {
    async fn summarize(&self, _request: &NarrativeRequest) -> Result<String, NarrativeFailure> {
        tokio::time::sleep(self.delay).await;
        Ok("Análise tardia.".to_string())
    }
}

/// Service whose provider takes seconds while the deadline allows 100 ms.
pub(super) fn slow_service() -> DiagnosisService {
    DiagnosisService::new(Arc::new(SlowNarrator {
        delay: Duration::from_secs(3),
    }))
    .with_narrative_deadline(Duration::from_millis(100))
}

pub(super) fn service_with(narrator: Arc<ScriptedNarrator>) -> DiagnosisService {
    DiagnosisService::new(narrator)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
