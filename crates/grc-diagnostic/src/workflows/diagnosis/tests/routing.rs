use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceExt;

use crate::workflows::diagnosis::router::{diagnose_handler, questionnaire_handler};
use crate::workflows::diagnosis::{
    diagnosis_router, DiagnosisService, DiagnosisSubmission, NarrativeFailure,
};

fn submission_body(responses: Value, include_narrative: bool) -> Body {
    let payload = json!({
        "company": {
            "company_name": "Seguradora Horizonte",
            "segment": "Seguros Gerais",
            "employees": 420
        },
        "responses": responses,
        "include_narrative": include_narrative
    });
    Body::from(serde_json::to_vec(&payload).expect("serialize payload"))
}

fn post_diagnosis(body: Body) -> Request<Body> {
    Request::post("/api/v1/diagnosis")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .expect("request builds")
}

#[tokio::test]
async fn questionnaire_route_lists_every_question_with_options() {
    let router = diagnosis_router(Arc::new(service_with(Arc::new(ScriptedNarrator::default()))));

    let response = router
        .oneshot(
            Request::get("/api/v1/diagnosis/questionnaire")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], json!(10));

    let questions = payload["questions"].as_array().expect("questions array");
    let mut ids: Vec<u64> = questions
        .iter()
        .filter_map(|question| question["id"].as_u64())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=10).collect::<Vec<u64>>());
    assert!(questions
        .iter()
        .all(|question| question["options"].as_array().map(Vec::len) == Some(4)));
}

#[tokio::test]
async fn diagnose_route_returns_result_dashboard_and_narrative() {
    let narrator = Arc::new(ScriptedNarrator::replying(
        "Resumo executivo.\n\nAção imediata recomendada.",
    ));
    let router = diagnosis_router(Arc::new(service_with(narrator.clone())));
    let all_three: serde_json::Map<String, Value> =
        (1..=10).map(|id| (id.to_string(), json!(3))).collect();

    let response = router
        .oneshot(post_diagnosis(submission_body(Value::Object(all_three), true)))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["result"]["total_score"], json!(100.0));
    assert_eq!(payload["result"]["pillars"][0]["gap"], json!(-38.0));
    assert_eq!(payload["dashboard"]["status"]["label"], json!("Adequate/Advanced"));
    assert_eq!(
        payload["narrative"]["paragraphs"],
        json!(["Resumo executivo.", "Ação imediata recomendada."])
    );
    assert_eq!(narrator.requests().len(), 1);
}

#[tokio::test]
async fn diagnose_route_rejects_unknown_question() {
    let router = diagnosis_router(Arc::new(service_with(Arc::new(ScriptedNarrator::default()))));

    let response = router
        .oneshot(post_diagnosis(submission_body(json!({ "11": 2 }), false)))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("Q11"));
}

#[tokio::test]
async fn diagnose_handler_rejects_values_outside_options() {
    let service = Arc::new(service_with(Arc::new(ScriptedNarrator::default())));
    let submission = DiagnosisSubmission {
        company: company(),
        responses: answers(&[(1, 3), (2, 9)]),
        include_narrative: false,
    };

    let response = diagnose_handler(State(service), axum::Json(submission)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn diagnose_handler_skips_narrative_on_request() {
    let narrator = Arc::new(ScriptedNarrator::failing(NarrativeFailure::Timeout));
    let service = Arc::new(service_with(narrator.clone()));
    let submission = DiagnosisSubmission {
        company: company(),
        responses: answers(&mixed_answers()),
        include_narrative: false,
    };

    let response = diagnose_handler(State(service), axum::Json(submission)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload.get("narrative").is_none());
    assert!(narrator.requests().is_empty());
}

#[tokio::test]
async fn narrative_failure_still_returns_scores() {
    let narrator = Arc::new(ScriptedNarrator::failing(NarrativeFailure::Upstream {
        status: 503,
    }));
    let service = Arc::new(service_with(narrator));
    let submission = DiagnosisSubmission {
        company: company(),
        responses: answers(&mixed_answers()),
        include_narrative: true,
    };

    let response = diagnose_handler(State(service), axum::Json(submission)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["narrative"]["source"], json!("fallback"));
    assert_eq!(
        payload["narrative"]["paragraphs"][0],
        json!("Erro ao conectar com o motor de IA para análise executiva.")
    );
    assert_eq!(payload["dashboard"]["priorities"][0]["pillar"], json!("data_management"));
}

#[tokio::test]
async fn diagnose_route_returns_scores_without_waiting_for_narrative() {
    let router = diagnosis_router(Arc::new(
        DiagnosisService::new(Arc::new(SlowNarrator {
            delay: Duration::from_secs(3),
        })),
    ));
    let payload = json!({
        "company": {
            "company_name": "Seguradora Horizonte",
            "segment": "Seguros Gerais",
            "employees": 420
        },
        "responses": { "1": 3, "6": 3, "9": 3 }
    });
    let body = Body::from(serde_json::to_vec(&payload).expect("serialize payload"));

    let started = Instant::now();
    let response = router
        .oneshot(post_diagnosis(body))
        .await
        .expect("route executes");

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["result"]["pillars"][0]["score"], json!(100.0));
    assert!(payload.get("narrative").is_none());
}

#[tokio::test]
async fn narrative_route_returns_commentary_only() {
    let narrator = Arc::new(ScriptedNarrator::replying("Resumo executivo."));
    let router = diagnosis_router(Arc::new(service_with(narrator.clone())));

    let response = router
        .oneshot(
            Request::post("/api/v1/diagnosis/narrative")
                .header(header::CONTENT_TYPE, "application/json")
                .body(submission_body(json!({ "1": 2, "2": 1 }), false))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["source"], json!("generated"));
    assert_eq!(payload["paragraphs"], json!(["Resumo executivo."]));
    assert_eq!(narrator.requests().len(), 1);
}

#[tokio::test]
async fn narrative_route_rejects_invalid_answers() {
    let narrator = Arc::new(ScriptedNarrator::replying("Resumo executivo."));
    let router = diagnosis_router(Arc::new(service_with(narrator.clone())));

    let response = router
        .oneshot(
            Request::post("/api/v1/diagnosis/narrative")
                .header(header::CONTENT_TYPE, "application/json")
                .body(submission_body(json!({ "3": 7 }), false))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(narrator.requests().is_empty());
}

#[tokio::test]
async fn questionnaire_handler_returns_ok() {
    let service = Arc::new(service_with(Arc::new(ScriptedNarrator::default())));

    let response = questionnaire_handler(State(service)).await;

    assert_eq!(response.status(), StatusCode::OK);
}
