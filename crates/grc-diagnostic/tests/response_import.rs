use grc_diagnostic::workflows::diagnosis::{
    import_responses, import_responses_from_path, MaturityStatus, Pillar, QuestionBank,
    QuestionId, ResponseImportError, ScoringEngine,
};

#[test]
fn sample_export_scores_end_to_end() {
    let data = include_bytes!("../sample_responses.csv");
    let responses =
        import_responses(&data[..], QuestionBank::standard()).expect("sample imports");
    assert_eq!(responses.len(), 10);

    let company = serde_json::from_value(serde_json::json!({
        "company_name": "Seguradora Horizonte",
        "segment": "Seguros Gerais",
        "employees": 420
    }))
    .expect("company info parses with optional fields missing");
    let result = ScoringEngine::standard().score(company, &responses);

    assert!((result.total_score - 67.78).abs() < 0.01);
    assert_eq!(result.status(), MaturityStatus::Developing);
    assert!((result.gap_for(Pillar::DataManagement).expect("data") - 5.0).abs() < 1e-9);
}

#[test]
fn import_from_path_reports_missing_file() {
    let err = import_responses_from_path("does/not/exist.csv", QuestionBank::standard())
        .expect_err("missing file");
    assert!(matches!(err, ResponseImportError::Io(_)));
}

#[test]
fn partial_exports_leave_unanswered_questions_at_zero() {
    let csv = "question_id,value\nQ1,3\nQ9,3\n";
    let responses =
        import_responses(csv.as_bytes(), QuestionBank::standard()).expect("partial import");

    assert_eq!(responses.get(QuestionId(1)), Some(3));
    assert!(!responses.contains(QuestionId(6)));
    let score = ScoringEngine::standard().pillar_score(Pillar::Governance, &responses);
    assert!((score - 66.67).abs() < 0.01);
}
