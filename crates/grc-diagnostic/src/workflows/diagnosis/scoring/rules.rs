use super::super::domain::{QuestionId, ResponseSet, MAX_ANSWER_VALUE};

/// Mean of the mapped answers rescaled from 0..=3 to 0..=100.
///
/// Unanswered questions count as zero rather than failing the diagnosis.
pub fn pillar_score(mapped: &[QuestionId], responses: &ResponseSet) -> f64 {
    if mapped.is_empty() {
        return 0.0;
    }

    let sum: u32 = mapped
        .iter()
        .map(|id| u32::from(responses.value_or_zero(*id)))
        .sum();
    let average = f64::from(sum) / mapped.len() as f64;

    (average / f64::from(MAX_ANSWER_VALUE)) * 100.0
}

/// Unweighted mean across pillar scores; each pillar counts once regardless of
/// how many questions feed it.
pub fn total_score(pillar_scores: &[f64]) -> f64 {
    if pillar_scores.is_empty() {
        return 0.0;
    }
    pillar_scores.iter().sum::<f64>() / pillar_scores.len() as f64
}

/// Positive when the company trails the benchmark, negative when it leads.
pub fn gap(benchmark: f64, company_score: f64) -> f64 {
    benchmark - company_score
}
