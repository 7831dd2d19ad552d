mod classify;
mod rules;

pub use classify::{CommercialTier, HeatLevel, MaturityStatus};
pub use rules::{gap, pillar_score, total_score};

use super::bank::QuestionBank;
use super::benchmark::BenchmarkTable;
use super::domain::{CompanyInfo, Pillar, ResponseSet};
use serde::Serialize;
use tracing::info;

/// Stateless scorer binding the pillar mapping to the benchmark table.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine<'a> {
    bank: &'a QuestionBank,
    benchmarks: &'a BenchmarkTable,
}

impl ScoringEngine<'static> {
    pub fn standard() -> Self {
        Self::new(QuestionBank::standard(), BenchmarkTable::standard())
    }
}

impl<'a> ScoringEngine<'a> {
    pub fn new(bank: &'a QuestionBank, benchmarks: &'a BenchmarkTable) -> Self {
        Self { bank, benchmarks }
    }

    pub fn bank(&self) -> &'a QuestionBank {
        self.bank
    }

    pub fn benchmarks(&self) -> &'a BenchmarkTable {
        self.benchmarks
    }

    pub fn pillar_score(&self, pillar: Pillar, responses: &ResponseSet) -> f64 {
        pillar_score(self.bank.questions_for_pillar(pillar), responses)
    }

    pub fn score(&self, company: CompanyInfo, responses: &ResponseSet) -> DiagnosisResult {
        let pillars: Vec<PillarScore> = Pillar::ordered()
            .into_iter()
            .map(|pillar| {
                let score = self.pillar_score(pillar, responses);
                let benchmark = self.benchmarks.for_pillar(pillar);
                PillarScore {
                    pillar,
                    label: pillar.label(),
                    score,
                    benchmark,
                    gap: gap(benchmark, score),
                }
            })
            .collect();

        let scores: Vec<f64> = pillars.iter().map(|entry| entry.score).collect();
        let total_score = total_score(&scores);
        let total_benchmark = self.benchmarks.total();

        info!(
            company = %company.company_name,
            answered = responses.len(),
            total_score,
            "diagnosis scored"
        );

        DiagnosisResult {
            company,
            pillars,
            total_score,
            total_benchmark,
            total_gap: gap(total_benchmark, total_score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarScore {
    pub pillar: Pillar,
    pub label: &'static str,
    pub score: f64,
    pub benchmark: f64,
    pub gap: f64,
}

/// Immutable snapshot produced once at the end of a questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisResult {
    pub company: CompanyInfo,
    /// One entry per pillar, in canonical pillar order.
    pub pillars: Vec<PillarScore>,
    pub total_score: f64,
    pub total_benchmark: f64,
    pub total_gap: f64,
}

impl DiagnosisResult {
    pub fn pillar(&self, pillar: Pillar) -> Option<&PillarScore> {
        self.pillars.iter().find(|entry| entry.pillar == pillar)
    }

    pub fn score_for(&self, pillar: Pillar) -> Option<f64> {
        self.pillar(pillar).map(|entry| entry.score)
    }

    pub fn gap_for(&self, pillar: Pillar) -> Option<f64> {
        self.pillar(pillar).map(|entry| entry.gap)
    }

    /// Largest pillar gap, which drives the commercial tier.
    pub fn max_gap(&self) -> f64 {
        self.pillars
            .iter()
            .map(|entry| entry.gap)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn status(&self) -> MaturityStatus {
        MaturityStatus::from_score(self.total_score)
    }

    pub fn commercial_tier(&self) -> CommercialTier {
        CommercialTier::from_max_gap(self.max_gap())
    }
}
