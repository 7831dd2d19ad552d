use super::super::domain::Pillar;
use super::super::scoring::{CommercialTier, HeatLevel, MaturityStatus};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub status: MaturityStatus,
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapCell {
    pub pillar: Pillar,
    pub label: &'static str,
    pub gap: f64,
    pub level: HeatLevel,
    pub color: &'static str,
    /// Width of the severity bar, `|gap|` scaled so 40 points fill it.
    pub bar_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriorityEntry {
    pub rank: usize,
    pub pillar: Pillar,
    pub label: &'static str,
    pub gap: f64,
    pub description: &'static str,
    pub actions: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommercialOfferView {
    pub tier: CommercialTier,
    pub situation: &'static str,
    pub offer: &'static str,
    pub call_to_action: &'static str,
    pub max_gap: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub score: f64,
    pub benchmark: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisDashboard {
    pub company_name: String,
    pub issued_on: NaiveDate,
    pub total_score: f64,
    pub status: StatusView,
    pub heatmap: Vec<HeatmapCell>,
    pub priorities: Vec<PriorityEntry>,
    pub commercial: CommercialOfferView,
    /// Pillars in canonical order followed by the aggregate row.
    pub comparison: Vec<ComparisonRow>,
}
