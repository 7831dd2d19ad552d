use super::super::scoring::{CommercialTier, DiagnosisResult, HeatLevel, PillarScore};
use super::recommendations::recommendation_for;
use super::views::{
    ComparisonRow, CommercialOfferView, DiagnosisDashboard, HeatmapCell, PriorityEntry,
    StatusView,
};
use chrono::NaiveDate;

const PRIORITY_COUNT: usize = 3;
const HEAT_BAR_FULL_GAP: f64 = 40.0;

impl DiagnosisResult {
    /// Presentation-ready view of the result as issued on `issued_on`.
    pub fn dashboard(&self, issued_on: NaiveDate) -> DiagnosisDashboard {
        let status = self.status();
        let tier = self.commercial_tier();

        DiagnosisDashboard {
            company_name: self.company.company_name.clone(),
            issued_on,
            total_score: self.total_score,
            status: StatusView {
                status,
                label: status.label(),
                color: status.color(),
            },
            heatmap: self.pillars.iter().map(heatmap_cell).collect(),
            priorities: priorities(&self.pillars),
            commercial: commercial_offer(tier, self.max_gap()),
            comparison: self
                .pillars
                .iter()
                .map(|entry| ComparisonRow {
                    label: entry.label,
                    score: entry.score,
                    benchmark: entry.benchmark,
                })
                .chain(std::iter::once(ComparisonRow {
                    label: "GRC Total",
                    score: self.total_score,
                    benchmark: self.total_benchmark,
                }))
                .collect(),
        }
    }
}

fn heatmap_cell(entry: &PillarScore) -> HeatmapCell {
    let level = HeatLevel::from_gap(entry.gap);
    HeatmapCell {
        pillar: entry.pillar,
        label: entry.label,
        gap: entry.gap,
        level,
        color: level.color(),
        bar_pct: (entry.gap.abs() / HEAT_BAR_FULL_GAP * 100.0).min(100.0),
    }
}

/// Largest gaps first; the stable sort keeps canonical order among ties.
fn priorities(pillars: &[PillarScore]) -> Vec<PriorityEntry> {
    let mut ranked: Vec<&PillarScore> = pillars.iter().collect();
    ranked.sort_by(|a, b| b.gap.total_cmp(&a.gap));

    ranked
        .into_iter()
        .take(PRIORITY_COUNT)
        .enumerate()
        .map(|(index, entry)| {
            let recommendation = recommendation_for(entry.pillar);
            PriorityEntry {
                rank: index + 1,
                pillar: entry.pillar,
                label: entry.label,
                gap: entry.gap,
                description: recommendation.description,
                actions: recommendation.actions.to_vec(),
            }
        })
        .collect()
}

fn commercial_offer(tier: CommercialTier, max_gap: f64) -> CommercialOfferView {
    CommercialOfferView {
        tier,
        situation: tier.situation(),
        offer: tier.offer(),
        call_to_action: tier.call_to_action(),
        max_gap,
    }
}
