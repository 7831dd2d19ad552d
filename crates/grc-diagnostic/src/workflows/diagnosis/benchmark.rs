use super::domain::Pillar;
use serde::Serialize;
use std::sync::OnceLock;

/// Industry reference scores (0-100) per pillar and for the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkTable {
    governance: f64,
    risk: f64,
    compliance: f64,
    data_management: f64,
    controls_and_mitigation: f64,
    total: f64,
}

impl BenchmarkTable {
    /// Global insurance-market averages.
    pub fn standard() -> &'static BenchmarkTable {
        static STANDARD: OnceLock<BenchmarkTable> = OnceLock::new();
        STANDARD.get_or_init(|| BenchmarkTable {
            governance: 62.0,
            risk: 58.0,
            compliance: 65.0,
            data_management: 55.0,
            controls_and_mitigation: 60.0,
            total: 60.0,
        })
    }

    pub fn for_pillar(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Governance => self.governance,
            Pillar::Risk => self.risk,
            Pillar::Compliance => self.compliance,
            Pillar::DataManagement => self.data_management,
            Pillar::ControlsAndMitigation => self.controls_and_mitigation,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_benchmarks_stay_within_score_range() {
        let table = BenchmarkTable::standard();
        for pillar in Pillar::ordered() {
            let value = table.for_pillar(pillar);
            assert!((0.0..=100.0).contains(&value), "{pillar}: {value}");
        }
        assert_eq!(table.for_pillar(Pillar::Governance), 62.0);
        assert_eq!(table.total(), 60.0);
    }
}
