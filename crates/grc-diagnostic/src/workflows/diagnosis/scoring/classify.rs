use serde::Serialize;

/// Maturity band of an aggregate score. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityStatus {
    Critical,
    Concerning,
    Developing,
    Advanced,
}

impl MaturityStatus {
    pub fn from_score(score: f64) -> Self {
        if score <= 20.0 {
            Self::Critical
        } else if score <= 40.0 {
            Self::Concerning
        } else if score <= 70.0 {
            Self::Developing
        } else {
            Self::Advanced
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Concerning => "Concerning",
            Self::Developing => "Developing",
            Self::Advanced => "Adequate/Advanced",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Critical => "#EF4444",
            Self::Concerning => "#F97316",
            Self::Developing => "#EAB308",
            Self::Advanced => "#22C55E",
        }
    }
}

/// Heatmap severity of a pillar gap.
///
/// Banded on the signed gap, so a company far ahead of the benchmark lands in
/// `Low` together with one that barely misses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatLevel {
    Low,
    Medium,
    High,
}

impl HeatLevel {
    pub fn from_gap(gap: f64) -> Self {
        if gap <= 5.0 {
            Self::Low
        } else if gap <= 15.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#22C55E",
            Self::Medium => "#EAB308",
            Self::High => "#EF4444",
        }
    }
}

/// Engagement offer escalated by the single largest pillar gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommercialTier {
    StrategicConsulting,
    FrameworkImplementation,
    Training,
    ContinuousMonitoring,
}

impl CommercialTier {
    pub fn from_max_gap(max_gap: f64) -> Self {
        if max_gap > 20.0 {
            Self::StrategicConsulting
        } else if max_gap > 10.0 {
            Self::FrameworkImplementation
        } else if max_gap > 5.0 {
            Self::Training
        } else {
            Self::ContinuousMonitoring
        }
    }

    /// How exposed the company is considered.
    pub const fn situation(self) -> &'static str {
        match self {
            Self::StrategicConsulting => "Crítica",
            Self::FrameworkImplementation => "Importante",
            Self::Training => "Moderada",
            Self::ContinuousMonitoring => "Mínima",
        }
    }

    pub const fn offer(self) -> &'static str {
        match self {
            Self::StrategicConsulting => "Consultoria GRC Estratégica",
            Self::FrameworkImplementation => "Implementação de Frameworks",
            Self::Training => "Treinamento & Capacitação",
            Self::ContinuousMonitoring => "Monitoramento Contínuo",
        }
    }

    pub const fn call_to_action(self) -> &'static str {
        match self {
            Self::StrategicConsulting => "Agendar Diagnóstico Presencial",
            Self::FrameworkImplementation => "Solicitar Proposta de Implementação",
            Self::Training => "Conhecer Programas",
            Self::ContinuousMonitoring => "Configurar Monitoramento",
        }
    }
}
