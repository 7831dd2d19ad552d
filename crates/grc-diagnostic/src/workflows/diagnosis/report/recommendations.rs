use super::super::domain::Pillar;
use serde::Serialize;

/// Remediation guidance attached to a pillar in the priority roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PillarRecommendation {
    pub description: &'static str,
    pub actions: [&'static str; 3],
}

pub fn recommendation_for(pillar: Pillar) -> PillarRecommendation {
    match pillar {
        Pillar::Governance => PillarRecommendation {
            description: "Estruturação de órgãos colegiados e práticas de governança",
            actions: [
                "Formalizar Conselho de Administração ou Comitê Consultivo",
                "Implementar reuniões periódicas documentadas",
                "Contratar Seguro D&O robusto",
            ],
        },
        Pillar::Risk => PillarRecommendation {
            description: "Gestão de riscos estratégicos e operacionais",
            actions: [
                "Desenvolver matriz de riscos atualizada",
                "Estabelecer comitê formal de riscos",
                "Implementar avaliações trimestrais",
            ],
        },
        Pillar::Compliance => PillarRecommendation {
            description: "Adequação regulatória SUSEP/CNSP e processos de auditoria",
            actions: [
                "Documentar processos de conformidade",
                "Implementar calendário de auditorias internas",
                "Criar plano de remediação de não-conformidades",
            ],
        },
        Pillar::DataManagement => PillarRecommendation {
            description: "Proteção de dados e conformidade LGPD",
            actions: [
                "Mapear tratamento de dados pessoais",
                "Implementar políticas documentadas de privacidade",
                "Automatizar controles de acesso e criptografia",
            ],
        },
        Pillar::ControlsAndMitigation => PillarRecommendation {
            description: "Controles internos e segregação de funções",
            actions: [
                "Implementar segregação de funções críticas",
                "Automatizar trilhas de auditoria de sistemas",
                "Desenvolver matriz de controles manuais e sistêmicos",
            ],
        },
    }
}
