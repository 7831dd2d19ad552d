use super::domain::{
    Pillar, Question, QuestionId, QuestionOption, ResponseError, ResponseSet, MAX_ANSWER_VALUE,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Canonical questionnaire plus the pillar mapping used for scoring.
///
/// Built once and shared read-only. Construction checks that the mapping and
/// the questions agree.
#[derive(Debug)]
pub struct QuestionBank {
    questions: Vec<Question>,
    mapping: BTreeMap<Pillar, Vec<QuestionId>>,
}

impl QuestionBank {
    pub fn new(
        questions: Vec<Question>,
        mapping: BTreeMap<Pillar, Vec<QuestionId>>,
    ) -> Result<Self, BankError> {
        let bank = Self { questions, mapping };
        bank.validate()?;
        Ok(bank)
    }

    /// The insurance-sector GRC questionnaire, validated on first use.
    pub fn standard() -> &'static QuestionBank {
        static STANDARD: OnceLock<QuestionBank> = OnceLock::new();
        STANDARD.get_or_init(|| {
            QuestionBank::new(standard_questions(), standard_mapping())
                .expect("standard question bank must satisfy the pillar mapping invariants")
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// Question ids contributing to the pillar's score.
    pub fn questions_for_pillar(&self, pillar: Pillar) -> &[QuestionId] {
        self.mapping
            .get(&pillar)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Checks externally supplied answers against the bank.
    pub fn validate_responses<I>(&self, answers: I) -> Result<ResponseSet, ResponseError>
    where
        I: IntoIterator<Item = (QuestionId, u8)>,
    {
        let mut responses = ResponseSet::new();
        for (id, value) in answers {
            self.check_answer(id, value)?;
            responses.record(id, value);
        }
        Ok(responses)
    }

    /// Resolves `id` and confirms `value` is one of its options.
    pub fn check_answer(&self, id: QuestionId, value: u8) -> Result<&Question, ResponseError> {
        let question = self
            .question(id)
            .ok_or(ResponseError::UnknownQuestion(id))?;
        if !question.accepts(value) {
            return Err(ResponseError::InvalidOption {
                question: id,
                value,
            });
        }
        Ok(question)
    }

    fn validate(&self) -> Result<(), BankError> {
        if self.questions.is_empty() {
            return Err(BankError::Empty);
        }

        let mut seen = BTreeSet::new();
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(BankError::DuplicateQuestion(question.id));
            }
            if question.options.is_empty() {
                return Err(BankError::NoOptions(question.id));
            }

            let mut values = BTreeSet::new();
            for option in &question.options {
                if option.value > MAX_ANSWER_VALUE {
                    return Err(BankError::OptionOutOfRange {
                        question: question.id,
                        value: option.value,
                    });
                }
                if !values.insert(option.value) {
                    return Err(BankError::DuplicateOption {
                        question: question.id,
                        value: option.value,
                    });
                }
            }

            if !self
                .questions_for_pillar(question.primary_pillar)
                .contains(&question.id)
            {
                return Err(BankError::PrimaryPillarUnmapped {
                    question: question.id,
                    pillar: question.primary_pillar,
                });
            }
        }

        for pillar in Pillar::ordered() {
            let mapped = self.questions_for_pillar(pillar);
            if mapped.is_empty() {
                return Err(BankError::EmptyPillar(pillar));
            }
            if let Some(unknown) = mapped.iter().find(|id| !seen.contains(*id)) {
                return Err(BankError::UnknownMappedQuestion {
                    pillar,
                    question: *unknown,
                });
            }
        }

        Ok(())
    }
}

/// Static-data inconsistencies detected while building a bank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BankError {
    #[error("question bank has no questions")]
    Empty,
    #[error("question {0} is defined more than once")]
    DuplicateQuestion(QuestionId),
    #[error("question {0} has no options")]
    NoOptions(QuestionId),
    #[error("question {question} has option value {value} outside 0..=3")]
    OptionOutOfRange { question: QuestionId, value: u8 },
    #[error("question {question} repeats option value {value}")]
    DuplicateOption { question: QuestionId, value: u8 },
    #[error("question {question} is missing from its primary pillar {pillar}")]
    PrimaryPillarUnmapped { question: QuestionId, pillar: Pillar },
    #[error("pillar {0} has no mapped questions")]
    EmptyPillar(Pillar),
    #[error("pillar {pillar} references unknown question {question}")]
    UnknownMappedQuestion { pillar: Pillar, question: QuestionId },
}

fn ids(raw: &[u16]) -> Vec<QuestionId> {
    raw.iter().copied().map(QuestionId).collect()
}

fn standard_mapping() -> BTreeMap<Pillar, Vec<QuestionId>> {
    BTreeMap::from([
        (Pillar::Governance, ids(&[1, 6, 9])),
        (Pillar::Risk, ids(&[3, 6, 7])),
        (Pillar::Compliance, ids(&[2, 10])),
        (Pillar::DataManagement, ids(&[5, 8])),
        (Pillar::ControlsAndMitigation, ids(&[4, 8, 10])),
    ])
}

fn options(labels: [&'static str; 4]) -> Vec<QuestionOption> {
    labels
        .into_iter()
        .zip(0u8..)
        .map(|(label, value)| QuestionOption { value, label })
        .collect()
}

fn standard_questions() -> Vec<Question> {
    vec![
        Question {
            id: QuestionId(1),
            text: "Sua organização possui um Conselho de Administração ou órgão colegiado equivalente que se reúne regularmente?",
            primary_pillar: Pillar::Governance,
            themes: vec![Pillar::Governance],
            options: options([
                "Não possuímos órgãos colegiados",
                "Órgãos informais ou reuniões esporádicas",
                "Conselho estruturado com reuniões semestrais",
                "Conselho de Administração ativo com reuniões mensais/bimestrais",
            ]),
        },
        Question {
            id: QuestionId(2),
            text: "Qual é o nível de formalização e documentação de processos críticos de conformidade regulatória (SUSEP/CNSP)?",
            primary_pillar: Pillar::Compliance,
            themes: vec![Pillar::Compliance],
            options: options([
                "Processos não documentados",
                "Documentação parcial ou desatualizada",
                "Processos documentados e revisados anualmente",
                "Full compliance documentado com trilhas de auditoria",
            ]),
        },
        Question {
            id: QuestionId(3),
            text: "Sua empresa mantém uma matriz de riscos estratégicos atualizada e realiza avaliações periódicas?",
            primary_pillar: Pillar::Risk,
            themes: vec![Pillar::Risk],
            options: options([
                "Não possuímos matriz de riscos formalizada",
                "Existe matriz, mas desatualizada ou informal",
                "Matriz documentada com revisões anuais",
                "Matriz integrada ao planejamento com revisões trimestrais",
            ]),
        },
        Question {
            id: QuestionId(4),
            text: "Existe segregação clara de funções entre aprovação, execução e supervisão nas operações críticas?",
            primary_pillar: Pillar::ControlsAndMitigation,
            themes: vec![Pillar::ControlsAndMitigation],
            options: options([
                "Sem segregação clara de funções",
                "Segregação parcial dependente de poucas pessoas",
                "Segregação formalizada na maioria dos processos",
                "Segregação rígida e automatizada por sistema",
            ]),
        },
        Question {
            id: QuestionId(5),
            text: "Sua organização está em conformidade integral com a LGPD e possui políticas documentadas de proteção de dados?",
            primary_pillar: Pillar::DataManagement,
            themes: vec![Pillar::DataManagement],
            options: options([
                "Não iniciamos o processo de adequação",
                "Adequação em andamento, sem políticas formais",
                "Políticas implementadas com DPO nomeado",
                "Conformidade total com auditorias de dados recorrentes",
            ]),
        },
        Question {
            id: QuestionId(6),
            text: "Existe um comitê formal de Risco e/ou Auditoria com participação do conselho?",
            primary_pillar: Pillar::Governance,
            themes: vec![Pillar::Governance, Pillar::Risk],
            options: options([
                "Não existem comitês de apoio",
                "Comitês informais sem reporte ao conselho",
                "Comitê formalizado com atas de reuniões",
                "Comitês independentes com participação direta do conselho",
            ]),
        },
        Question {
            id: QuestionId(7),
            text: "Qual é a cobertura de riscos operacionais documentados versus os riscos identificados na sua avaliação interna?",
            primary_pillar: Pillar::Risk,
            themes: vec![Pillar::Risk],
            options: options([
                "Identificamos menos de 20% dos riscos",
                "Mapeamento básico (20-50%)",
                "Mapeamento avançado (50-80%)",
                "Cobertura total (>90%) com planos de mitigação",
            ]),
        },
        Question {
            id: QuestionId(8),
            text: "Existem controles internos automatizados (tecnologia) para segregação de funções e auditoria de transações?",
            primary_pillar: Pillar::ControlsAndMitigation,
            themes: vec![Pillar::ControlsAndMitigation, Pillar::DataManagement],
            options: options([
                "Controles manuais ou inexistentes",
                "Poucos controles automatizados em sistemas legados",
                "Automação na maioria das transações críticas",
                "Ecossistema digital com monitoramento contínuo",
            ]),
        },
        Question {
            id: QuestionId(9),
            text: "Sua organização possui Seguro D&O (Directors and Officers) ativo e acompanhado?",
            primary_pillar: Pillar::Governance,
            themes: vec![Pillar::Governance],
            options: options([
                "Não possuímos Seguro D&O",
                "D&O em fase de cotação",
                "Seguro ativo, mas sem revisão recente de limites",
                "Seguro robusto com limites revisados trimestralmente",
            ]),
        },
        Question {
            id: QuestionId(10),
            text: "Com que frequência auditorias internas são realizadas sobre processos de conformidade e controles internos?",
            primary_pillar: Pillar::Compliance,
            themes: vec![Pillar::Compliance, Pillar::ControlsAndMitigation],
            options: options([
                "Não realizamos auditorias internas",
                "Auditorias eventuais (mais de 2 anos)",
                "Auditorias anuais sistemáticas",
                "Monitoramento contínuo ou auditorias trimestrais",
            ]),
        },
    ]
}
