use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The five GRC evaluation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Governance,
    Risk,
    Compliance,
    DataManagement,
    ControlsAndMitigation,
}

impl Pillar {
    pub const COUNT: usize = 5;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Governance,
            Self::Risk,
            Self::Compliance,
            Self::DataManagement,
            Self::ControlsAndMitigation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Governance => "Governança",
            Self::Risk => "Risco",
            Self::Compliance => "Conformidade",
            Self::DataManagement => "Gestão de Dados",
            Self::ControlsAndMitigation => "Controles & Mitigação",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u16);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// Highest ordinal maturity value an option may carry.
pub const MAX_ANSWER_VALUE: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub value: u8,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: &'static str,
    pub primary_pillar: Pillar,
    pub themes: Vec<Pillar>,
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn accepts(&self, value: u8) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    pub fn option_label(&self, value: u8) -> Option<&'static str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label)
    }
}

/// Session metadata captured during onboarding and echoed into the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub company_name: String,
    #[serde(default)]
    pub cnpj: String,
    pub segment: String,
    pub employees: u32,
    #[serde(default)]
    pub responsible_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: String,
}

/// Answers keyed by question id. Absent entries score as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseSet {
    answers: BTreeMap<QuestionId, u8>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, replacing any earlier one for the same question.
    pub(crate) fn record(&mut self, question: QuestionId, value: u8) -> Option<u8> {
        self.answers.insert(question, value)
    }

    pub fn get(&self, question: QuestionId) -> Option<u8> {
        self.answers.get(&question).copied()
    }

    pub fn contains(&self, question: QuestionId) -> bool {
        self.answers.contains_key(&question)
    }

    pub fn value_or_zero(&self, question: QuestionId) -> u8 {
        self.get(question).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, u8)> + '_ {
        self.answers.iter().map(|(id, value)| (*id, *value))
    }
}

/// Raised when externally supplied answers do not fit the question bank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("question {0} is not part of the questionnaire")]
    UnknownQuestion(QuestionId),
    #[error("value {value} is not an option of question {question}")]
    InvalidOption { question: QuestionId, value: u8 },
}
