use super::bank::QuestionBank;
use super::domain::{Question, QuestionId, ResponseSet};
use super::randomizer::shuffle_with;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Position of a questionnaire session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum SessionState {
    AtQuestion(usize),
    Completed,
}

/// Result of a user action against the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Recorded {
        question: QuestionId,
        replaced: Option<u8>,
    },
    Advanced {
        index: usize,
    },
    Retreated {
        index: usize,
    },
    /// The last question was confirmed; carries the finalized answers.
    Completed(ResponseSet),
    Rejected(Rejection),
}

impl Transition {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Transition::Rejected(_))
    }
}

/// Why an action left the session unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Unanswered,
    AtFirstQuestion,
    InvalidOption { question: QuestionId, value: u8 },
    SessionCompleted,
}

impl Rejection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unanswered => "answer the current question before continuing",
            Self::AtFirstQuestion => "already at the first question",
            Self::InvalidOption { .. } => "value is not an option of the current question",
            Self::SessionCompleted => "questionnaire already completed",
        }
    }
}

/// One respondent walking through a shuffled presentation order.
///
/// Scoring works on question ids, so the order only affects presentation.
#[derive(Debug)]
pub struct QuestionnaireSession<'a> {
    order: Vec<&'a Question>,
    responses: ResponseSet,
    state: SessionState,
}

impl<'a> QuestionnaireSession<'a> {
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self::with_rng(bank, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(bank: &'a QuestionBank, rng: &mut R) -> Self {
        let canonical: Vec<&'a Question> = bank.questions().iter().collect();
        Self::from_order(shuffle_with(&canonical, rng))
    }

    /// Presents questions in bank order.
    pub fn in_bank_order(bank: &'a QuestionBank) -> Self {
        Self::from_order(bank.questions().iter().collect())
    }

    fn from_order(order: Vec<&'a Question>) -> Self {
        let state = if order.is_empty() {
            SessionState::Completed
        } else {
            SessionState::AtQuestion(0)
        };

        Self {
            order,
            responses: ResponseSet::new(),
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn order(&self) -> &[&'a Question] {
        &self.order
    }

    pub fn total_questions(&self) -> usize {
        self.order.len()
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::AtQuestion(index) => Some(index),
            SessionState::Completed => None,
        }
    }

    pub fn current_question(&self) -> Option<&'a Question> {
        self.current_index().map(|index| self.order[index])
    }

    pub fn current_answer(&self) -> Option<u8> {
        self.current_question()
            .and_then(|question| self.responses.get(question.id))
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index()
            .map(|index| index + 1 == self.order.len())
            .unwrap_or(false)
    }

    /// True exactly when the current question already has an answer.
    pub fn can_advance(&self) -> bool {
        self.current_answer().is_some()
    }

    /// `(index + 1) / total`, or 1.0 once completed.
    pub fn progress(&self) -> f64 {
        match self.state {
            SessionState::AtQuestion(index) => (index + 1) as f64 / self.order.len() as f64,
            SessionState::Completed => 1.0,
        }
    }

    pub fn answer(&mut self, value: u8) -> Transition {
        let Some(question) = self.current_question() else {
            return self.reject(Rejection::SessionCompleted);
        };

        if !question.accepts(value) {
            return self.reject(Rejection::InvalidOption {
                question: question.id,
                value,
            });
        }

        let replaced = self.responses.record(question.id, value);
        Transition::Recorded {
            question: question.id,
            replaced,
        }
    }

    pub fn next(&mut self) -> Transition {
        let Some(index) = self.current_index() else {
            return self.reject(Rejection::SessionCompleted);
        };

        if !self.can_advance() {
            return self.reject(Rejection::Unanswered);
        }

        if self.is_last_question() {
            self.state = SessionState::Completed;
            debug!(answered = self.responses.len(), "questionnaire completed");
            return Transition::Completed(self.responses.clone());
        }

        self.state = SessionState::AtQuestion(index + 1);
        Transition::Advanced { index: index + 1 }
    }

    pub fn previous(&mut self) -> Transition {
        match self.current_index() {
            None => self.reject(Rejection::SessionCompleted),
            Some(0) => self.reject(Rejection::AtFirstQuestion),
            Some(index) => {
                self.state = SessionState::AtQuestion(index - 1);
                Transition::Retreated { index: index - 1 }
            }
        }
    }

    fn reject(&self, reason: Rejection) -> Transition {
        debug!(state = ?self.state, reason = reason.label(), "questionnaire transition rejected");
        Transition::Rejected(reason)
    }
}
