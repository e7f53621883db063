use std::collections::HashSet;

use crate::error::Error;
use crate::model::ids::QuestionKey;
use crate::model::question::Question;

/// How a bank keys per-question state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityScheme {
    /// Every question carries a distinct backend id.
    ById,
    /// At least one id is missing or repeated; questions are keyed by index.
    ByPosition,
}

/// Ordered questions for one session. Never reordered after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    scheme: IdentityScheme,
}

impl QuestionBank {
    /// Wraps generated questions and fixes the identity scheme for the session.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        let scheme = Self::pick_scheme(&questions);
        Self { questions, scheme }
    }

    fn pick_scheme(questions: &[Question]) -> IdentityScheme {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in questions {
            match question.question_id() {
                Some(id) if seen.insert(id) => {}
                _ => return IdentityScheme::ByPosition,
            }
        }
        IdentityScheme::ById
    }

    #[must_use]
    pub fn scheme(&self) -> IdentityScheme {
        self.scheme
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// # Errors
    ///
    /// Returns `Error::OutOfRange` when `index` is past the end.
    pub fn get(&self, index: usize) -> Result<&Question, Error> {
        self.questions.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.questions.len(),
        })
    }

    /// Resolves the session identity of the question at `index`.
    ///
    /// This is the only place state keys are derived.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` when `index` is past the end.
    pub fn identity_of(&self, index: usize) -> Result<QuestionKey, Error> {
        let question = self.get(index)?;
        Ok(match (self.scheme, question.question_id()) {
            (IdentityScheme::ById, Some(id)) => QuestionKey::Id(id),
            _ => QuestionKey::Position(index),
        })
    }

    /// Integer handed to the grading backend for the question at `index`.
    ///
    /// The question's own id whenever it has one, even in a positional bank;
    /// the index otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` when `index` is past the end.
    pub fn wire_id_of(&self, index: usize) -> Result<u64, Error> {
        let question = self.get(index)?;
        Ok(question
            .question_id()
            .map_or_else(|| u64::try_from(index).unwrap_or(u64::MAX), |id| id.value()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Questions paired with their session identity, in bank order.
    pub fn keyed(&self) -> impl Iterator<Item = (QuestionKey, &Question)> {
        self.questions
            .iter()
            .enumerate()
            .map(move |(index, question)| match (self.scheme, question.question_id()) {
                (IdentityScheme::ById, Some(id)) => (QuestionKey::Id(id), question),
                _ => (QuestionKey::Position(index), question),
            })
    }
}

impl From<Vec<Question>> for QuestionBank {
    fn from(questions: Vec<Question>) -> Self {
        Self::new(questions)
    }
}
