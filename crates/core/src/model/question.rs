use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::ids::QuestionId;

//
// ─── QUESTION KIND ─────────────────────────────────────────────────────────────
//

/// Wire token for a true statement.
pub const WIRE_TRUE: &str = "TRUE";
/// Wire token for a false statement.
pub const WIRE_FALSE: &str = "FALSE";

/// Question type as reported by the generation backend.
///
/// Unknown tokens are kept verbatim in `Unsupported` so the UI can show what
/// it received instead of failing the whole bank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionKind {
    TrueFalse,
    MultipleChoice,
    Unsupported(String),
}

impl QuestionKind {
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            QuestionKind::TrueFalse => "TRUE_FALSE",
            QuestionKind::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionKind::Unsupported(raw) => raw,
        }
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, QuestionKind::Unsupported(_))
    }

    /// # Errors
    ///
    /// Returns `Error::UnsupportedQuestionType` for unknown kinds.
    pub fn require_supported(&self) -> Result<(), Error> {
        match self {
            QuestionKind::Unsupported(raw) => Err(Error::UnsupportedQuestionType { raw: raw.clone() }),
            _ => Ok(()),
        }
    }
}

impl From<String> for QuestionKind {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TRUE_FALSE" => QuestionKind::TrueFalse,
            "MULTIPLE_CHOICE" => QuestionKind::MultipleChoice,
            _ => QuestionKind::Unsupported(raw),
        }
    }
}

impl From<QuestionKind> for String {
    fn from(kind: QuestionKind) -> Self {
        kind.as_wire().to_string()
    }
}

//
// ─── TRUE / FALSE CHOICE ───────────────────────────────────────────────────────
//

/// The two buttons a true/false question offers.
///
/// Users pick `O` or `X`; the backend and `correct_answer` speak `TRUE`/`FALSE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrueFalseChoice {
    O,
    X,
}

impl TrueFalseChoice {
    pub const ALL: [TrueFalseChoice; 2] = [TrueFalseChoice::O, TrueFalseChoice::X];

    /// Accepts the UI labels as well as wire tokens, ignoring case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("O") || raw.eq_ignore_ascii_case(WIRE_TRUE) {
            Some(TrueFalseChoice::O)
        } else if raw.eq_ignore_ascii_case("X") || raw.eq_ignore_ascii_case(WIRE_FALSE) {
            Some(TrueFalseChoice::X)
        } else {
            None
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TrueFalseChoice::O => "O",
            TrueFalseChoice::X => "X",
        }
    }

    #[must_use]
    pub fn wire(self) -> &'static str {
        match self {
            TrueFalseChoice::O => WIRE_TRUE,
            TrueFalseChoice::X => WIRE_FALSE,
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single generated quiz question. Immutable once a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    question_id: Option<QuestionId>,
    text: String,
    #[serde(rename = "type")]
    kind: QuestionKind,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: String,
}

impl Question {
    #[must_use]
    pub fn new(
        question_id: Option<QuestionId>,
        text: impl Into<String>,
        kind: QuestionKind,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            question_id,
            text: text.into(),
            kind,
            options,
            correct_answer: correct_answer.into(),
        }
    }

    #[must_use]
    pub fn true_false(question_id: Option<QuestionId>, text: impl Into<String>, answer: bool) -> Self {
        let correct = if answer { WIRE_TRUE } else { WIRE_FALSE };
        Self::new(question_id, text, QuestionKind::TrueFalse, Vec::new(), correct)
    }

    #[must_use]
    pub fn multiple_choice<S: Into<String>>(
        question_id: Option<QuestionId>,
        text: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self::new(
            question_id,
            text,
            QuestionKind::MultipleChoice,
            options.into_iter().map(Into::into).collect(),
            correct_answer,
        )
    }

    #[must_use]
    pub fn question_id(&self) -> Option<QuestionId> {
        self.question_id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Maps a UI-facing answer into the vocabulary `correct_answer` uses.
    ///
    /// True/false labels become `TRUE`/`FALSE`; anything else is trimmed and
    /// passed through.
    #[must_use]
    pub fn normalize_answer(&self, answer: &str) -> String {
        match self.kind {
            QuestionKind::TrueFalse => TrueFalseChoice::parse(answer)
                .map_or_else(|| answer.trim().to_string(), |choice| choice.wire().to_string()),
            _ => answer.trim().to_string(),
        }
    }
}
