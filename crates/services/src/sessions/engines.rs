use quiz_core::model::{Question, TrueFalseChoice};

/// Number of buttons a multiple-choice question always shows.
pub const MULTIPLE_CHOICE_OPTION_COUNT: usize = 4;

/// A selectable answer as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub label: String,
    /// Value passed to `select`; the controller normalizes it for grading.
    pub value: String,
    /// Stand-in for an option the generator failed to supply.
    pub placeholder: bool,
}

impl AnswerOption {
    fn real(text: &str) -> Self {
        Self {
            label: text.to_string(),
            value: text.to_string(),
            placeholder: false,
        }
    }

    fn placeholder(slot: usize) -> Self {
        let text = format!("Option {}", slot + 1);
        Self {
            label: text.clone(),
            value: text,
            placeholder: true,
        }
    }
}

/// O/X buttons for a true/false question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrueFalseEngine {
    options: Vec<AnswerOption>,
}

impl Default for TrueFalseEngine {
    fn default() -> Self {
        Self {
            options: TrueFalseChoice::ALL
                .into_iter()
                .map(|choice| AnswerOption::real(choice.label()))
                .collect(),
        }
    }
}

impl TrueFalseEngine {
    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn accepts(&self, answer: &str) -> bool {
        TrueFalseChoice::parse(answer).is_some()
    }
}

/// Option buttons for a multiple-choice question.
///
/// Short option lists are padded with placeholders up to
/// [`MULTIPLE_CHOICE_OPTION_COUNT`] so the question stays answerable; the
/// question's correct answer is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoiceEngine {
    options: Vec<AnswerOption>,
    degraded: bool,
}

impl MultipleChoiceEngine {
    #[must_use]
    pub fn for_question(question: &Question) -> Self {
        let mut options: Vec<AnswerOption> = question
            .options()
            .iter()
            .map(|text| AnswerOption::real(text))
            .collect();
        let degraded = options.len() < MULTIPLE_CHOICE_OPTION_COUNT;
        for slot in options.len()..MULTIPLE_CHOICE_OPTION_COUNT {
            options.push(AnswerOption::placeholder(slot));
        }
        Self { options, degraded }
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    /// True when placeholders were added.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    #[must_use]
    pub fn accepts(&self, answer: &str) -> bool {
        let answer = answer.trim();
        self.options.iter().any(|option| option.value == answer)
    }
}
