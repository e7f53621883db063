use dioxus::prelude::*;
use services::EngineKind;

use crate::vm::{FeedbackVm, OptionVm};

#[component]
pub(super) fn AnswerButtons(
    engine: EngineKind,
    options: Vec<OptionVm>,
    locked: bool,
    on_select: Callback<String>,
) -> Element {
    let class = match engine {
        EngineKind::TrueFalse => "answers true-false",
        EngineKind::MultipleChoice => "answers multiple-choice",
        EngineKind::Unsupported => return rsx! {},
    };

    rsx! {
        div { class,
            for option in options {
                button {
                    key: "{option.value}",
                    class: answer_class(option.selected),
                    "data-placeholder": option.placeholder,
                    disabled: locked,
                    onclick: {
                        let value = option.value.clone();
                        move |_| on_select.call(value.clone())
                    },
                    "{option.label}"
                }
            }
        }
    }
}

fn answer_class(selected: bool) -> &'static str {
    if selected { "btn answer selected" } else { "btn answer" }
}

#[component]
pub(super) fn FeedbackNote(feedback: FeedbackVm) -> Element {
    let verdict = if feedback.is_correct { "Correct" } else { "Incorrect" };
    let class = if feedback.is_correct {
        "feedback correct"
    } else {
        "feedback incorrect"
    };

    rsx! {
        div { class,
            strong { "{verdict}" }
            if !feedback.is_correct {
                p { "Answer: {feedback.correct_answer}" }
            }
            if !feedback.explanation.is_empty() {
                p { class: "explanation", "{feedback.explanation}" }
            }
            if !feedback.verified {
                p { class: "unverified", "Checked offline." }
            }
        }
    }
}
