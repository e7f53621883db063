use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::QuizSlots;
use crate::routes::Route;
use crate::vm::{ResultsVm, ReviewRowVm};

#[component]
pub fn ResultsView() -> Element {
    let mut slots = use_context::<QuizSlots>();
    let navigator = use_navigator();

    let Some(results) = slots.results.read().clone() else {
        return rsx! {
            div { class: "page results",
                p { "No finished quiz to show." }
                Link { to: Route::Home {}, "Make a quiz" }
            }
        };
    };

    rsx! {
        ResultsSummary { results }
        div { class: "actions",
            button {
                id: "results-restart",
                class: "btn primary",
                onclick: move |_| {
                    slots.reset();
                    navigator.push(Route::Home {});
                },
                "Start over"
            }
        }
    }
}

#[component]
fn ResultsSummary(results: ResultsVm) -> Element {
    rsx! {
        div { class: "page results",
            h2 { "Results" }
            p { class: "score", "Score: {results.score_label()} ({results.percent}%)" }
            if let Some(elapsed) = results.elapsed.clone() {
                p { class: "elapsed", "Time: {elapsed}" }
            }
            if let Some(note) = results.unverified_note() {
                p { class: "unverified", "{note}" }
            }
            ol { class: "review",
                for row in results.rows.clone() {
                    ReviewRow { key: "{row.number}", row }
                }
            }
        }
    }
}

#[component]
fn ReviewRow(row: ReviewRowVm) -> Element {
    let class = match row.is_correct {
        Some(true) => "row correct",
        Some(false) => "row incorrect",
        None => "row skipped",
    };
    let submitted = row.submitted.clone().unwrap_or_else(|| "—".to_string());

    rsx! {
        li { class,
            p { class: "question", "{row.text}" }
            p { "Your answer: {submitted}" }
            if let Some(correct) = row.correct_answer.clone() {
                p { "Correct answer: {correct}" }
            }
            if !row.explanation.is_empty() {
                p { class: "explanation", "{row.explanation}" }
            }
            if row.is_correct.is_some() && !row.verified {
                p { class: "unverified", "Checked offline" }
            }
        }
    }
}
