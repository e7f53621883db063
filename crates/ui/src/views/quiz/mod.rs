mod panels;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::SessionStatus;

use crate::context::QuizSlots;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{QuestionScreenVm, QuizVm};
use panels::{AnswerButtons, FeedbackNote};

#[component]
pub fn QuizView() -> Element {
    let mut slots = use_context::<QuizSlots>();
    let navigator = use_navigator();
    let mut error = use_signal(|| None::<ViewError>);

    let select = use_callback(move |answer: String| {
        let pending = match slots.session.write().as_mut().map(|vm| vm.begin_selection(&answer)) {
            Some(Ok(pending)) => pending,
            Some(Err(err)) => {
                error.set(Some(err));
                return;
            }
            None => None,
        };
        error.set(None);
        let Some(pending) = pending else {
            return;
        };
        spawn(async move {
            let outcome = pending.run().await;
            // The session may have been replaced while grading was in flight.
            if let Some(vm) = slots.session.write().as_mut() {
                vm.finish_grading(outcome);
            }
        });
    });

    let next = use_callback(move |()| {
        let status = slots.session.write().as_mut().map(QuizVm::advance);
        if status == Some(SessionStatus::Complete) {
            let results = slots.session.read().as_ref().map(QuizVm::results);
            slots.results.set(results);
            navigator.push(Route::Results {});
        }
    });

    let back = use_callback(move |()| {
        if let Some(vm) = slots.session.write().as_mut() {
            vm.previous();
        }
    });

    let screen = slots.session.read().as_ref().map(QuizVm::screen);
    let screen = match screen {
        None => {
            return rsx! {
                div { class: "page quiz",
                    p { "No quiz in progress." }
                    Link { to: Route::Home {}, "Make a quiz" }
                }
            };
        }
        Some(Err(err)) => {
            return rsx! {
                div { class: "page quiz",
                    p { class: "error", "{err.message()}" }
                    Link { to: Route::Home {}, "Back to start" }
                }
            };
        }
        Some(Ok(screen)) => screen,
    };

    rsx! {
        QuestionCard {
            screen,
            error: error(),
            on_select: select,
            on_next: next,
            on_back: back,
        }
    }
}

#[component]
fn QuestionCard(
    screen: QuestionScreenVm,
    error: Option<ViewError>,
    on_select: Callback<String>,
    on_next: Callback<()>,
    on_back: Callback<()>,
) -> Element {
    let next_label = if screen.is_last { "Finish" } else { "Next" };

    rsx! {
        div { class: "page quiz",
            div { class: "progress", "{screen.progress_label}" }
            h2 { class: "question", "{screen.text}" }

            if let Some(diagnostic) = screen.diagnostic.clone() {
                p { class: "diagnostic", "{diagnostic}" }
            }

            AnswerButtons {
                engine: screen.engine,
                options: screen.options.clone(),
                locked: screen.locked,
                on_select,
            }

            if screen.grading {
                p { class: "grading", "Checking your answer…" }
            }
            if let Some(feedback) = screen.feedback.clone() {
                FeedbackNote { feedback }
            }
            if let Some(message) = screen.error.clone() {
                p { class: "error question-error", "{message}" }
            }
            if let Some(err) = error {
                p { class: "error", "{err.message()}" }
            }

            div { class: "nav",
                button {
                    id: "quiz-back",
                    class: "btn",
                    disabled: !screen.can_go_back,
                    onclick: move |_| on_back.call(()),
                    "Previous"
                }
                button {
                    id: "quiz-next",
                    class: "btn primary",
                    disabled: !screen.can_advance,
                    onclick: move |_| on_next.call(()),
                    "{next_label}"
                }
            }
        }
    }
}
