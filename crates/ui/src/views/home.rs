use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::GenerationRequest;
use tracing::debug;

use crate::context::{AppContext, QuizSlots};
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut slots = use_context::<QuizSlots>();
    let navigator = use_navigator();

    let mut text = use_signal(String::new);
    let mut count = use_signal(|| ctx.default_question_count().to_string());
    let mut error = use_signal(|| None::<String>);

    let generate = use_callback(move |()| {
        let parsed = count.read().trim().parse::<u8>();
        let request = match parsed {
            Ok(n) => GenerationRequest::new(text.read().clone(), n),
            Err(_) => {
                error.set(Some("Enter a number of questions.".to_string()));
                return;
            }
        };
        match request {
            Ok(request) => {
                slots.reset();
                debug!(questions = request.question_count(), "starting generation");
                let pending = ctx.quiz().generate(request);
                slots.generation.set(Some(pending));
                error.set(None);
                navigator.push(Route::Loading {});
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    rsx! {
        div { class: "page home",
            h2 { "Make a quiz" }
            p { class: "hint", "Paste your study material and we'll turn it into questions." }
            textarea {
                id: "source-text",
                rows: 12,
                placeholder: "Study material",
                value: "{text}",
                oninput: move |evt| text.set(evt.value()),
            }
            label { r#for: "question-count", "Questions" }
            input {
                id: "question-count",
                r#type: "number",
                min: 1,
                max: 20,
                value: "{count}",
                oninput: move |evt| count.set(evt.value()),
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            button {
                id: "generate",
                class: "btn primary",
                disabled: text.read().trim().is_empty(),
                onclick: move |_| generate.call(()),
                "Generate quiz"
            }
        }
    }
}
