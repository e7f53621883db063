use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::model::StageBoard;
use services::{PendingOperation, SequenceExit, run_stages};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::context::{AppContext, QuizSlots};
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{finish_generation, map_stage_rows};

#[component]
pub fn LoadingView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut slots = use_context::<QuizSlots>();
    let navigator = use_navigator();

    let mut board = use_signal(StageBoard::pending);
    let mut failure = use_signal(|| None::<ViewError>);
    let cancel = use_hook(CancellationToken::new);
    {
        let cancel = cancel.clone();
        use_drop(move || cancel.cancel());
    }

    let settlement = use_hook(|| {
        slots
            .generation
            .peek()
            .as_ref()
            .map(PendingOperation::settlement)
    });

    {
        let settlement = settlement.clone();
        use_hook(move || {
            let Some(settlement) = settlement else {
                return;
            };
            let quiz = ctx.quiz();
            let timings = quiz.stage_timings();
            spawn(async move {
                let exit = run_stages(
                    timings,
                    &settlement,
                    &cancel,
                    |snapshot| board.set(snapshot),
                    || debug!("loading: stages complete"),
                )
                .await;
                if exit == SequenceExit::Cancelled {
                    return;
                }

                let pending = slots.generation.write().take();
                match finish_generation(&quiz, pending).await {
                    Ok(vm) => {
                        slots.session.set(Some(vm));
                        navigator.replace(Route::Quiz {});
                    }
                    Err(err) => failure.set(Some(err)),
                }
            });
        });
    }

    if settlement.is_none() {
        return rsx! {
            div { class: "page loading",
                p { "Nothing is being generated right now." }
                Link { to: Route::Home {}, "Back to start" }
            }
        };
    }

    let rows = map_stage_rows(&board.read());
    rsx! {
        div { class: "page loading",
            h2 { "Building your quiz" }
            ol { class: "stages",
                for row in rows {
                    li { class: "{row.class}",
                        span { class: "marker", "{row.marker}" }
                        span { class: "label", "{row.label}" }
                    }
                }
            }
            if let Some(err) = failure() {
                div { class: "error",
                    p { "{err.message()}" }
                    Link { to: Route::Home {}, "Try again" }
                }
            }
        }
    }
}
