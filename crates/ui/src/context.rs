use std::sync::Arc;

use dioxus::prelude::*;
use services::{PendingGeneration, QuizService};

use crate::vm::{QuizVm, ResultsVm};

pub trait UiApp: Send + Sync {
    fn quiz_service(&self) -> Arc<QuizService>;

    /// Question count pre-filled on the home screen.
    fn default_question_count(&self) -> u8;
}

#[derive(Clone)]
pub struct AppContext {
    quiz: Arc<QuizService>,
    default_question_count: u8,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz: app.quiz_service(),
            default_question_count: app.default_question_count(),
        }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn default_question_count(&self) -> u8 {
        self.default_question_count
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// State handed from one screen to the next: the generation in flight, the
/// running quiz and the finished results.
#[derive(Clone, Copy)]
pub struct QuizSlots {
    pub generation: Signal<Option<PendingGeneration>>,
    pub session: Signal<Option<QuizVm>>,
    pub results: Signal<Option<ResultsVm>>,
}

impl QuizSlots {
    /// Must be called inside a component scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: Signal::new(None),
            session: Signal::new(None),
            results: Signal::new(None),
        }
    }

    /// Drops whatever a previous quiz left behind.
    pub fn reset(&mut self) {
        if let Some(pending) = self.generation.write().take() {
            pending.abort();
        }
        self.session.set(None);
        self.results.set(None);
    }
}
