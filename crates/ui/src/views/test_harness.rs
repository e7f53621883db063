use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{GradeResult, GradeSource, Question, QuestionBank, answers_match};
use quiz_core::time::fixed_now;
use services::{
    AnswerGrader, Clock, GenerationError, GenerationRequest, GradingError, GradingRoute,
    QuestionGenerator, QuizService, SessionCredentials,
};

use crate::context::{AppContext, QuizSlots, UiApp, build_app_context};
use crate::views::{HomeView, LoadingView, QuizView, ResultsView};
use crate::vm::{QuizVm, ResultsVm};

/// Treats `TRUE` as the only correct answer.
struct EchoGrader;

#[async_trait]
impl AnswerGrader for EchoGrader {
    async fn grade(
        &self,
        _question_id: u64,
        answer: &str,
        _route: GradingRoute,
    ) -> Result<GradeResult, GradingError> {
        Ok(GradeResult {
            correct_answer: "TRUE".into(),
            submitted_answer: answer.into(),
            is_correct: answers_match(answer, "TRUE"),
            explanation: String::new(),
            source: GradeSource::Server,
        })
    }
}

struct SingleQuestion;

#[async_trait]
impl QuestionGenerator for SingleQuestion {
    async fn generate(&self, _request: &GenerationRequest) -> Result<QuestionBank, GenerationError> {
        Ok(QuestionBank::new(vec![Question::true_false(
            None,
            "Generated question",
            true,
        )]))
    }
}

struct TestApp {
    quiz: Arc<QuizService>,
}

impl UiApp for TestApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    fn default_question_count(&self) -> u8 {
        5
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Home,
    Loading { with_generation: bool },
    Quiz(Vec<Question>),
    Results(Option<ResultsVm>),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    let slots = use_context_provider(QuizSlots::new);
    let view = use_context_provider(|| props.view.clone());
    use_hook(|| seed(slots, &ctx, &view));
    rsx! { Router::<TestRoute> {} }
}

fn seed(mut slots: QuizSlots, ctx: &AppContext, view: &ViewKind) {
    match view {
        ViewKind::Home => {}
        ViewKind::Loading { with_generation } => {
            if *with_generation {
                let request = GenerationRequest::new("Crabs are crustaceans.", 1)
                    .expect("valid request");
                slots.generation.set(Some(ctx.quiz().generate(request)));
            }
        }
        ViewKind::Quiz(questions) => {
            if let Ok(controller) = ctx.quiz().start_session(QuestionBank::new(questions.clone())) {
                slots.session.set(Some(QuizVm::new(controller)));
            }
        }
        ViewKind::Results(results) => slots.results.set(results.clone()),
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Loading { .. } => rsx! { LoadingView {} },
        ViewKind::Quiz(_) => rsx! { QuizView {} },
        ViewKind::Results(_) => rsx! { ResultsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let quiz = Arc::new(QuizService::new(
        Clock::fixed(fixed_now()),
        Arc::new(SingleQuestion),
        Arc::new(EchoGrader),
        Arc::new(SessionCredentials::guest()),
    ));
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { quiz }),
            view,
        },
    );
    ViewHarness { dom }
}
