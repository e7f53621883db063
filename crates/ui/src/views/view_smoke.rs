use quiz_core::model::{Question, QuestionId, QuestionKind};

use super::test_harness::{ViewKind, setup_view_harness};
use crate::vm::{ResultsVm, ReviewRowVm};

fn true_false_bank() -> Vec<Question> {
    vec![
        Question::true_false(Some(QuestionId::new(1)), "Crabs have ten legs.", true),
        Question::true_false(Some(QuestionId::new(2)), "Crabs can fly.", false),
    ]
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Make a quiz"), "missing title in {html}");
    assert!(html.contains("Generate quiz"), "missing button in {html}");
    assert!(html.contains("Questions"), "missing count field in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_true_false_buttons() {
    let mut harness = setup_view_harness(ViewKind::Quiz(true_false_bank()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Crabs have ten legs."), "missing question in {html}");
    assert!(html.contains("1 / 2"), "missing progress in {html}");
    assert!(html.contains(">O<"), "missing O button in {html}");
    assert!(html.contains(">X<"), "missing X button in {html}");
    assert!(html.contains("Next"), "missing next in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_pads_short_multiple_choice() {
    let question = Question::multiple_choice(
        Some(QuestionId::new(7)),
        "Which keyword moves a value?",
        ["move", "ref"],
        "move",
    );
    let mut harness = setup_view_harness(ViewKind::Quiz(vec![question]));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains(">move<"), "missing option in {html}");
    assert!(html.contains("Option 3"), "missing placeholder in {html}");
    assert!(html.contains("Option 4"), "missing placeholder in {html}");
    assert!(html.contains("Finish"), "last question should offer finish in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_unsupported_diagnostic() {
    let question = Question::new(
        None,
        "Match each crab to its habitat.",
        QuestionKind::Unsupported("MATCHING".into()),
        Vec::new(),
        "a-1",
    );
    let mut harness = setup_view_harness(ViewKind::Quiz(vec![question]));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("MATCHING"), "missing diagnostic in {html}");
    assert!(!html.contains(">O<"), "unexpected answer buttons in {html}");
    let next = button_tag(&html, "quiz-next");
    assert!(!next.contains("disabled"), "unsupported question must be skippable: {next}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_blocks_next_until_answered() {
    let question = Question::true_false(None, "Crabs have ten legs.", true);
    let mut harness = setup_view_harness(ViewKind::Quiz(vec![question]));
    harness.rebuild();
    let html = harness.render();
    assert!(button_tag(&html, "quiz-next").contains("disabled"), "next enabled in {html}");
}

/// Attribute text of the button with `id`, up to its closing `>`.
fn button_tag<'a>(html: &'a str, id: &str) -> &'a str {
    let marker = format!("id=\"{id}\"");
    let start = html.find(&marker).unwrap_or_else(|| panic!("no #{id} in {html}"));
    let rest = &html[start..];
    &rest[..rest.find('>').unwrap_or(rest.len())]
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_session() {
    let mut harness = setup_view_harness(ViewKind::Quiz(Vec::new()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No quiz in progress."), "missing fallback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn loading_view_smoke_renders_stages() {
    let mut harness = setup_view_harness(ViewKind::Loading {
        with_generation: true,
    });
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Reading your material"), "missing stage in {html}");
    assert!(html.contains("Generating questions"), "missing stage in {html}");
    assert!(html.contains("Preparing your quiz"), "missing stage in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn loading_view_smoke_without_generation() {
    let mut harness = setup_view_harness(ViewKind::Loading {
        with_generation: false,
    });
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Nothing is being generated"),
        "missing fallback in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_score_and_review() {
    let results = ResultsVm {
        correct: 1,
        total: 2,
        percent: 50,
        unverified: 1,
        elapsed: Some("1:05".into()),
        rows: vec![
            ReviewRowVm {
                number: 1,
                text: "Crabs have ten legs.".into(),
                submitted: Some("O".into()),
                correct_answer: Some("TRUE".into()),
                is_correct: Some(true),
                explanation: "Decapods.".into(),
                verified: true,
            },
            ReviewRowVm {
                number: 2,
                text: "Crabs can fly.".into(),
                submitted: Some("O".into()),
                correct_answer: Some("FALSE".into()),
                is_correct: Some(false),
                explanation: String::new(),
                verified: false,
            },
        ],
    };
    let mut harness = setup_view_harness(ViewKind::Results(Some(results)));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Score: 1 / 2 (50%)"), "missing score in {html}");
    assert!(html.contains("Time: 1:05"), "missing time in {html}");
    assert!(html.contains("checked offline"), "missing unverified note in {html}");
    assert!(html.contains("Crabs can fly."), "missing review row in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_without_results() {
    let mut harness = setup_view_harness(ViewKind::Results(None));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No finished quiz"), "missing fallback in {html}");
}
