use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use quiz_core::Clock;
use quiz_core::model::{
    Question, QuestionBank, QuestionInteractionState, QuestionKey, SessionAggregate,
};
use tracing::{debug, info};

use super::progress::SessionProgress;
use super::store::InteractionStore;
use crate::credentials::CredentialSource;
use crate::error::SessionError;
use crate::grading::{AnswerGrader, GradeOutcome, GradingRoute, PendingGrade};

/// Returned by [`QuizSessionController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Complete,
}

/// Returned by [`QuizSessionController::select_answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The question was already graded or grading was in flight.
    Ignored,
    Graded { is_correct: bool, verified: bool },
}

/// One row of the end-of-session review.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionReview<'a> {
    pub position: usize,
    pub key: QuestionKey,
    pub question: &'a Question,
    pub state: QuestionInteractionState,
}

type CompletionHook = Box<dyn FnOnce(SessionAggregate) + Send>;

/// Owns progression through a question bank and every question's
/// interaction state.
///
/// Grading is split in three steps so callers can release the controller while
/// a request is in flight: [`begin_selection`](Self::begin_selection),
/// [`PendingGrade::run`], [`finish_grading`](Self::finish_grading).
/// [`select_answer`](Self::select_answer) runs all three.
pub struct QuizSessionController {
    bank: QuestionBank,
    position: usize,
    store: InteractionStore,
    grader: Arc<dyn AnswerGrader>,
    credentials: Arc<dyn CredentialSource>,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    on_complete: Option<CompletionHook>,
}

impl QuizSessionController {
    #[must_use]
    pub fn new(
        bank: QuestionBank,
        grader: Arc<dyn AnswerGrader>,
        credentials: Arc<dyn CredentialSource>,
        clock: Clock,
    ) -> Self {
        debug!(questions = bank.len(), scheme = ?bank.scheme(), "quiz session started");
        Self {
            bank,
            position: 0,
            store: InteractionStore::new(),
            grader,
            credentials,
            clock,
            started_at: clock.now(),
            completed_at: None,
            on_complete: None,
        }
    }

    /// Registers a callback fired once, the first time `advance` completes
    /// the session.
    #[must_use]
    pub fn on_session_complete<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(SessionAggregate) + Send + 'static,
    {
        self.on_complete = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.bank.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Time from start to completion, once complete.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.completed_at.map(|done| done - self.started_at)
    }

    /// # Errors
    ///
    /// Returns `OutOfRange` when the bank is empty.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        Ok(self.bank.get(self.position)?)
    }

    /// # Errors
    ///
    /// Returns `OutOfRange` when the bank is empty.
    pub fn current_key(&self) -> Result<QuestionKey, SessionError> {
        Ok(self.bank.identity_of(self.position)?)
    }

    /// # Errors
    ///
    /// Returns `OutOfRange` when the bank is empty.
    pub fn current_state(&self) -> Result<QuestionInteractionState, SessionError> {
        Ok(self.store.read(self.current_key()?))
    }

    #[must_use]
    pub fn state_of(&self, key: QuestionKey) -> QuestionInteractionState {
        self.store.read(key)
    }

    /// Whether `advance` will move on: the current question has a result, or
    /// it is of a type that can never be answered and is skipped.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        let Ok(question) = self.current_question() else {
            return false;
        };
        if !question.kind().is_supported() {
            return true;
        }
        self.current_key()
            .is_ok_and(|key| self.store.get(key).is_some_and(QuestionInteractionState::is_graded))
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            position: self.position,
            total: self.bank.len(),
            graded: usize::try_from(self.aggregate().graded_count()).unwrap_or(usize::MAX),
            is_complete: self.is_complete(),
        }
    }

    /// Records the user's choice for the current question and prepares the
    /// grading call.
    ///
    /// Returns `Ok(None)` when the question is already graded or grading is in
    /// flight; nothing is recorded in that case.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for an empty bank, `UnsupportedQuestionType` for
    /// questions of unknown type and `InvalidAnswer` for a blank answer.
    pub fn begin_selection(&mut self, answer: &str) -> Result<Option<PendingGrade>, SessionError> {
        let key = self.bank.identity_of(self.position)?;
        if !self.store.read(key).accepts_selection() {
            debug!(question = %key, "selection ignored, question already answered");
            return Ok(None);
        }

        let question = self.bank.get(self.position)?;
        question.kind().require_supported()?;
        if answer.trim().is_empty() {
            return Err(SessionError::InvalidAnswer {
                answer: answer.to_string(),
            });
        }

        let question_id = self.bank.wire_id_of(self.position)?;
        let normalized = question.normalize_answer(answer);
        let correct_answer = question.correct_answer().to_string();
        let route = GradingRoute::resolve(self.credentials.as_ref());

        let slot = self.store.slot_mut(key);
        slot.selected_answer = Some(answer.to_string());
        slot.is_grading = true;
        slot.error = None;
        debug!(question = %key, answer = %normalized, route = ?route, "selection recorded");

        Ok(Some(PendingGrade::new(
            key,
            question_id,
            normalized,
            correct_answer,
            route,
            Arc::clone(&self.grader),
        )))
    }

    /// Writes a grading outcome into the slot of the question it was issued
    /// for, regardless of which question is on screen now.
    pub fn finish_grading(&mut self, outcome: GradeOutcome) {
        let slot = self.store.slot_mut(outcome.key);
        if slot.grade_result.is_some() {
            return;
        }
        slot.grade_result = Some(outcome.result);
        slot.error = outcome.error;
        slot.is_grading = false;
    }

    /// Selects and grades an answer for the current question in one call.
    ///
    /// # Errors
    ///
    /// See [`begin_selection`](Self::begin_selection). Grader failures are not
    /// errors; they produce a locally compared result.
    pub async fn select_answer(&mut self, answer: &str) -> Result<SelectionOutcome, SessionError> {
        let Some(pending) = self.begin_selection(answer)? else {
            return Ok(SelectionOutcome::Ignored);
        };
        let outcome = pending.run().await;
        let graded = SelectionOutcome::Graded {
            is_correct: outcome.result.is_correct,
            verified: outcome.result.is_verified(),
        };
        self.finish_grading(outcome);
        Ok(graded)
    }

    /// Moves to the next question once the current one has a result or is
    /// skipped as unsupported. A skipped question still counts toward the total.
    ///
    /// On the last question this returns `Complete` without moving, stamps the
    /// completion time and fires the completion hook (first time only).
    pub fn advance(&mut self) -> SessionStatus {
        if !self.can_advance() {
            debug!(position = self.position, "advance ignored, current question not graded");
            return SessionStatus::InProgress;
        }
        if self.position + 1 < self.bank.len() {
            self.position += 1;
            return SessionStatus::InProgress;
        }

        if self.completed_at.is_none() {
            self.completed_at = Some(self.clock.now());
        }
        if let Some(hook) = self.on_complete.take() {
            let aggregate = self.aggregate();
            info!(
                correct = aggregate.correct_count(),
                total = aggregate.total_count(),
                unverified = aggregate.unverified_count(),
                "quiz session complete"
            );
            hook(aggregate);
        }
        SessionStatus::Complete
    }

    /// Steps back one question. Returns `false` on the first question.
    pub fn previous(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Correct/total over the whole bank, recomputed on every call.
    #[must_use]
    pub fn aggregate(&self) -> SessionAggregate {
        SessionAggregate::tally(
            self.bank
                .keyed()
                .map(|(key, _)| self.store.get(key).and_then(|s| s.grade_result.as_ref())),
        )
    }

    /// Every question with its final state, in bank order.
    #[must_use]
    pub fn review(&self) -> Vec<QuestionReview<'_>> {
        self.bank
            .keyed()
            .enumerate()
            .map(|(position, (key, question))| QuestionReview {
                position,
                key,
                question,
                state: self.store.read(key),
            })
            .collect()
    }
}

impl fmt::Debug for QuizSessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSessionController")
            .field("questions", &self.bank.len())
            .field("position", &self.position)
            .field("touched", &self.store.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::SessionCredentials;
    use crate::error::GradingError;
    use async_trait::async_trait;
    use quiz_core::model::{GradeResult, GradeSource, InteractionError, QuestionId, answers_match};
    use quiz_core::time::fixed_clock;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Grades against the correct answers it was built with.
    struct AnswerKey {
        answers: Vec<&'static str>,
        calls: Mutex<Vec<(u64, String, GradingRoute)>>,
    }

    impl AnswerKey {
        fn new(answers: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                answers,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl AnswerGrader for AnswerKey {
        async fn grade(
            &self,
            question_id: u64,
            answer: &str,
            route: GradingRoute,
        ) -> Result<GradeResult, GradingError> {
            self.calls
                .lock()
                .unwrap()
                .push((question_id, answer.to_string(), route));
            let correct = usize::try_from(question_id)
                .ok()
                .and_then(|index| self.answers.get(index).copied())
                .unwrap_or("TRUE");
            Ok(GradeResult {
                correct_answer: correct.to_string(),
                submitted_answer: answer.to_string(),
                is_correct: answers_match(answer, correct),
                explanation: format!("The answer is {correct}."),
                source: GradeSource::Server,
            })
        }
    }

    struct Unreachable;

    #[async_trait]
    impl AnswerGrader for Unreachable {
        async fn grade(
            &self,
            _question_id: u64,
            _answer: &str,
            _route: GradingRoute,
        ) -> Result<GradeResult, GradingError> {
            Err(GradingError::Rejected("connection refused".into()))
        }
    }

    fn true_false_bank() -> QuestionBank {
        QuestionBank::new(vec![
            Question::true_false(None, "The borrow checker runs at compile time", true),
            Question::true_false(None, "Rust has a garbage collector", false),
        ])
    }

    fn controller(bank: QuestionBank, grader: Arc<dyn AnswerGrader>) -> QuizSessionController {
        QuizSessionController::new(
            bank,
            grader,
            Arc::new(SessionCredentials::guest()),
            fixed_clock(),
        )
    }

    async fn answer_all(session: &mut QuizSessionController, answers: &[&str]) {
        for answer in answers {
            session.select_answer(answer).await.unwrap();
            session.advance();
        }
    }

    #[tokio::test]
    async fn both_true_false_answers_correct() {
        let mut session = controller(true_false_bank(), AnswerKey::new(vec!["TRUE", "FALSE"]));
        answer_all(&mut session, &["O", "X"]).await;
        assert_eq!(session.aggregate().as_pair(), (2, 2));
        assert!(session.is_complete());
    }

    #[tokio::test]
    async fn wrong_first_answer_scores_one_of_two() {
        let mut session = controller(true_false_bank(), AnswerKey::new(vec!["TRUE", "FALSE"]));
        answer_all(&mut session, &["X", "X"]).await;
        assert_eq!(session.aggregate().as_pair(), (1, 2));
    }

    #[tokio::test]
    async fn grader_receives_wire_vocabulary_and_guest_route() {
        let grader = AnswerKey::new(vec!["TRUE", "FALSE"]);
        let mut session = controller(true_false_bank(), grader.clone());
        session.select_answer("O").await.unwrap();

        let calls = grader.calls.lock().unwrap().clone();
        assert_eq!(calls, vec![(0, "TRUE".to_string(), GradingRoute::Guest)]);
        assert_eq!(
            session.current_state().unwrap().selected_answer.as_deref(),
            Some("O")
        );
    }

    #[tokio::test]
    async fn member_credentials_pick_member_route() {
        let grader = AnswerKey::new(vec!["TRUE", "FALSE"]);
        let mut session = QuizSessionController::new(
            true_false_bank(),
            grader.clone(),
            Arc::new(SessionCredentials::with_token("token")),
            fixed_clock(),
        );
        session.select_answer("O").await.unwrap();
        assert_eq!(grader.calls.lock().unwrap()[0].2, GradingRoute::Member);
    }

    #[tokio::test]
    async fn second_selection_is_ignored_while_grading_and_after() {
        let grader = AnswerKey::new(vec!["TRUE", "FALSE"]);
        let mut session = controller(true_false_bank(), grader.clone());

        let pending = session.begin_selection("O").unwrap().expect("first accepted");
        assert!(session.current_state().unwrap().is_grading);
        assert!(session.begin_selection("X").unwrap().is_none());

        session.finish_grading(pending.run().await);
        assert_eq!(
            session.select_answer("X").await.unwrap(),
            SelectionOutcome::Ignored
        );

        let state = session.current_state().unwrap();
        assert_eq!(state.selected_answer.as_deref(), Some("O"));
        assert_eq!(state.grade_result.unwrap().submitted_answer, "TRUE");
        assert_eq!(grader.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn advance_before_grading_has_no_effect() {
        let mut session = controller(true_false_bank(), AnswerKey::new(vec!["TRUE", "FALSE"]));
        assert_eq!(session.advance(), SessionStatus::InProgress);
        assert_eq!(session.position(), 0);

        let _pending = session.begin_selection("O").unwrap();
        assert_eq!(session.advance(), SessionStatus::InProgress);
        assert_eq!(session.position(), 0);
    }

    #[tokio::test]
    async fn grader_failure_falls_back_and_unblocks_advance() {
        let mut session = controller(true_false_bank(), Arc::new(Unreachable));
        let outcome = session.select_answer("O").await.unwrap();
        assert_eq!(
            outcome,
            SelectionOutcome::Graded {
                is_correct: true,
                verified: false
            }
        );

        let state = session.current_state().unwrap();
        assert!(!state.is_grading);
        assert!(matches!(
            state.error,
            Some(InteractionError::GradingFailed { .. })
        ));
        assert_eq!(session.advance(), SessionStatus::InProgress);
        assert_eq!(session.position(), 1);
        assert_eq!(session.aggregate().unverified_count(), 1);
    }

    #[tokio::test]
    async fn stale_grade_lands_on_its_own_question() {
        let grader = AnswerKey::new(vec!["TRUE", "FALSE"]);
        let mut session = controller(true_false_bank(), grader);

        let first = session.begin_selection("O").unwrap().unwrap();
        let outcome = first.run().await;
        session.finish_grading(outcome.clone());
        session.advance();

        // A duplicate completion for question 0 arrives while question 1 is shown.
        session.finish_grading(outcome);
        assert_eq!(session.current_state().unwrap(), QuestionInteractionState::default());
        assert_eq!(session.aggregate().as_pair(), (1, 2));
    }

    #[tokio::test]
    async fn completion_hook_fires_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&fired);
        let mut session = controller(true_false_bank(), AnswerKey::new(vec!["TRUE", "FALSE"]))
            .on_session_complete(move |aggregate| {
                assert_eq!(aggregate.as_pair(), (2, 2));
                seen.fetch_add(1, Ordering::SeqCst);
            });

        answer_all(&mut session, &["O", "X"]).await;
        assert_eq!(session.advance(), SessionStatus::Complete);
        assert_eq!(session.position(), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(session.elapsed(), Some(Duration::zero()));
    }

    #[tokio::test]
    async fn aggregate_is_bounded_mid_session() {
        let mut session = controller(true_false_bank(), AnswerKey::new(vec!["TRUE", "FALSE"]));
        let agg = session.aggregate();
        assert_eq!(agg.as_pair(), (0, 2));

        let _pending = session.begin_selection("O").unwrap();
        let agg = session.aggregate();
        assert!(agg.correct_count() <= agg.total_count());
        assert_eq!(agg.total_count(), 2);
    }

    #[test]
    fn empty_bank_is_out_of_range() {
        let session = controller(QuestionBank::new(Vec::new()), Arc::new(Unreachable));
        assert!(matches!(
            session.current_question(),
            Err(SessionError::Bank(quiz_core::Error::OutOfRange { index: 0, len: 0 }))
        ));
        assert!(!session.can_advance());
    }

    #[tokio::test]
    async fn unsupported_question_is_skipped_but_counted() {
        let bank = QuestionBank::new(vec![
            Question::new(
                Some(QuestionId::new(1)),
                "Explain ownership",
                quiz_core::model::QuestionKind::Unsupported("ESSAY".into()),
                Vec::new(),
                "",
            ),
            Question::true_false(Some(QuestionId::new(2)), "Slices borrow", true),
        ]);
        let mut session = controller(bank, AnswerKey::new(Vec::new()));
        assert!(matches!(
            session.select_answer("anything").await,
            Err(SessionError::Bank(quiz_core::Error::UnsupportedQuestionType { .. }))
        ));

        assert!(session.can_advance());
        assert_eq!(session.advance(), SessionStatus::InProgress);
        assert_eq!(session.position(), 1);

        session.select_answer("O").await.unwrap();
        assert_eq!(session.advance(), SessionStatus::Complete);
        assert_eq!(session.aggregate().as_pair(), (1, 2));
        assert!(session.review()[0].state.grade_result.is_none());
    }

    #[tokio::test]
    async fn grader_gets_backend_id_even_in_positional_bank() {
        let bank = QuestionBank::new(vec![
            Question::true_false(Some(QuestionId::new(42)), "Iterators are lazy", true),
            Question::true_false(None, "Strings are Copy", false),
        ]);
        let grader = AnswerKey::new(Vec::new());
        let mut session = controller(bank, grader.clone());
        session.select_answer("O").await.unwrap();
        session.advance();
        session.select_answer("X").await.unwrap();

        let ids: Vec<u64> = grader.calls.lock().unwrap().iter().map(|c| c.0).collect();
        assert_eq!(ids, vec![42, 1]);
    }

    #[tokio::test]
    async fn repeat_selection_on_graded_question_is_a_no_op() {
        let grader = AnswerKey::new(vec!["TRUE", "FALSE"]);
        let mut session = controller(true_false_bank(), grader.clone());
        session.select_answer("O").await.unwrap();

        assert!(session.begin_selection("").unwrap().is_none());
        assert_eq!(
            session.select_answer("   ").await.unwrap(),
            SelectionOutcome::Ignored
        );
        assert_eq!(grader.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn previous_keeps_earlier_answers_visible() {
        let mut session = controller(true_false_bank(), AnswerKey::new(vec!["TRUE", "FALSE"]));
        session.select_answer("O").await.unwrap();
        session.advance();
        assert!(session.previous());
        assert_eq!(
            session.current_state().unwrap().selected_answer.as_deref(),
            Some("O")
        );
        assert!(!session.previous());

        let review = session.review();
        assert_eq!(review.len(), 2);
        assert!(review[0].state.is_graded());
        assert!(!review[1].state.is_graded());
    }
}
