use std::collections::HashMap;

use quiz_core::model::{QuestionInteractionState, QuestionKey};

/// Per-question interaction state, keyed by session identity.
///
/// Slots are never removed during a session. Reading a question that has no
/// slot yet yields the default (empty) state.
#[derive(Debug, Clone, Default)]
pub struct InteractionStore {
    slots: HashMap<QuestionKey, QuestionInteractionState>,
}

impl InteractionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: QuestionKey) -> Option<&QuestionInteractionState> {
        self.slots.get(&key)
    }

    /// Snapshot of a question's state, empty if it was never touched.
    #[must_use]
    pub fn read(&self, key: QuestionKey) -> QuestionInteractionState {
        self.slots.get(&key).cloned().unwrap_or_default()
    }

    pub(crate) fn slot_mut(&mut self, key: QuestionKey) -> &mut QuestionInteractionState {
        self.slots.entry(key).or_default()
    }

    /// Number of questions that have been touched.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_untouched_question_yields_default_without_allocating() {
        let store = InteractionStore::new();
        let state = store.read(QuestionKey::Position(3));
        assert_eq!(state, QuestionInteractionState::default());
        assert!(store.is_empty());
    }

    #[test]
    fn slots_are_isolated_per_key() {
        let mut store = InteractionStore::new();
        store.slot_mut(QuestionKey::Position(0)).selected_answer = Some("O".into());
        assert_eq!(store.read(QuestionKey::Position(1)).selected_answer, None);
        assert_eq!(
            store.read(QuestionKey::Position(0)).selected_answer.as_deref(),
            Some("O")
        );
    }
}
