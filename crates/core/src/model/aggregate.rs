use crate::model::grade::GradeResult;

/// Correct/total tally over a session. Always derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionAggregate {
    correct: u32,
    graded: u32,
    unverified: u32,
    total: u32,
}

impl SessionAggregate {
    /// Folds one entry per bank question; `None` marks an ungraded question.
    pub fn tally<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a GradeResult>>,
    {
        results
            .into_iter()
            .fold(Self::default(), |mut acc, result| {
                acc.total = acc.total.saturating_add(1);
                if let Some(result) = result {
                    acc.graded = acc.graded.saturating_add(1);
                    if result.is_correct {
                        acc.correct = acc.correct.saturating_add(1);
                    }
                    if !result.is_verified() {
                        acc.unverified = acc.unverified.saturating_add(1);
                    }
                }
                acc
            })
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn graded_count(&self) -> u32 {
        self.graded
    }

    /// Graded locally because the backend could not be reached.
    #[must_use]
    pub fn unverified_count(&self) -> u32 {
        self.unverified
    }

    #[must_use]
    pub fn as_pair(&self) -> (u32, u32) {
        (self.correct, self.total)
    }

    /// Rounded percentage of correct answers; 0 for an empty session.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct * 100 + self.total / 2) / self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::grade::GradeSource;

    fn graded(is_correct: bool, source: GradeSource) -> GradeResult {
        GradeResult {
            correct_answer: "TRUE".into(),
            submitted_answer: "TRUE".into(),
            is_correct,
            explanation: String::new(),
            source,
        }
    }

    #[test]
    fn ungraded_questions_count_toward_total_only() {
        let right = graded(true, GradeSource::Server);
        let agg = SessionAggregate::tally([Some(&right), None, None]);
        assert_eq!(agg.as_pair(), (1, 3));
        assert_eq!(agg.graded_count(), 1);
        assert!(agg.correct_count() <= agg.total_count());
    }

    #[test]
    fn fallback_grades_are_flagged_unverified() {
        let server = graded(false, GradeSource::Server);
        let local = graded(true, GradeSource::LocalFallback);
        let agg = SessionAggregate::tally([Some(&server), Some(&local)]);
        assert_eq!(agg.as_pair(), (1, 2));
        assert_eq!(agg.unverified_count(), 1);
        assert_eq!(agg.percent(), 50);
    }

    #[test]
    fn empty_tally_is_zero() {
        let agg = SessionAggregate::tally(std::iter::empty());
        assert_eq!(agg.as_pair(), (0, 0));
        assert_eq!(agg.percent(), 0);
    }
}
