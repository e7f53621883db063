/// Where the user stands in a quiz session, for headers and progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// Zero-based index of the question on screen.
    pub position: usize,
    pub total: usize,
    pub graded: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// `"3 / 10"` style label with a one-based position.
    #[must_use]
    pub fn label(&self) -> String {
        if self.total == 0 {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.position + 1, self.total)
    }

    /// Share of graded questions, 0..=100.
    #[must_use]
    pub fn percent_graded(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.graded * 100 / self.total
    }
}
