#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    EmptyBank,
    Generation,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::EmptyBank => "No questions could be generated from that text.",
            ViewError::Generation => "Question generation failed. Please try again.",
        }
    }
}
