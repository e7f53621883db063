/// Visual state of one loading stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingStage {
    #[default]
    Pending,
    Active,
    Done,
}

/// The three fixed phases shown while a quiz is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Reading,
    /// The only stage whose completion waits on an external operation.
    Generating,
    Preparing,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Reading, Stage::Generating, Stage::Preparing];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Stage::Reading => 0,
            Stage::Generating => 1,
            Stage::Preparing => 2,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Stage::Reading => "Reading your material",
            Stage::Generating => "Generating questions",
            Stage::Preparing => "Preparing your quiz",
        }
    }
}

/// Snapshot of all three stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageBoard {
    stages: [LoadingStage; 3],
}

impl StageBoard {
    #[must_use]
    pub fn pending() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, stage: Stage) -> LoadingStage {
        self.stages[stage.index()]
    }

    pub fn activate(&mut self, stage: Stage) {
        self.stages[stage.index()] = LoadingStage::Active;
    }

    pub fn finish(&mut self, stage: Stage) {
        self.stages[stage.index()] = LoadingStage::Done;
    }

    /// Marks `done` as finished and `next` as active in one step.
    pub fn hand_over(&mut self, done: Stage, next: Stage) {
        self.finish(done);
        self.activate(next);
    }

    #[must_use]
    pub fn active(&self) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .find(|stage| self.get(*stage) == LoadingStage::Active)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.stages.iter().all(|stage| *stage == LoadingStage::Done)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stage, LoadingStage)> + '_ {
        Stage::ALL.into_iter().map(|stage| (stage, self.get(stage)))
    }
}
