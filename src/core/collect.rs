use crate::core::model::{FileFailure, FileOutcome, FileStatistics};
use log::error;

/// Final result of a run, both lists in input order.
#[derive(Clone, Debug, Default)]
pub struct Collected {
    pub rows: Vec<FileStatistics>,
    pub failures: Vec<FileFailure>,
}

/// Gathers outcomes as they arrive, in any order, and restores input order on `finish`.
pub struct ResultCollector {
    slots: Vec<Option<FileStatistics>>,
    failures: Vec<(usize, FileFailure)>,
}

impl ResultCollector {
    pub fn new(candidates: usize) -> Self {
        Self {
            slots: vec![None; candidates],
            failures: Vec::new(),
        }
    }

    pub fn accept(&mut self, index: usize, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Stats(stats) => {
                if index >= self.slots.len() {
                    self.slots.resize(index + 1, None);
                }
                self.slots[index] = Some(stats);
            }
            FileOutcome::Failed(failure) => {
                error!(
                    "{} is {} ({})",
                    failure.file_name,
                    failure.kind.as_str(),
                    failure.detail
                );
                self.failures.push((index, failure));
            }
        }
    }

    pub fn finish(mut self) -> Collected {
        self.failures.sort_by_key(|(index, _)| *index);
        Collected {
            rows: self.slots.into_iter().flatten().collect(),
            failures: self.failures.into_iter().map(|(_, f)| f).collect(),
        }
    }
}
