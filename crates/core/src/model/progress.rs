use serde::{Deserialize, Serialize};

use super::TrainingModule;

/// Consecutive correct answers needed to clear a module.
pub const MASTERY_THRESHOLD: u32 = 2;

/// Mastery counter for a single module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleProgress {
    module: TrainingModule,
    consecutive_correct: u32,
    threshold: u32,
}

impl ModuleProgress {
    #[must_use]
    pub fn new(module: TrainingModule) -> Self {
        Self {
            module,
            consecutive_correct: 0,
            threshold: MASTERY_THRESHOLD,
        }
    }

    #[must_use]
    pub fn module(&self) -> TrainingModule {
        self.module
    }

    #[must_use]
    pub fn consecutive_correct(&self) -> u32 {
        self.consecutive_correct
    }

    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Count a correct answer. Returns `true` when the threshold is reached.
    pub(crate) fn record_correct(&mut self) -> bool {
        self.consecutive_correct = self.consecutive_correct.saturating_add(1);
        self.consecutive_correct >= self.threshold
    }

    pub(crate) fn reset(&mut self) {
        self.consecutive_correct = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_reached_on_second_correct() {
        let mut progress = ModuleProgress::new(TrainingModule::Jump);
        assert!(!progress.record_correct());
        assert_eq!(progress.consecutive_correct(), 1);
        assert!(progress.record_correct());
        progress.reset();
        assert_eq!(progress.consecutive_correct(), 0);
        assert_eq!(progress.threshold(), MASTERY_THRESHOLD);
    }
}
