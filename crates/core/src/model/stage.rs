use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::TrainingModule;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrainingStageError {
    #[error("training stage must be between 1 and 4, got {0}")]
    OutOfRange(i64),
}

/// Highest unlocked module. `4` means every module is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrainingStage(u8);

impl TrainingStage {
    pub const FIRST: TrainingStage = TrainingStage(1);
    pub const GRADUATED: TrainingStage = TrainingStage(4);

    /// Rehydrate a stage from a stored integer.
    ///
    /// # Errors
    ///
    /// Returns `TrainingStageError::OutOfRange` outside `1..=4`.
    pub fn from_persisted(value: i64) -> Result<Self, TrainingStageError> {
        match u8::try_from(value) {
            Ok(v @ 1..=4) => Ok(Self(v)),
            _ => Err(TrainingStageError::OutOfRange(value)),
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The module the trainee is currently working on, or `None` once graduated.
    #[must_use]
    pub fn current_module(self) -> Option<TrainingModule> {
        TrainingModule::from_number(self.0)
    }

    #[must_use]
    pub fn is_unlocked(self, module: TrainingModule) -> bool {
        module.number() <= self.0
    }

    #[must_use]
    pub fn is_completed(self, module: TrainingModule) -> bool {
        module.number() < self.0
    }

    #[must_use]
    pub fn is_graduated(self) -> bool {
        self == Self::GRADUATED
    }

    /// Step forward by one. Saturates at `GRADUATED`.
    #[must_use]
    pub fn advanced(self) -> Self {
        Self((self.0 + 1).min(Self::GRADUATED.0))
    }
}

impl Default for TrainingStage {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for TrainingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of 4", self.0)
    }
}
