use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three sequential instructional units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrainingModule {
    /// Equipment and pre-flight checks.
    PreFlight,
    /// Aircraft exit, body position and canopy handling.
    Jump,
    /// Emergency procedures.
    Crisis,
}

impl TrainingModule {
    pub const ALL: [TrainingModule; 3] = [Self::PreFlight, Self::Jump, Self::Crisis];

    /// SOP section number the module draws its questions from (1-based).
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::PreFlight => 1,
            Self::Jump => 2,
            Self::Crisis => 3,
        }
    }

    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::PreFlight),
            2 => Some(Self::Jump),
            3 => Some(Self::Crisis),
            _ => None,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.number() - 1)
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::PreFlight => "Equipment & Pre-Flight",
            Self::Jump => "The Jump & Maneuvers",
            Self::Crisis => "Crisis Management",
        }
    }

    /// Toast shown after a correct answer that does not yet complete the module.
    #[must_use]
    pub fn keep_going_notice(self) -> &'static str {
        match self {
            Self::PreFlight => "Great job! One more.",
            Self::Jump => "Solid form! One more.",
            Self::Crisis => "Cool under pressure! One more.",
        }
    }

    #[must_use]
    pub fn incorrect_notice(self) -> &'static str {
        match self {
            Self::PreFlight => "Incorrect. Gear safety is binary. Progress reset.",
            Self::Jump => "Incorrect. Precision in the air is vital. Progress reset.",
            Self::Crisis => "Incorrect. In a crisis, there is no room for error. Progress reset.",
        }
    }

    #[must_use]
    pub fn mastery_notice(self) -> &'static str {
        match self {
            Self::PreFlight => "Mastery achieved! Phase 2: The Jump is now unlocked.",
            Self::Jump => "Mastery achieved! Phase 3: Crisis Mgmt is now unlocked.",
            Self::Crisis => "Course Complete! You are now cleared for the Live Jump Mentor.",
        }
    }
}

impl fmt::Display for TrainingModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Section {}: {}", self.number(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip_and_order() {
        for module in TrainingModule::ALL {
            assert_eq!(TrainingModule::from_number(module.number()), Some(module));
        }
        assert_eq!(TrainingModule::from_number(0), None);
        assert_eq!(TrainingModule::from_number(4), None);
        assert_eq!(TrainingModule::PreFlight.next(), Some(TrainingModule::Jump));
        assert_eq!(TrainingModule::Jump.next(), Some(TrainingModule::Crisis));
        assert_eq!(TrainingModule::Crisis.next(), None);
    }

    #[test]
    fn display_names_the_section() {
        assert_eq!(
            TrainingModule::Crisis.to_string(),
            "Section 3: Crisis Management"
        );
    }
}
