use std::fmt;

use super::TrainingModule;

/// Narrowing instruction that scopes which part of the SOP a question may use.
///
/// Derived from `(module, consecutive_correct)` so the second question of a module
/// draws on a different sub-topic than the first. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicFocus {
    module: TrainingModule,
    attempt: u8,
}

impl TopicFocus {
    #[must_use]
    pub fn for_attempt(module: TrainingModule, consecutive_correct: u32) -> Self {
        let attempt = if consecutive_correct == 0 { 0 } else { 1 };
        Self { module, attempt }
    }

    #[must_use]
    pub fn module(&self) -> TrainingModule {
        self.module
    }

    #[must_use]
    pub fn instruction(&self) -> &'static str {
        match (self.module, self.attempt) {
            (TrainingModule::PreFlight, 0) => {
                "Focus strictly on the cumulo-nimbus WEATHER condition mentioned in SOP-ENV-01."
            }
            (TrainingModule::PreFlight, _) => {
                "Focus strictly on HARNESS and ALTIMETER checks found in SOP-GEAR-02."
            }
            (TrainingModule::Jump, 0) => {
                "Focus EXCLUSIVELY on the 'Stable Arch' (The Banana) body position and aircraft exit. \
                 STRICT PROHIBITION: Do NOT mention toggles, steering, turns, or flares. \
                 If the question mentions a parachute handle or steering, it is a failure of this instruction."
            }
            (TrainingModule::Jump, _) => {
                "Focus EXCLUSIVELY on the flare technique (SOP-NAV-01). \
                 STRICT PROHIBITION: Do NOT ask about basic left/right turns or 'how to steer'. \
                 Focus on altitudes for the downwind or base leg."
            }
            (TrainingModule::Crisis, 0) => {
                "Focus strictly on water landings covered in SOP-CRIS-02."
            }
            (TrainingModule::Crisis, _) => {
                "Focus strictly on cut away procedure covered in SOP-CRIS-03."
            }
        }
    }
}

impl fmt::Display for TopicFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.instruction())
    }
}
